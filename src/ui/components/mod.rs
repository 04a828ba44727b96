//! Reusable widget building blocks.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants and a reactive disabled state
//! - [`Card`], [`CardHeader`], [`CardContent`]: Card container
//! - [`Badge`]: Counter/status badge
//! - [`Avatar`]: Round avatar with a presence dot
//! - [`Separator`]: Visual separator line
//! - [`icons`]: SVG icon components

mod avatar;
mod badge;
mod button;
mod card;
mod icons;
mod separator;

pub use avatar::Avatar;
pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::{Card, CardContent, CardHeader};
pub use icons::*;
pub use separator::Separator;
