//! Chat widget
//!
//! A chat widget that talks to an external chat service: a message list, a
//! composer, and four auxiliary actions (clear, export, statistics, health).
//!
//! # Architecture
//!
//! - **Core**: [`chat::ChatState`], a finite state model shared by every front end
//! - **Service client**: [`api::ChatBackend`] and its `reqwest` implementation
//! - **Browser front end**: Leptos client-side rendered widget ([`ui`])
//! - **Terminal front end**: line-oriented session on stdin/stdout (native only)
//!
//! # Modules
//!
//! - [`api`]: Chat service client
//! - [`chat`]: Messages, reply delay and conversation state
//! - [`config`]: Layered configuration
//! - [`export`]: Export file naming and formatting
//! - [`preferences`]: Theme and font size
//! - [`session`]: Session identifier
//! - [`telemetry`]: Tracing subscriber setup

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod export;
pub mod preferences;
pub mod session;
pub mod telemetry;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
pub mod ui;
