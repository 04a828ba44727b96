//! Browser front end.
//!
//! A Leptos client-side rendered widget over the shared
//! [`ChatState`](crate::chat::ChatState).
//!
//! # Structure
//!
//! - [`app`]: Widget root component
//! - [`controller`]: Reactive state and the actions views trigger
//! - [`browser`]: Connectivity, scrolling and download helpers
//! - [`components`]: Reusable building blocks
//! - [`chat`]: Chat-specific layout components

pub mod app;
pub mod browser;
pub mod chat;
pub mod components;
pub mod controller;

pub use app::ChatWidget;

use leptos::prelude::*;

use crate::api::HttpClient;
use crate::config::WidgetConfig;

/// Read the host page's configuration, install logging and mount the widget
/// on `<body>`.
pub fn mount() {
    let config = match browser::embedded_config() {
        Some(json) => WidgetConfig::from_json(&json),
        None => Ok(WidgetConfig::default()),
    };
    let config = config.unwrap_or_else(|err| {
        web_sys::console::warn_1(&format!("chat widget: ignoring invalid config: {err}").into());
        WidgetConfig::default()
    });
    crate::telemetry::init(&config.log.filter);

    let client = match HttpClient::from_config(&config.api) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(name: "chat.config.invalid", error = %err, "Invalid chat service address");
            return;
        }
    };
    tracing::info!(name: "chat.config.loaded", base_url = %client.base_url(), "Chat service configured");

    leptos::mount::mount_to_body(move || view! { <ChatWidget config=config client=client /> });
}
