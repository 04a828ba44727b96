//! Widget root component.

use leptos::prelude::*;

use super::browser;
use super::chat::ChatShell;
use super::controller::WidgetContext;
use crate::api::HttpClient;
use crate::config::WidgetConfig;

/// Root of one chat widget.
///
/// Owns the widget's state for as long as it is mounted: connectivity
/// listeners are registered here and removed on unmount, together with any
/// exchange still in progress.
#[component]
pub fn ChatWidget(config: WidgetConfig, client: HttpClient) -> impl IntoView {
    let ctx = WidgetContext::new(config, client);
    tracing::info!(
        name: "chat.widget.mounted",
        session = %ctx.session(),
        "Chat widget mounted"
    );
    provide_context(ctx.clone());

    ctx.set_connectivity(browser::connectivity());
    browser::watch_connectivity({
        let ctx = ctx.clone();
        move |connectivity| ctx.set_connectivity(connectivity)
    });

    let prefs = ctx.prefs;
    on_cleanup(move || ctx.teardown());

    view! {
        <div class=move || prefs.get().container_classes()>
            <ChatShell />
        </div>
    }
}
