//! Chat shell layout component.

use leptos::prelude::*;

use super::{ChatHeader, ChatInputArea, ChatMessageList, SettingsPanel, StatsModal};
use crate::ui::controller::WidgetContext;

/// Complete widget layout:
/// - header with status and the settings toggle
/// - optional settings panel
/// - scrolling message list
/// - composer
/// - statistics modal while a snapshot is held
#[component]
pub fn ChatShell() -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let show_settings = ctx.show_settings;
    let stats = ctx.stats;

    view! {
        <div class="chat-shell">
            <ChatHeader />
            <Show when=move || show_settings.get()>
                <SettingsPanel />
            </Show>
            <ChatMessageList />
            <ChatInputArea />
            {move || stats.get().map(|snapshot| view! { <StatsModal stats=snapshot /> })}
        </div>
    }
}
