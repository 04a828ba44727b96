//! Chat header component.

use leptos::prelude::*;

use crate::chat::ComposerStatus;
use crate::ui::components::{Avatar, BotIcon, Button, ButtonSize, ButtonVariant, SettingsIcon};
use crate::ui::controller::WidgetContext;

/// Status line under the title.
pub fn status_text(status: ComposerStatus) -> &'static str {
    match status {
        ComposerStatus::Ready => "Online • Ready to help",
        ComposerStatus::Sending | ComposerStatus::AwaitingReply => "Typing…",
        ComposerStatus::Offline => "Offline",
    }
}

/// Chat header with avatar, title, status and the settings toggle.
#[component]
pub fn ChatHeader() -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let title = ctx.config.text.title.clone();
    let chat = ctx.chat;

    let online = Signal::derive(move || chat.with(|c| c.connectivity().is_online()));
    let status = move || status_text(chat.with(|c| c.composer_status()));

    view! {
        <header class="chat-header">
            <div class="header-content">
                <Avatar online=online>
                    <BotIcon class="bot-icon" />
                </Avatar>
                <div class="header-text">
                    <h3>{title}</h3>
                    <p class="status-text" aria-live="polite">{status}</p>
                </div>
            </div>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                label="Settings"
                class="settings-toggle"
                on_click=Callback::new(move |_| ctx.toggle_settings())
            >
                <SettingsIcon />
            </Button>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_follows_composer() {
        assert_eq!(status_text(ComposerStatus::Ready), "Online • Ready to help");
        assert_eq!(status_text(ComposerStatus::Sending), "Typing…");
        assert_eq!(status_text(ComposerStatus::AwaitingReply), "Typing…");
        assert_eq!(status_text(ComposerStatus::Offline), "Offline");
    }
}
