//! Chat input area component.

use leptos::ev::{Event, KeyboardEvent};
use leptos::prelude::*;

use crate::chat::ComposerStatus;
use crate::ui::components::{Button, ButtonSize, ButtonVariant, LoaderIcon, SendIcon, WifiOffIcon};
use crate::ui::controller::WidgetContext;

/// Whether a key press submits the draft: Enter, without Shift, and not while
/// an input method is composing.
fn submits_on(key: &str, shift: bool, composing: bool) -> bool {
    key == "Enter" && !shift && !composing
}

/// Composer: offline banner, message textarea and send button.
///
/// Enter submits; Shift+Enter inserts a newline.
#[component]
pub fn ChatInputArea() -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let chat = ctx.chat;
    let placeholder = ctx.config.text.placeholder.clone();

    let status = Memo::new(move |_| chat.with(|c| c.composer_status()));
    let offline = move || status.get() == ComposerStatus::Offline;
    let send_disabled = Signal::derive(move || !chat.with(|c| c.can_submit()));

    let on_input = {
        let ctx = ctx.clone();
        move |ev: Event| ctx.set_draft(event_target_value(&ev))
    };
    let on_keydown = {
        let ctx = ctx.clone();
        move |ev: KeyboardEvent| {
            if submits_on(&ev.key(), ev.shift_key(), ev.is_composing()) {
                ev.prevent_default();
                ctx.submit();
            }
        }
    };

    view! {
        <div class="input-form">
            <Show when=offline>
                <div class="offline-banner" role="status">
                    <WifiOffIcon />
                    <span>"You're offline. Messages can't be sent until you reconnect."</span>
                </div>
            </Show>
            <div class="input-container">
                <textarea
                    class="message-input"
                    rows="1"
                    placeholder=placeholder
                    prop:value=move || chat.with(|c| c.draft().to_string())
                    disabled=offline
                    on:input=on_input
                    on:keydown=on_keydown
                ></textarea>
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Icon
                    label="Send message"
                    class="send-button"
                    disabled=send_disabled
                    on_click=Callback::new(move |_| ctx.submit())
                >
                    {move || {
                        if status.get() == ComposerStatus::Sending {
                            view! { <LoaderIcon /> }.into_any()
                        } else {
                            view! { <SendIcon /> }.into_any()
                        }
                    }}
                </Button>
            </div>
        </div>
    }
}
