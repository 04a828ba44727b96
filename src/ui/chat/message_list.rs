//! Chat message list component.

use leptos::prelude::*;

use crate::chat::{ChatState, Message, Sender};
use crate::ui::browser;
use crate::ui::controller::WidgetContext;

/// Scrolling list of messages plus the typing indicator.
///
/// Every change to the list scrolls the end marker into view. Keystrokes in
/// the composer update the same state but leave the list revision alone, so
/// they neither copy the list nor re-render it.
#[component]
pub fn ChatMessageList() -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let chat = ctx.chat;
    let end_ref = NodeRef::<leptos::html::Div>::new();

    let revision = Memo::new(move |_| chat.with(ChatState::revision));
    let messages = Memo::new(move |_| {
        revision.track();
        chat.with_untracked(|c| c.messages().to_vec())
    });
    let typing = Memo::new(move |_| chat.with(ChatState::is_typing));

    Effect::new(move |_| {
        revision.track();
        typing.track();
        if let Some(end) = end_ref.get() {
            browser::scroll_into_view(&end);
        }
    });

    view! {
        <div class="messages-container" role="log" aria-live="polite" aria-label="Chat messages">
            <For
                each=move || messages.get()
                key=Message::id
                children=move |message| view! { <MessageBubble message=message /> }
            />
            <Show when=move || typing.get()>
                <TypingIndicator />
            </Show>
            <div class="messages-end" node_ref=end_ref></div>
        </div>
    }
}

/// One message with its time.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let side = match message.sender() {
        Sender::User => "message user-message",
        Sender::Bot => "message bot-message",
    };

    view! {
        <div class=side>
            <div class="message-content">
                <div class="message-bubble" class:error-message=message.is_error()>
                    {message.text().to_string()}
                </div>
                <div class="message-time">{message.display_time()}</div>
            </div>
        </div>
    }
}

#[component]
fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="message bot-message">
            <div class="message-content">
                <div class="message-bubble typing-indicator" aria-label="Bot is typing">
                    <div class="typing-dots">
                        <span></span>
                        <span></span>
                        <span></span>
                    </div>
                </div>
            </div>
        </div>
    }
}
