//! Round avatar with an optional presence dot.

use leptos::prelude::*;

/// Avatar showing its children (usually an icon) inside a circle.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Avatar online=Signal::derive(move || connected.get())>
///         <BotIcon />
///     </Avatar>
/// }
/// ```
#[component]
pub fn Avatar(
    /// Presence shown as a dot in the corner.
    #[prop(into, default = Signal::stored(true))]
    online: Signal<bool>,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Avatar content.
    children: Children,
) -> impl IntoView {
    let classes = format!("bot-avatar {class}");

    view! {
        <div class=classes>
            <div class="avatar-circle">{children()}</div>
            <div
                class="status-indicator"
                class:offline=move || !online.get()
                aria-hidden="true"
            ></div>
        </div>
    }
}
