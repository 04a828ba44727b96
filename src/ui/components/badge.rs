//! Badge component for counters and status labels.

use leptos::prelude::*;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Neutral badge.
    #[default]
    Default,
    /// Badge for the user's side of the conversation.
    User,
    /// Badge for the bot's side of the conversation.
    Bot,
}

impl BadgeVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "badge",
            Self::User => "badge badge-user",
            Self::Bot => "badge badge-bot",
        }
    }
}

/// Badge component for displaying a short value.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Badge variant=BadgeVariant::User>{stats.user_messages}</Badge>
/// }
/// ```
#[component]
pub fn Badge(
    /// Badge variant.
    #[prop(default = BadgeVariant::Default)]
    variant: BadgeVariant,
    /// Badge content.
    children: Children,
) -> impl IntoView {
    view! {
        <span class=variant.classes()>
            {children()}
        </span>
    }
}
