//! Button component with variants and sizes.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button.
    #[default]
    Primary,
    /// Secondary action button.
    Secondary,
    /// Subtle ghost button.
    Ghost,
    /// Destructive action button.
    Destructive,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
            Self::Ghost => "btn-ghost",
            Self::Destructive => "btn-danger",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "btn-sm",
            Self::Md => "btn-md",
            Self::Icon => "btn-icon",
        }
    }
}

/// Button with a reactive disabled state.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button
///         variant=ButtonVariant::Primary
///         disabled=Signal::derive(move || busy.get())
///         on_click=Callback::new(move |_| submit())
///     >
///         "Send"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// Accessible label, for icon-only buttons.
    #[prop(optional)]
    label: Option<&'static str>,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Click handler.
    #[prop(optional)]
    on_click: Option<Callback<MouseEvent>>,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = format!("btn {} {} {class}", variant.classes(), size.classes());

    view! {
        <button
            type="button"
            class=classes
            aria-label=label
            title=label
            disabled=move || disabled.get()
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
