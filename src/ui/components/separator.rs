//! Separator component for visual division.

use leptos::prelude::*;

/// Horizontal rule between groups of controls.
#[component]
pub fn Separator() -> impl IntoView {
    view! {
        <div role="separator" class="separator" />
    }
}
