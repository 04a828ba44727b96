//! Card component used by the widget's overlays.

use leptos::prelude::*;

/// Card container component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Card class="stats-card">
///         <CardHeader>
///             <h3>"Chat Statistics"</h3>
///         </CardHeader>
///         <CardContent>
///             <p>"Total messages: 4"</p>
///         </CardContent>
///     </Card>
/// }
/// ```
#[component]
pub fn Card(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Card content.
    children: Children,
) -> impl IntoView {
    let classes = format!("card {class}");

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}

/// Card header section.
#[component]
pub fn CardHeader(
    /// Header content.
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card-header">
            {children()}
        </div>
    }
}

/// Card content section.
#[component]
pub fn CardContent(
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Content.
    children: Children,
) -> impl IntoView {
    let classes = format!("card-content {class}");

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}
