//! Settings panel component.

use leptos::ev::Event;
use leptos::prelude::*;

use crate::preferences::FontSize;
use crate::ui::components::{
    Button, ButtonSize, ButtonVariant, ChartIcon, DownloadIcon, Separator, TrashIcon,
};
use crate::ui::controller::WidgetContext;

/// Display preferences and the conversation actions.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let prefs = ctx.prefs;

    let on_dark_mode = {
        let ctx = ctx.clone();
        move |_| ctx.toggle_dark_mode()
    };
    let on_font_size = {
        let ctx = ctx.clone();
        move |ev: Event| {
            if let Ok(size) = event_target_value(&ev).parse::<FontSize>() {
                ctx.set_font_size(size);
            }
        }
    };
    let clear = {
        let ctx = ctx.clone();
        Callback::new(move |_| ctx.clear())
    };
    let export = {
        let ctx = ctx.clone();
        Callback::new(move |_| ctx.export())
    };
    let stats = Callback::new(move |_| ctx.open_stats());

    view! {
        <div class="settings-panel">
            <label class="setting-item">
                <input
                    type="checkbox"
                    prop:checked=move || prefs.with(|p| p.dark_mode)
                    on:change=on_dark_mode
                />
                "Dark mode"
            </label>
            <label class="setting-item">
                "Font size"
                <select on:change=on_font_size>
                    {FontSize::ALL
                        .into_iter()
                        .map(|size| {
                            view! {
                                <option
                                    value=size.as_str()
                                    selected=move || prefs.with(|p| p.font_size == size)
                                >
                                    {size.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
            <Separator />
            <div class="setting-actions">
                <Button variant=ButtonVariant::Destructive size=ButtonSize::Sm on_click=clear>
                    <TrashIcon />
                    "Clear Chat"
                </Button>
                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm on_click=export>
                    <DownloadIcon />
                    "Export Chat"
                </Button>
                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm on_click=stats>
                    <ChartIcon />
                    "Statistics"
                </Button>
            </div>
        </div>
    }
}
