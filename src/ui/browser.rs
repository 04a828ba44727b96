//! Thin wrappers over the browser APIs the widget touches.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::AbortHandle;
use leptos::ev;
use leptos::prelude::*;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobPropertyBag, Element, HtmlAnchorElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Url,
};

use crate::chat::Connectivity;
use crate::export::ExportFile;

/// Id of the optional `<script type="application/json">` element holding the
/// widget configuration.
pub const CONFIG_ELEMENT_ID: &str = "chat-widget-config";

/// How long a download's object URL outlives the click that started it.
const REVOKE_DELAY: Duration = Duration::from_secs(1);

/// Connectivity as reported by `navigator.onLine`.
pub fn connectivity() -> Connectivity {
    Connectivity::from_online(window().navigator().on_line())
}

/// Call `on_change` on every `online`/`offline` window event until the
/// current reactive owner is cleaned up.
pub fn watch_connectivity<F>(on_change: F)
where
    F: Fn(Connectivity) + Clone + 'static,
{
    let on_online = on_change.clone();
    let online = window_event_listener(ev::online, move |_| on_online(Connectivity::Online));
    let offline = window_event_listener(ev::offline, move |_| on_change(Connectivity::Offline));

    on_cleanup(move || {
        online.remove();
        offline.remove();
    });
}

/// Smoothly scroll `element` so its bottom edge is visible.
pub fn scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::End);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Offer `file` to the user as a download.
///
/// The anchor is in the document only for the click; the object URL is
/// released [`REVOKE_DELAY`] later.
pub fn download(file: &ExportFile) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(file.contents()));
    let options = BlobPropertyBag::new();
    options.set_type(ExportFile::MIME_TYPE);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let body = document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = document().create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file.filename());
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    set_timeout(
        move || {
            if let Err(err) = Url::revoke_object_url(&url) {
                warn!(name: "chat.export.revoke_failed", error = ?err, "Failed to release export URL");
            }
        },
        REVOKE_DELAY,
    );
    Ok(())
}

/// Text of the embedded configuration element, if the host page has one.
pub fn embedded_config() -> Option<String> {
    document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// The in-flight request and the pending delayed delivery of one widget.
///
/// Both are cancelled together when the conversation is cleared or the
/// widget is torn down.
#[derive(Debug, Clone, Default)]
pub struct PendingWork(Arc<Mutex<Pending>>);

#[derive(Debug, Default)]
struct Pending {
    request: Option<AbortHandle>,
    timer: Option<TimeoutHandle>,
}

impl PendingWork {
    pub fn set_request(&self, handle: AbortHandle) {
        if let Some(previous) = self.lock().request.replace(handle) {
            previous.abort();
        }
    }

    pub fn finish_request(&self) {
        self.lock().request = None;
    }

    pub fn set_timer(&self, handle: TimeoutHandle) {
        if let Some(previous) = self.lock().timer.replace(handle) {
            previous.clear();
        }
    }

    pub fn finish_timer(&self) {
        self.lock().timer = None;
    }

    /// Abort the request and clear the timer, whichever are pending.
    pub fn cancel(&self) {
        let mut pending = self.lock();
        if let Some(request) = pending.request.take() {
            request.abort();
        }
        if let Some(timer) = pending.timer.take() {
            timer.clear();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
