//! DOM Helpers
//!
//! Thin wrappers over `web_sys` lookups and blocking prompts. Missing
//! elements are logged and skipped rather than treated as fatal.

use leptos::prelude::{window_event_listener, WindowListenerHandle};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// First element matching `selector`
pub fn query(selector: &str) -> Option<HtmlElement> {
    let found = document()
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if found.is_none() {
        log::debug!("[DOM] No element for {}", selector);
    }
    found
}

pub fn focus(selector: &str) {
    if let Some(el) = query(selector) {
        if let Err(e) = el.focus() {
            log::warn!("[DOM] focus({}) failed: {:?}", selector, e);
        }
    }
}

pub fn focus_by_id(id: &str) {
    focus(&format!("#{}", id));
}

/// Blocking alert
pub fn alert(message: &str) {
    if let Some(w) = window() {
        if let Err(e) = w.alert_with_message(message) {
            log::warn!("[DOM] alert failed: {:?}", e);
        }
    }
}

/// Blocking yes/no prompt. Anything but an explicit "yes" is a no.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Document-wide keydown listener. Dropping the handle does not remove it;
/// call `remove()` on the handle for that.
pub fn on_global_keydown(
    handler: impl Fn(web_sys::KeyboardEvent) + 'static,
) -> WindowListenerHandle {
    window_event_listener(leptos::ev::keydown, handler)
}
