//! `web_sys` implementations of the platform traits.

mod dom;
mod events;
mod intersection;
mod scheduler;

use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::config::Config;
use crate::site::Page;

pub use dom::{BrowserDocument, BrowserViewport};
pub use events::attach;
pub use intersection::BrowserIntersections;
pub use scheduler::BrowserScheduler;

/// Name of the optional global holding a [`Config`] override.
pub const CONFIG_GLOBAL: &str = "sandartConfig";

/// Reads `window.sandartConfig`. A missing global yields the defaults; a
/// malformed one yields the defaults and the parse error.
pub fn read_config(window: &Window) -> (Config, Option<String>) {
    let raw = match js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return (Config::default(), None),
    };
    match serde_wasm_bindgen::from_value::<Config>(raw) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err.to_string())),
    }
}

pub fn page(window: Window, document: web_sys::Document, config: Config) -> Page<BrowserDocument> {
    Page::new(
        Rc::new(BrowserDocument(document)),
        Rc::new(BrowserViewport(window.clone())),
        Rc::new(BrowserScheduler::new(window)),
        Rc::new(BrowserIntersections),
        config,
    )
}
