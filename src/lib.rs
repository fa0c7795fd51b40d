//! Presentation behaviour for the nicolon sand-art landing page.
//!
//! The components in [`components`] are written against the small
//! platform traits in [`dom`], [`schedule`], [`visibility`] and
//! [`dispatch`]. In the browser they run on `web_sys` (see `browser`);
//! on the host they run on the in-memory `headless` platform (cargo
//! feature `headless`).

pub mod components;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod dom;
pub mod hooks;
pub mod schedule;
pub mod site;
pub mod visibility;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod browser;

// Only compile the start hook when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::dispatch::PageEvent;
    use crate::{browser, site};

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let (config, config_error) = browser::read_config(&window);
        // A second init (e.g. a reloaded module) keeps the first logger.
        let _ = console_log::init_with_level(config.level());
        if let Some(err) = config_error {
            log::warn!("ignoring window.{}: {err}", browser::CONFIG_GLOBAL);
        }

        let page = browser::page(window.clone(), document.clone(), config);
        browser::attach(&window, &document, &page.events)?;
        site::mount(&page);
        // Module scripts can start after `load` has already fired.
        if document.ready_state() == "complete" {
            page.events.emit(&PageEvent::Load);
        }

        log::info!("sandart site started");
        Ok(())
    }
}
