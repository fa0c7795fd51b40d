//! Loading overlay and page-exit fade.

use std::cell::Cell;
use std::rc::Rc;

use crate::dispatch::{EventKind, Response};
use crate::dom::{Document, Element};
use crate::hooks::{class, id};
use crate::site::{ElementOf, Page};

/// Hides `#loader` after the load event plus a short delay, or at the
/// hard timeout, whichever comes first.
pub struct LoadingSequencer<E> {
    overlay: E,
    body: Option<E>,
    hidden: Cell<bool>,
}

impl<E: Element> LoadingSequencer<E> {
    pub fn new(overlay: E, body: Option<E>) -> Self {
        Self {
            overlay,
            body,
            hidden: Cell::new(false),
        }
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let Some(overlay) = page.document.element_by_id(id::LOADER) else {
            log::debug!("no #{}; loading sequencer skipped", id::LOADER);
            return None;
        };
        let this = Rc::new(Self::new(overlay, page.document.body()));

        let delay = page.config.loader_delay_ms;
        let scheduler = page.scheduler.clone();
        let on_load = this.clone();
        page.events.subscribe(EventKind::Load, move |_| {
            let this = on_load.clone();
            scheduler.set_timeout(delay, Box::new(move || this.hide()));
            Response::Continue
        });

        let fallback = this.clone();
        page.scheduler
            .set_timeout(page.config.loader_timeout_ms, Box::new(move || fallback.hide()));

        Some(this)
    }

    /// Idempotent; the second of the two scheduled hides is a no-op.
    pub fn hide(&self) {
        self.overlay.add_class(class::HIDDEN);
        if let Some(body) = &self.body {
            body.remove_class(class::LOADING);
        }
        if !self.hidden.replace(true) {
            log::info!("loading overlay hidden");
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }
}

/// Fades the body out while the browser navigates away.
pub fn install_exit_fade<D: Document + 'static>(page: &Page<D>) -> Option<ElementOf<D>> {
    let body = page.document.body()?;
    let target = body.clone();
    page.events.subscribe(EventKind::BeforeUnload, move |_| {
        target.set_style("opacity", "0");
        target.set_style("transition", "opacity 0.3s ease");
        Response::Continue
    });
    Some(body)
}
