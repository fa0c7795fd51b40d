use std::rc::Rc;

use crate::dispatch::{EventKind, PageEvent, Response};
use crate::dom::{Document, Element, Viewport};
use crate::hooks::{class, id};
use crate::site::Page;

pub struct BackToTop<E> {
    button: E,
    threshold: f64,
}

impl<E: Element> BackToTop<E> {
    pub fn new(button: E, threshold: f64) -> Self {
        Self { button, threshold }
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let button = page.document.element_by_id(id::BACK_TO_TOP)?;
        let this = Rc::new(Self::new(button, page.config.back_to_top_offset));

        let on_scroll = this.clone();
        let viewport = page.viewport.clone();
        page.events.subscribe(EventKind::Scroll, move |_| {
            on_scroll.update(viewport.scroll_y());
            Response::Continue
        });

        let on_click = this.clone();
        let viewport = page.viewport.clone();
        page.events.subscribe(EventKind::Click, move |event| {
            if let PageEvent::Click { target, .. } = event {
                if on_click.button.contains(target) {
                    on_click.scroll_to_top(viewport.as_ref());
                }
            }
            Response::Continue
        });
        Some(this)
    }

    pub fn update(&self, scroll_y: f64) {
        self.button.set_class(class::VISIBLE, scroll_y > self.threshold);
    }

    pub fn scroll_to_top(&self, viewport: &dyn Viewport) {
        viewport.smooth_scroll_to(0.0);
    }

    pub fn is_visible(&self) -> bool {
        self.button.has_class(class::VISIBLE)
    }
}
