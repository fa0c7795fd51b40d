use std::cell::Cell;
use std::rc::Rc;

use crate::dispatch::{EventKind, PageEvent, Response};
use crate::dom::{Document, Element, Rect};
use crate::hooks::select;
use crate::site::Page;

/// Maximum content shift, in px, when the pointer sits on a hero edge.
pub const TRAVEL_PX: f64 = 10.0;

/// Pointer position relative to the centre of `rect`, each axis in
/// [-0.5, 0.5]. `None` for an empty rect.
pub fn relative_offset(rect: Rect, x: f64, y: f64) -> Option<(f64, f64)> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let dx = ((x - rect.left) / rect.width).clamp(0.0, 1.0) - 0.5;
    let dy = ((y - rect.top) / rect.height).clamp(0.0, 1.0) - 0.5;
    Some((dx, dy))
}

/// Nudges `.hero-content` towards the pointer while it is over `.hero`.
pub struct Parallax<E> {
    hero: E,
    content: E,
    hovering: Cell<bool>,
}

impl<E: Element> Parallax<E> {
    pub fn new(hero: E, content: E) -> Self {
        Self {
            hero,
            content,
            hovering: Cell::new(false),
        }
    }

    /// Desktop-width viewports only.
    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        if !page.viewport.matches_media(&page.config.desktop_query) {
            log::debug!("parallax disabled below desktop width");
            return None;
        }
        let hero = page.document.query(select::HERO)?;
        let content = hero.query(select::HERO_CONTENT)?;
        let this = Rc::new(Self::new(hero, content));

        let on_move = this.clone();
        page.events.subscribe(EventKind::PointerMove, move |event| {
            if let PageEvent::PointerMove { target, x, y } = event {
                on_move.pointer_move(target, *x, *y);
            }
            Response::Continue
        });
        let on_leave = this.clone();
        page.events.subscribe(EventKind::PointerLeave, move |_| {
            on_leave.leave();
            Response::Continue
        });
        Some(this)
    }

    pub fn pointer_move(&self, target: &E, x: f64, y: f64) {
        if !self.hero.contains(target) {
            self.leave();
            return;
        }
        let Some((dx, dy)) = relative_offset(self.hero.bounding_rect(), x, y) else {
            return;
        };
        self.hovering.set(true);
        self.content.set_style(
            "transform",
            &format!("translate({:.2}px, {:.2}px)", dx * TRAVEL_PX, dy * TRAVEL_PX),
        );
    }

    /// Eases the content back to rest. Only acts after a hover.
    pub fn leave(&self) {
        if !self.hovering.replace(false) {
            return;
        }
        self.content.set_style("transform", "translate(0, 0)");
        self.content.set_style("transition", "transform 0.5s ease");
    }
}
