use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{Document, Element};
use crate::hooks::{class, select};
use crate::site::Page;

/// Rotates `.hero-slide` elements on a fixed period. Exactly one slide is
/// `active` from construction on.
pub struct HeroSlider<E> {
    slides: Vec<E>,
    current: Cell<usize>,
}

impl<E: Element> HeroSlider<E> {
    /// `None` for an empty slide set. The first slide already marked
    /// active (or slide 0) becomes current; every other slide is cleared.
    pub fn new(slides: Vec<E>) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let current = slides
            .iter()
            .position(|s| s.has_class(class::ACTIVE))
            .unwrap_or(0);
        for (i, slide) in slides.iter().enumerate() {
            slide.set_class(class::ACTIVE, i == current);
        }
        Some(Self {
            slides,
            current: Cell::new(current),
        })
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let Some(this) = Self::new(page.document.query_all(select::HERO_SLIDE)) else {
            log::debug!("no hero slides; slider skipped");
            return None;
        };
        let this = Rc::new(this);
        let slider = this.clone();
        page.scheduler.set_interval(
            page.config.slide_interval_ms,
            Box::new(move || {
                slider.advance();
            }),
        );
        log::debug!("hero slider rotating {} slides", this.len());
        Some(this)
    }

    /// Moves `active` to the next slide, wrapping around. Returns the new
    /// index.
    pub fn advance(&self) -> usize {
        let from = self.current.get();
        let to = (from + 1) % self.slides.len();
        self.slides[from].remove_class(class::ACTIVE);
        self.slides[to].add_class(class::ACTIVE);
        self.current.set(to);
        to
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
