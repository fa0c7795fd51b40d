#![allow(dead_code)]

use std::rc::Rc;

use sandart_site::config::Config;
use sandart_site::dispatch::{PageEvent, Response};
use sandart_site::dom::{Document, Element};
use sandart_site::headless::{ManualClock, ManualIntersections, MemoryDocument, MemoryElement, MemoryViewport};
use sandart_site::site::Page;

pub const DESKTOP: &str = "(min-width: 768px)";
pub const REDUCED_MOTION: &str = "(prefers-reduced-motion: reduce)";

/// A headless page plus direct handles on its platform pieces.
pub struct Fixture {
    pub doc: Rc<MemoryDocument>,
    pub viewport: Rc<MemoryViewport>,
    pub clock: Rc<ManualClock>,
    pub intersections: Rc<ManualIntersections<MemoryElement>>,
    pub page: Page<MemoryDocument>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(mut config: Config) -> Self {
        config.seed.get_or_insert(42);
        let doc = Rc::new(MemoryDocument::new());
        let viewport = Rc::new(MemoryViewport::new());
        let clock = Rc::new(ManualClock::new());
        let intersections = Rc::new(ManualIntersections::new());
        let page = Page::new(
            doc.clone(),
            viewport.clone(),
            clock.clone(),
            intersections.clone(),
            config,
        );
        Self {
            doc,
            viewport,
            clock,
            intersections,
            page,
        }
    }

    pub fn body(&self) -> MemoryElement {
        self.doc.body().expect("headless document has a body")
    }

    /// Appends `el` to `<body>` and hands it back.
    pub fn add(&self, el: MemoryElement) -> MemoryElement {
        self.body().append_child(&el);
        el
    }

    pub fn scroll_to(&self, y: f64) {
        self.viewport.set_scroll_y(y);
        self.page.events.emit(&PageEvent::Scroll);
    }

    pub fn click(&self, target: &MemoryElement) -> Response {
        self.page.events.emit(&PageEvent::Click {
            target: target.clone(),
            x: 0.0,
            y: 0.0,
        })
    }

    pub fn click_at(&self, target: &MemoryElement, x: f64, y: f64) -> Response {
        self.page.events.emit(&PageEvent::Click {
            target: target.clone(),
            x,
            y,
        })
    }
}

pub fn div(classes: &str) -> MemoryElement {
    MemoryElement::new("div").with_class(classes)
}
