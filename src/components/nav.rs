//! Header state, section highlighting, the collapsible menu and in-page
//! anchor scrolling.

use std::cell::Cell;
use std::rc::Rc;

use crate::dispatch::{EventKind, PageEvent, Response};
use crate::dom::{Document, Element, Viewport};
use crate::hooks::{attr, class, id, select};
use crate::schedule::Scheduler;
use crate::site::Page;

/// Vertical extent of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Index of the section containing `probe`. Overlaps resolve to the last
/// match in document order.
pub fn active_section(spans: &[SectionSpan], probe: f64) -> Option<usize> {
    spans.iter().rposition(|span| span.contains(probe))
}

pub struct NavController<E> {
    header: E,
    links: Vec<E>,
    sections: Vec<E>,
    scrolled_offset: f64,
    probe: f64,
    frame_pending: Cell<bool>,
}

impl<E: Element> NavController<E> {
    pub fn new(header: E, links: Vec<E>, sections: Vec<E>, scrolled_offset: f64, probe: f64) -> Self {
        Self {
            header,
            links,
            sections,
            scrolled_offset,
            probe,
            frame_pending: Cell::new(false),
        }
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let Some(header) = page.document.element_by_id(id::HEADER) else {
            log::debug!("no #{}; header tracking skipped", id::HEADER);
            return None;
        };
        let this = Rc::new(Self::new(
            header,
            page.document.query_all(select::NAV_LINK),
            page.document.query_all(select::SECTION),
            page.config.scrolled_offset,
            page.config.section_probe,
        ));
        log::debug!(
            "nav tracking {} links over {} sections",
            this.links.len(),
            this.sections.len()
        );

        let nav = this.clone();
        let scheduler = page.scheduler.clone();
        let viewport = page.viewport.clone();
        page.events.subscribe(EventKind::Scroll, move |_| {
            nav.schedule_update(scheduler.as_ref(), viewport.clone());
            Response::Continue
        });
        Some(this)
    }

    /// Queues one update for the next frame; further calls before that
    /// frame runs are dropped.
    pub fn schedule_update(self: &Rc<Self>, scheduler: &dyn Scheduler, viewport: Rc<dyn Viewport>) {
        if self.frame_pending.replace(true) {
            return;
        }
        let this = self.clone();
        let queued = scheduler.request_frame(Box::new(move |_| {
            this.update(viewport.scroll_y());
            this.frame_pending.set(false);
        }));
        if !queued {
            // Let the next scroll try again.
            self.frame_pending.set(false);
        }
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending.get()
    }

    pub fn update(&self, scroll_y: f64) {
        self.header
            .set_class(class::SCROLLED, scroll_y > self.scrolled_offset);
        self.highlight(scroll_y + self.probe);
    }

    fn highlight(&self, probe: f64) {
        let spans: Vec<SectionSpan> = self
            .sections
            .iter()
            .filter_map(|section| {
                Some(SectionSpan {
                    id: section.attribute("id")?,
                    top: section.offset_top(),
                    height: section.offset_height(),
                })
            })
            .collect();
        let href = active_section(&spans, probe).map(|i| format!("#{}", spans[i].id));

        for link in &self.links {
            let on = href.is_some() && link.attribute(attr::HREF) == href;
            link.set_class(class::ACTIVE, on);
        }
    }

    pub fn active_link(&self) -> Option<&E> {
        self.links.iter().find(|l| l.has_class(class::ACTIVE))
    }
}

/// The hamburger toggle and the collapsible `#nav` it opens.
pub struct Menu<E> {
    toggle: E,
    nav: E,
    links: Vec<E>,
}

impl<E: Element> Menu<E> {
    pub fn new(toggle: E, nav: E, links: Vec<E>) -> Self {
        Self { toggle, nav, links }
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let toggle = page.document.element_by_id(id::HAMBURGER)?;
        let nav = page.document.element_by_id(id::NAV)?;
        let this = Rc::new(Self::new(toggle, nav, page.document.query_all(select::NAV_LINK)));

        let menu = this.clone();
        page.events.subscribe(EventKind::Click, move |event| {
            if let PageEvent::Click { target, .. } = event {
                menu.click(target);
            }
            Response::Continue
        });
        Some(this)
    }

    pub fn click(&self, target: &E) {
        if self.toggle.contains(target) {
            self.toggle.toggle_class(class::ACTIVE);
            self.nav.toggle_class(class::ACTIVE);
        } else if self.links.iter().any(|l| l.contains(target)) || !self.nav.contains(target) {
            self.close();
        }
    }

    pub fn close(&self) {
        self.toggle.remove_class(class::ACTIVE);
        self.nav.remove_class(class::ACTIVE);
    }

    pub fn is_open(&self) -> bool {
        self.nav.has_class(class::ACTIVE)
    }
}

/// Smooth-scrolls in-page `#anchor` links to their target, leaving room
/// for the fixed header. Returns the number of anchors wired.
pub fn install_anchor_scrolling<D: Document + 'static>(page: &Page<D>) -> usize {
    let anchors: Vec<_> = page
        .document
        .query_all(select::ANCHOR)
        .into_iter()
        .filter(|a| a.attribute(attr::HREF).as_deref() != Some("#"))
        .collect();
    if anchors.is_empty() {
        return 0;
    }
    let count = anchors.len();

    let document = page.document.clone();
    let viewport = page.viewport.clone();
    page.events.subscribe(EventKind::Click, move |event| {
        let PageEvent::Click { target, .. } = event else {
            return Response::Continue;
        };
        let Some(anchor) = anchors.iter().find(|a| a.contains(target)) else {
            return Response::Continue;
        };
        let href = anchor.attribute(attr::HREF).unwrap_or_default();
        let section = href.strip_prefix('#').and_then(|name| document.element_by_id(name));
        if let Some(section) = section {
            let header = document
                .element_by_id(id::HEADER)
                .map_or(0.0, |h| h.offset_height());
            viewport.smooth_scroll_to(section.offset_top() - header);
        }
        Response::PreventDefault
    });
    count
}
