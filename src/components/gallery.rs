use std::cell::RefCell;
use std::rc::Rc;

use crate::dispatch::{EventKind, PageEvent, Response};
use crate::dom::{Document, Element};
use crate::hooks::{attr, class, select};
use crate::site::Page;

/// Tag that matches every category.
pub const ALL: &str = "all";
const ENTRANCE: &str = "scaleIn 0.4s ease forwards";

pub fn matches(filter: &str, category: Option<&str>) -> bool {
    filter == ALL || category == Some(filter)
}

/// Category filter for `.gallery-item`s, driven by `.filter-btn` clicks.
pub struct GalleryFilter<E> {
    buttons: Vec<E>,
    items: Vec<E>,
    selected: RefCell<String>,
}

impl<E: Element> GalleryFilter<E> {
    pub fn new(buttons: Vec<E>, items: Vec<E>) -> Self {
        Self {
            buttons,
            items,
            selected: RefCell::new(ALL.to_owned()),
        }
    }

    pub fn install<D>(page: &Page<D>) -> Option<Rc<Self>>
    where
        D: Document<Element = E> + 'static,
    {
        let buttons = page.document.query_all(select::FILTER_BUTTON);
        if buttons.is_empty() {
            log::debug!("no filter buttons; gallery filter skipped");
            return None;
        }
        let this = Rc::new(Self::new(buttons, page.document.query_all(select::GALLERY_ITEM)));

        let gallery = this.clone();
        page.events.subscribe(EventKind::Click, move |event| {
            if let PageEvent::Click { target, .. } = event {
                if let Some(index) = gallery.buttons.iter().position(|b| b.contains(target)) {
                    gallery.select(index);
                }
            }
            Response::Continue
        });
        Some(this)
    }

    /// Activates button `index` and applies its `data-filter` tag.
    pub fn select(&self, index: usize) {
        let Some(button) = self.buttons.get(index) else { return };
        for (i, b) in self.buttons.iter().enumerate() {
            b.set_class(class::ACTIVE, i == index);
        }
        let tag = button.attribute(attr::FILTER).unwrap_or_else(|| ALL.to_owned());
        self.apply(&tag);
    }

    /// Shows the items matching `tag` (restarting their entrance animation)
    /// and hides the rest. Button state is left alone.
    pub fn apply(&self, tag: &str) {
        for item in &self.items {
            if matches(tag, item.attribute(attr::CATEGORY).as_deref()) {
                item.set_style("display", "block");
                item.set_style("animation", ENTRANCE);
            } else {
                item.set_style("display", "none");
            }
        }
        *self.selected.borrow_mut() = tag.to_owned();
    }

    pub fn selected(&self) -> String {
        self.selected.borrow().clone()
    }
}
