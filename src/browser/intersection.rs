use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::visibility::{Intersection, IntersectionCallback, IntersectionSource, ObserveOptions, Watcher};

struct BrowserWatcher(IntersectionObserver);

impl Watcher<HtmlElement> for BrowserWatcher {
    fn observe(&self, element: &HtmlElement) {
        self.0.observe(element);
    }

    fn unobserve(&self, element: &HtmlElement) {
        self.0.unobserve(element);
    }
}

/// `IntersectionObserver`-backed source. Observers live for the rest of
/// the page.
pub struct BrowserIntersections;

fn convert(value: JsValue) -> Option<Intersection<HtmlElement>> {
    let entry: IntersectionObserverEntry = value.dyn_into().ok()?;
    Some(Intersection {
        target: entry.target().dyn_into().ok()?,
        is_intersecting: entry.is_intersecting(),
    })
}

impl IntersectionSource<HtmlElement> for BrowserIntersections {
    fn watch(
        &self,
        options: &ObserveOptions,
        mut callback: IntersectionCallback<HtmlElement>,
    ) -> Option<Rc<dyn Watcher<HtmlElement>>> {
        let closure = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries: Vec<_> = entries.iter().filter_map(convert).collect();
            callback(&entries, &BrowserWatcher(observer));
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }

        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                closure.forget();
                Some(Rc::new(BrowserWatcher(observer)))
            }
            Err(err) => {
                log::warn!("IntersectionObserver unavailable: {err:?}");
                None
            }
        }
    }
}
