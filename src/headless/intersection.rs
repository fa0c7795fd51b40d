use std::cell::RefCell;
use std::rc::Rc;

use crate::visibility::{Intersection, IntersectionCallback, IntersectionSource, ObserveOptions, Watcher};

struct Observer<E> {
    options: ObserveOptions,
    targets: RefCell<Vec<(E, bool)>>,
    callback: RefCell<IntersectionCallback<E>>,
}

impl<E: Clone + PartialEq> Watcher<E> for Observer<E> {
    fn observe(&self, element: &E) {
        let mut targets = self.targets.borrow_mut();
        if !targets.iter().any(|(el, _)| el == element) {
            targets.push((element.clone(), false));
        }
    }

    fn unobserve(&self, element: &E) {
        self.targets.borrow_mut().retain(|(el, _)| el != element);
    }
}

/// Intersection source driven by [`ManualIntersections::set_ratio`].
///
/// Like the browser, an observer is only notified when an element crosses
/// that observer's threshold, and observers stay alive while registered.
pub struct ManualIntersections<E> {
    observers: RefCell<Vec<Rc<Observer<E>>>>,
}

impl<E> Default for ManualIntersections<E> {
    fn default() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
        }
    }
}

impl<E: Clone + PartialEq + 'static> ManualIntersections<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports that `ratio` of `element` is now visible.
    pub fn set_ratio(&self, element: &E, ratio: f64) {
        let observers = self.observers.borrow().clone();

        for observer in observers {
            let crossed = {
                let mut targets = observer.targets.borrow_mut();
                let Some(slot) = targets.iter_mut().find(|(el, _)| el == element) else {
                    continue;
                };
                let inside = ratio > 0.0 && ratio >= observer.options.threshold;
                let crossed = inside != slot.1;
                slot.1 = inside;
                crossed.then_some(inside)
            };
            let Some(is_intersecting) = crossed else { continue };
            let entries = [Intersection {
                target: element.clone(),
                is_intersecting,
            }];
            let mut callback = observer.callback.borrow_mut();
            (&mut *callback)(&entries, observer.as_ref());
        }
    }

    /// Options of the first observer watching `element`.
    pub fn options_for(&self, element: &E) -> Option<ObserveOptions> {
        self.observers
            .borrow()
            .iter()
            .find(|o| o.targets.borrow().iter().any(|(el, _)| el == element))
            .map(|o| o.options.clone())
    }

    /// Number of observers currently watching `element`.
    pub fn watchers_of(&self, element: &E) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.targets.borrow().iter().any(|(el, _)| el == element))
            .count()
    }
}

impl<E: Clone + PartialEq + 'static> IntersectionSource<E> for ManualIntersections<E> {
    fn watch(
        &self,
        options: &ObserveOptions,
        callback: IntersectionCallback<E>,
    ) -> Option<Rc<dyn Watcher<E>>> {
        let observer = Rc::new(Observer {
            options: options.clone(),
            targets: RefCell::new(Vec::new()),
            callback: RefCell::new(callback),
        });
        self.observers.borrow_mut().push(observer.clone());
        Some(observer)
    }
}
