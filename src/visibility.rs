//! Viewport-intersection triggers.
//!
//! [`IntersectionSource`] is the raw primitive (an `IntersectionObserver`
//! in the browser). [`VisibilityObserver`] layers one-shot and repeating
//! semantics on top of it.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction at which the observer reports a crossing.
    pub threshold: f64,
    /// CSS margin applied to the viewport, e.g. `"0px 0px -50px 0px"`.
    pub root_margin: Option<String>,
}

impl ObserveOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: None,
        }
    }

    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = Some(margin.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

/// The observing half of an intersection observer.
pub trait Watcher<E> {
    fn observe(&self, element: &E);
    fn unobserve(&self, element: &E);
}

pub type IntersectionCallback<E> = Box<dyn FnMut(&[Intersection<E>], &dyn Watcher<E>)>;

pub trait IntersectionSource<E> {
    /// Creates an observer; `None` if the platform refused.
    fn watch(
        &self,
        options: &ObserveOptions,
        callback: IntersectionCallback<E>,
    ) -> Option<Rc<dyn Watcher<E>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Fire once per element, then stop observing it.
    Once,
    /// Fire on every entry into view.
    Repeat,
}

pub struct VisibilityObserver<E> {
    watcher: Option<Rc<dyn Watcher<E>>>,
    pending: Rc<RefCell<Vec<E>>>,
}

impl<E: Clone + PartialEq + 'static> VisibilityObserver<E> {
    pub fn new<F>(
        source: &dyn IntersectionSource<E>,
        options: &ObserveOptions,
        trigger: Trigger,
        mut on_enter: F,
    ) -> Self
    where
        F: FnMut(&E) + 'static,
    {
        let pending: Rc<RefCell<Vec<E>>> = Rc::new(RefCell::new(Vec::new()));
        let registry = pending.clone();
        let callback: IntersectionCallback<E> = Box::new(move |entries, watcher| {
            for entry in entries.iter().filter(|e| e.is_intersecting) {
                if trigger == Trigger::Once {
                    let mut registry = registry.borrow_mut();
                    let Some(pos) = registry.iter().position(|el| *el == entry.target) else {
                        continue;
                    };
                    registry.remove(pos);
                    drop(registry);
                    watcher.unobserve(&entry.target);
                }
                on_enter(&entry.target);
            }
        });

        let watcher = source.watch(options, callback);
        if watcher.is_none() {
            log::warn!("intersection observer unavailable; visibility triggers disabled");
        }
        Self { watcher, pending }
    }

    pub fn one_shot<F>(source: &dyn IntersectionSource<E>, options: &ObserveOptions, on_enter: F) -> Self
    where
        F: FnMut(&E) + 'static,
    {
        Self::new(source, options, Trigger::Once, on_enter)
    }

    pub fn repeating<F>(source: &dyn IntersectionSource<E>, options: &ObserveOptions, on_enter: F) -> Self
    where
        F: FnMut(&E) + 'static,
    {
        Self::new(source, options, Trigger::Repeat, on_enter)
    }

    pub fn observe(&self, element: &E) {
        let Some(watcher) = &self.watcher else { return };
        {
            let mut pending = self.pending.borrow_mut();
            if pending.contains(element) {
                return;
            }
            pending.push(element.clone());
        }
        watcher.observe(element);
    }

    /// Elements still waiting on their trigger. Repeating observers never
    /// shrink.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}
