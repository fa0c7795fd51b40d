//! Page-level event bus.
//!
//! The browser adapter turns `window`/`document` listeners into
//! [`PageEvent`]s; tests emit the same events by hand. Handlers run in
//! subscription order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    Load,
    Scroll,
    Resize,
    Click { target: E, x: f64, y: f64 },
    PointerMove { target: E, x: f64, y: f64 },
    /// The pointer left the document.
    PointerLeave,
    BeforeUnload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Scroll,
    Resize,
    Click,
    PointerMove,
    PointerLeave,
    BeforeUnload,
}

impl<E> PageEvent<E> {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Load => EventKind::Load,
            PageEvent::Scroll => EventKind::Scroll,
            PageEvent::Resize => EventKind::Resize,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::PointerMove { .. } => EventKind::PointerMove,
            PageEvent::PointerLeave => EventKind::PointerLeave,
            PageEvent::BeforeUnload => EventKind::BeforeUnload,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Response {
    #[default]
    Continue,
    PreventDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Rc<RefCell<dyn FnMut(&PageEvent<E>) -> Response>>;

pub struct Dispatcher<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, EventKind, Handler<E>)>>,
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<E: 'static> Dispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&PageEvent<E>) -> Response + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        self.handlers.borrow_mut().push((id, kind, handler));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub, _, _)| *sub != id);
        handlers.len() != before
    }

    pub fn subscribers(&self, kind: EventKind) -> usize {
        self.handlers
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Delivers `event` to every handler registered for its kind.
    ///
    /// Handlers may subscribe or unsubscribe while the event is in flight;
    /// one removed mid-emit is not called.
    pub fn emit(&self, event: &PageEvent<E>) -> Response {
        let kind = event.kind();
        let snapshot: Vec<(SubscriptionId, Handler<E>)> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, h)| (*id, h.clone()))
            .collect();

        let mut response = Response::Continue;
        for (id, handler) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            let Ok(mut handler) = handler.try_borrow_mut() else {
                log::warn!("skipping re-entrant {kind:?} handler");
                continue;
            };
            if (&mut *handler)(event) == Response::PreventDefault {
                response = Response::PreventDefault;
            }
        }
        response
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.handlers.borrow().iter().any(|(sub, _, _)| *sub == id)
    }
}
