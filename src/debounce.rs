use std::cell::Cell;
use std::rc::Rc;

use crate::schedule::{Scheduler, TimerId};

/// Runs only the last task of a burst, once the burst has been quiet for
/// `wait_ms`.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait_ms: u32) -> Self {
        Self {
            scheduler,
            wait_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        let pending = self.pending.clone();
        let id = self.scheduler.set_timeout(
            self.wait_ms,
            Box::new(move || {
                pending.set(None);
                task();
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}
