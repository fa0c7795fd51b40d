use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::schedule::{Scheduler, TimerId};

enum Timer {
    Once(Timeout),
    Every(Interval),
}

/// `setTimeout`/`setInterval` through gloo, frames through
/// `requestAnimationFrame`.
pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    live: Rc<RefCell<HashMap<TimerId, Timer>>>,
    // Timeouts that already fired. Dropping one inside its own callback
    // would free the running closure, so they are dropped on the next
    // `set_timeout` instead.
    spent: Rc<RefCell<Vec<Timeout>>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            live: Rc::new(RefCell::new(HashMap::new())),
            spent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TimerId(id)
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        self.spent.borrow_mut().clear();
        let id = self.next_id();
        let live = self.live.clone();
        let spent = self.spent.clone();
        let timeout = Timeout::new(delay_ms, move || {
            task();
            if let Some(Timer::Once(fired)) = live.borrow_mut().remove(&id) {
                spent.borrow_mut().push(fired);
            }
        });
        self.live.borrow_mut().insert(id, Timer::Once(timeout));
        id
    }

    fn set_interval(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        let interval = Interval::new(period_ms, move || task());
        self.live.borrow_mut().insert(id, Timer::Every(interval));
        id
    }

    fn cancel(&self, id: TimerId) {
        // Dropping a gloo handle clears the browser timer.
        self.live.borrow_mut().remove(&id);
    }

    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> bool {
        let callback = Closure::once_into_js(move |timestamp: f64| task(timestamp));
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {err:?}");
                false
            }
        }
    }
}
