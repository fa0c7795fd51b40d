use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::schedule::{Scheduler, TimerId};

enum Task {
    Once(Box<dyn FnOnce()>),
    Every(Rc<RefCell<Box<dyn FnMut()>>>, u32),
}

struct Timer {
    id: TimerId,
    due: f64,
    task: Task,
}

/// Virtual-time scheduler. Nothing runs until the test advances time or
/// runs a frame.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
    next_id: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
    frames: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
    frames_refused: Cell<bool>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `ms`, firing due timers in deadline order.
    pub fn advance(&self, ms: f64) {
        let target = self.now.get() + ms;
        while let Some(timer) = self.pop_due(target) {
            self.now.set(timer.due);
            match timer.task {
                Task::Once(task) => task(),
                Task::Every(task, period) => {
                    self.timers.borrow_mut().push(Timer {
                        id: timer.id,
                        due: timer.due + f64::from(period),
                        task: Task::Every(task.clone(), period),
                    });
                    (&mut *task.borrow_mut())();
                }
            }
        }
        self.now.set(target);
    }

    /// Runs the callbacks queued before this call with the current time.
    /// Callbacks they queue wait for the next frame.
    pub fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        let now = self.now.get();
        for frame in frames {
            frame(now);
        }
        count
    }

    /// Alternates `advance(frame_ms)` and `run_frame` until no frame is
    /// queued, up to `max_frames`. Returns the frames run.
    pub fn run_frames(&self, frame_ms: f64, max_frames: usize) -> usize {
        let mut ran = 0;
        while ran < max_frames && self.pending_frames() > 0 {
            self.advance(frame_ms);
            self.run_frame();
            ran += 1;
        }
        ran
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// While set, `request_frame` fails like a page without
    /// `requestAnimationFrame`.
    pub fn refuse_frames(&self, refuse: bool) {
        self.frames_refused.set(refuse);
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    fn pop_due(&self, target: f64) -> Option<Timer> {
        let mut timers = self.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        Some(timers.remove(index))
    }

    fn next_id(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TimerId(id)
    }
}

impl Scheduler for ManualClock {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        self.timers.borrow_mut().push(Timer {
            id,
            due: self.now.get() + f64::from(delay_ms),
            task: Task::Once(task),
        });
        id
    }

    fn set_interval(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        // Browsers clamp zero-period intervals; so do we, or `advance` spins.
        let period = period_ms.max(1);
        self.timers.borrow_mut().push(Timer {
            id,
            due: self.now.get() + f64::from(period),
            task: Task::Every(Rc::new(RefCell::new(task)), period),
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|t| t.id != id);
    }

    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> bool {
        if self.frames_refused.get() {
            return false;
        }
        self.frames.borrow_mut().push(task);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_deadline_order() {
        let clock = ManualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let log = log.clone();
            clock.set_timeout(delay, Box::new(move || log.borrow_mut().push(tag)));
        }
        clock.advance(25.0);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        clock.advance(5.0);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn interval_cancelled_from_inside_stops() {
        let clock = Rc::new(ManualClock::new());
        let hits = Rc::new(Cell::new(0));
        let id = Rc::new(Cell::new(None));
        let handle = {
            let (inner, hits, id) = (clock.clone(), hits.clone(), id.clone());
            clock.set_interval(
                100,
                Box::new(move || {
                    hits.set(hits.get() + 1);
                    if hits.get() == 2 {
                        if let Some(id) = id.get() {
                            inner.cancel(id);
                        }
                    }
                }),
            )
        };
        id.set(Some(handle));
        clock.advance(1000.0);
        assert_eq!(hits.get(), 2);
    }
}
