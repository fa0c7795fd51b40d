//! Timers and display-frame callbacks.

/// Handle for a pending timeout or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId;
    fn set_interval(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerId;
    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, id: TimerId);
    /// Runs `task` before the next repaint with the frame timestamp in ms.
    /// Returns false, dropping `task`, if no frame could be requested.
    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) -> bool;
}
