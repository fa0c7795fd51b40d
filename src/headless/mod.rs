//! In-memory implementations of the platform traits, for running the
//! components outside a browser.

mod clock;
mod dom;
mod intersection;

pub use clock::ManualClock;
pub use dom::{MemoryDocument, MemoryElement, MemoryViewport};
pub use intersection::ManualIntersections;
