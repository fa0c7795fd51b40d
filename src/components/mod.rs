//! Page behaviours. Each component owns its state and wires itself to the
//! [`crate::site::Page`] in an `install` function that returns `None` when
//! its markup is missing.

pub mod back_to_top;
pub mod count_up;
pub mod gallery;
pub mod lifecycle;
pub mod nav;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod slider;
