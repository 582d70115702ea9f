//! Livery engine crate.
//!
//! Toolkit-independent building blocks for the paint editor: the paint model
//! and its codecs, screen geometry and pointer input for pickers, caller-driven
//! timers, and logger setup.

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod time;
