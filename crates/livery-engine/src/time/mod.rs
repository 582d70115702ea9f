//! Time subsystem.
//!
//! Timers here take the current `Instant` as an argument instead of reading
//! the clock, so gesture and refresh logic stays testable without sleeping.
//! - `Interval` for recurring polls (badge refresh)
//! - `Deadline` for one-shot gestures (hold to delete)

mod deadline;
mod interval;

pub use deadline::Deadline;
pub use interval::Interval;
