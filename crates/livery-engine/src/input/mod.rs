//! Input subsystem.
//!
//! Public API is platform-agnostic: hosts translate their own events into
//! `PointerEvent`s before handing them to gesture models.

mod types;

pub use types::{MouseButton, MouseButtonState, PointerButtonEvent, PointerEvent};
