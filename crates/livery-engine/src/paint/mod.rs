//! Paint model shared between the editor state and the wire codecs.
//!
//! Scope:
//! - canonical unit-float paint (`PaintSpec`) and its tolerant JSON decode
//! - byte-quantized editor view (`PaintView`) and view-level equality
//! - 8-bit color, hex, and HSV conversion for pickers

pub mod color;
pub mod spec;
pub mod view;

pub use color::{Hsv, Rgb8, hsv_to_rgb, rgb_to_hsv};
pub use spec::{PaintSpec, clamp01, json_number};
pub use view::{PaintView, VIEW_EPSILON, editor_slots, paints_equal, views_equal, views_to_paints};
