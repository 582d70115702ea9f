//! Livery UI: editor state for per-part vehicle painting.
//!
//! Everything here is host-agnostic: broadcasts come in as `(name, JSON)`
//! pairs, user actions are plain method calls, and backend instructions go
//! out through a [`CommandSink`]. Time only advances when the host calls
//! [`PaintEditor::tick`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use livery_ui::prelude::*;
//!
//! let mut editor = PaintEditor::new(EditorConfig::from_env(), Vec::new(), Instant::now());
//! editor.open();
//!
//! // For every broadcast from the simulation:
//! editor.handle_event("VehiclePartsPaintingState", &payload);
//!
//! // User actions:
//! editor.select_part("vehicle/hood");
//! editor.edited_paints_mut()[0].color = Rgb8::new(255, 128, 64);
//! editor.apply_paint();
//!
//! // Drain the sink and hand each chunk to the simulation.
//! for command in editor.sink_mut().drain(..) {
//!     run_lua(&command.to_lua());
//! }
//! ```

pub mod command;
pub mod config;
pub mod configs;
pub mod editor;
pub mod error;
pub mod event;
pub mod filter;
pub mod part;
pub mod picker;
pub mod presets;
pub mod sync;

pub use command::{Command, CommandSink};
pub use config::EditorConfig;
pub use editor::{PaintEditor, PickerTarget, TreeRow};
pub use error::DecodeError;
pub use event::{EventResult, InboundEvent};

/// Everything a host needs to drive an editor.
pub mod prelude {
    pub use crate::command::{Command, CommandSink};
    pub use crate::config::EditorConfig;
    pub use crate::configs::{SavedConfig, SavedConfigs};
    pub use crate::editor::{PaintEditor, PickerTarget, TreeRow};
    pub use crate::error::DecodeError;
    pub use crate::event::{EventResult, InboundEvent};
    pub use crate::filter::FilterState;
    pub use crate::part::{Part, Snapshot};
    pub use crate::picker::{DragTarget, HsvPicker};
    pub use crate::presets::{ColorPreset, PresetStore, PresetUpdate};
    pub use crate::sync::PaintSync;
    pub use livery_engine::coords::{Rect, Vec2};
    pub use livery_engine::input::PointerEvent;
    pub use livery_engine::paint::{PaintSpec, PaintView, Rgb8};
    pub use std::time::Instant;
}
