//! Slot-path forest, filtering, and highlighting for flat part lists.
//!
//! Vehicle parts arrive as a flat list keyed by slash-delimited slot paths.
//! This crate turns them into a browsable forest and answers search queries
//! against it. It knows nothing about paint: callers implement
//! [`SlotRecord`] for their own part type and the forest stores indices into
//! the caller's slice.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`record`] | `SlotRecord` trait |
//! | [`slot_path`] | `normalize_slot_path`, `parent_key` |
//! | [`tree`] | `Forest`, `NodeId` |
//! | [`filter`] | `matches`, `filter_tree`, `FilteredNode` |
//! | [`highlight`] | `Segment`, `WordGroup`, `highlight`, `group_by_word`, `FilterResult` |

pub mod filter;
pub mod highlight;
pub mod record;
pub mod slot_path;
pub mod tree;

pub use filter::{FilteredNode, filter_tree, find_filtered, full_tree, matches};
pub use highlight::{FilterResult, Segment, WordGroup, collect_results, group_by_word, highlight};
pub use record::SlotRecord;
pub use slot_path::{normalize_slot_path, parent_key};
pub use tree::{Forest, NodeId};
