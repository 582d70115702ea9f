//! Color presets: tolerant decoding of the stored list and the editor-side store.

mod codec;
mod store;

pub use codec::{
    ColorPreset, PresetUpdate, decode_presets, reindex, sanitize_entry, serialize_for_storage, sparse_table_to_array,
};
pub use store::PresetStore;
