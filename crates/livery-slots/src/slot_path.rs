//! Slot path normalization.
//!
//! Canonical form: forward slashes, no empty segments, no leading or
//! trailing separator. `"\\body//hood/ "` becomes `"body/hood"`.

pub const SEPARATOR: char = '/';

/// Normalizes a raw slot path into its canonical form.
pub fn normalize_slot_path(raw: &str) -> String {
    raw.trim()
        .split(|c| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the key of the slot this normalized path hangs from.
///
/// - `None` for the empty path (nothing can be its parent)
/// - `Some("")` for a single-segment path (parent is the empty-path slot)
/// - otherwise everything before the last separator
pub fn parent_key(normalized: &str) -> Option<&str> {
    if normalized.is_empty() {
        return None;
    }
    match normalized.rfind(SEPARATOR) {
        Some(i) => Some(&normalized[..i]),
        None => Some(""),
    }
}
