use std::fmt;

/// A payload from the simulation or the settings store that could not be used.
///
/// Decoding never panics; callers log the error and keep their previous state.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub message: String,
    /// What was being decoded, e.g. "vehicle state" or "color presets".
    pub context: &'static str,
}

impl DecodeError {
    pub(crate) fn new(context: &'static str, msg: impl Into<String>) -> Self {
        Self { message: msg.into(), context }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not decode {}: {}", self.context, self.message)
    }
}

impl std::error::Error for DecodeError {}
