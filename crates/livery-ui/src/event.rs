use livery_engine::paint::json_number;
use serde_json::Value;

use crate::error::DecodeError;
use crate::part::Snapshot;
use crate::presets::{PresetUpdate, decode_presets};

/// Broadcast name of the full vehicle state.
pub const STATE_EVENT: &str = "VehiclePartsPaintingState";
/// Broadcast name of the saved-configuration list.
pub const SAVED_CONFIGS_EVENT: &str = "VehiclePartsPaintingSavedConfigs";
/// Broadcast name of settings-store changes.
pub const SETTINGS_EVENT: &str = "SettingsChanged";
/// Broadcast from the painting extension when the world finishes loading.
pub const WORLD_READY_EVENT: &str = "VehiclePartsPaintingWorldReady";
/// Engine-wide world state change. Always re-initializes when ready.
pub const WORLD_STATE_EVENT: &str = "WorldReadyStateChanged";

/// World state value meaning "loaded and playable".
pub const WORLD_READY: i64 = 1;

/// Decoded broadcast from the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    State(Snapshot),
    /// Raw payload; the saved-configuration list decodes it itself so it can
    /// re-validate its delete dialog in the same step.
    SavedConfigs(Value),
    /// Only the preset key is of interest. A settings change that does not
    /// mention presets decodes to `Unchanged`.
    SettingsChanged(PresetUpdate),
    /// `forced` skips the duplicate check.
    WorldReady { state: i64, forced: bool },
}

impl InboundEvent {
    /// Decodes a named broadcast. Unknown names yield `Ok(None)`.
    pub fn parse(name: &str, data: &Value) -> Result<Option<Self>, DecodeError> {
        let event = match name {
            STATE_EVENT => InboundEvent::State(Snapshot::from_json(data)?),
            SAVED_CONFIGS_EVENT => InboundEvent::SavedConfigs(data.clone()),
            SETTINGS_EVENT => {
                let presets = data
                    .get("values")
                    .and_then(|values| values.get("userPaintPresets"))
                    .unwrap_or(&Value::Null);
                InboundEvent::SettingsChanged(decode_presets(presets)?)
            }
            WORLD_READY_EVENT => InboundEvent::WorldReady { state: world_state(data, "worldReadyState")?, forced: false },
            WORLD_STATE_EVENT => InboundEvent::WorldReady { state: world_state(data, "state")?, forced: true },
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

/// Accepts `{key: n}` or a bare number.
fn world_state(data: &Value, key: &str) -> Result<i64, DecodeError> {
    data.get(key)
        .and_then(json_number)
        .or_else(|| json_number(data))
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .ok_or_else(|| DecodeError::new("world state", format!("missing numeric `{key}`")))
}

/// Whether an input event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing it.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
