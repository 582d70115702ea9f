use std::collections::HashSet;

use livery_engine::paint::{PaintSpec, json_number};
use livery_slots::SlotRecord;
use serde_json::Value;

use crate::error::DecodeError;
use crate::presets::{PresetUpdate, decode_presets};

/// Paint slots a part carries at most.
pub const MAX_PAINT_SLOTS: usize = 3;

/// One paintable part of the current vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Stable identity.
    pub part_path: String,
    /// Hierarchy key; the tree is derived from it.
    pub slot_path: String,
    pub display_name: String,
    pub part_name: String,
    pub slot_name: String,
    pub slot_label: Option<String>,
    /// Explicit sibling order, when the backend provides one.
    pub order: Option<i64>,
    pub current_paints: Vec<PaintSpec>,
    /// Per-part override; `None` while the part follows the vehicle base paint.
    pub custom_paints: Option<Vec<PaintSpec>>,
    /// Derived; see [`compute_has_custom_paint`](crate::sync::compute_has_custom_paint).
    pub has_custom_paint: bool,
}

impl Part {
    pub fn new(part_path: impl Into<String>, slot_path: impl Into<String>) -> Self {
        let part_path = part_path.into();
        let slot_path = slot_path.into();
        Self {
            part_name: part_path.rsplit('/').next().unwrap_or_default().to_string(),
            display_name: part_path.clone(),
            slot_name: slot_path.clone(),
            part_path,
            slot_path,
            slot_label: None,
            order: None,
            current_paints: Vec::new(),
            custom_paints: None,
            has_custom_paint: false,
        }
    }

    /// Decodes one entry of a state broadcast's `parts` array.
    ///
    /// `partPath` is required. Paints come from `currentPaints`, or the older
    /// `paints` key, and are truncated to [`MAX_PAINT_SLOTS`].
    pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DecodeError::new("part", "entry is not an object"))?;
        let part_path = obj
            .get("partPath")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DecodeError::new("part", "missing partPath"))?;

        let text = |key: &str| obj.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        let paints = obj
            .get("currentPaints")
            .filter(|v| v.is_array())
            .or_else(|| obj.get("paints"))
            .map(PaintSpec::list_from_json)
            .unwrap_or_default();

        Ok(Self {
            part_path: part_path.to_string(),
            slot_path: text("slotPath"),
            display_name: text("displayName"),
            part_name: text("partName"),
            slot_name: text("slotName"),
            slot_label: obj
                .get("slotLabel")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            order: obj.get("order").and_then(json_number).filter(|n| n.is_finite()).map(|n| n as i64),
            current_paints: paints.into_iter().take(MAX_PAINT_SLOTS).collect(),
            custom_paints: obj.get("customPaints").filter(|v| v.is_array()).map(PaintSpec::list_from_json),
            has_custom_paint: false,
        })
    }
}

impl SlotRecord for Part {
    fn identifier(&self) -> &str {
        &self.part_path
    }

    fn slot_path(&self) -> &str {
        &self.slot_path
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn part_name(&self) -> &str {
        &self.part_name
    }

    fn slot_name(&self) -> &str {
        &self.slot_name
    }

    fn slot_label(&self) -> Option<&str> {
        self.slot_label.as_deref()
    }

    fn order(&self) -> Option<i64> {
        self.order
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────

/// Full authoritative state pushed by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub vehicle_id: Option<String>,
    pub base_paints: Vec<PaintSpec>,
    pub original_base_paints: Option<Vec<PaintSpec>>,
    pub parts: Vec<Part>,
    pub presets: PresetUpdate,
}

impl Snapshot {
    /// Decodes a `VehiclePartsPaintingState` payload.
    ///
    /// A payload whose `parts` is not an array is rejected as a whole. Single
    /// malformed parts, and repeats of a part path, are skipped with a warning.
    /// Preset errors never reject the snapshot; presets are then left unchanged.
    /// An empty preset list is a placeholder sent alongside paint updates and
    /// also leaves presets unchanged.
    pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DecodeError::new("vehicle state", "payload is not an object"))?;
        let raw_parts = obj
            .get("parts")
            .and_then(Value::as_array)
            .ok_or_else(|| DecodeError::new("vehicle state", "parts is not an array"))?;

        let mut seen = HashSet::new();
        let mut parts = Vec::with_capacity(raw_parts.len());
        for raw in raw_parts {
            match Part::from_json(raw) {
                Ok(part) if seen.insert(part.part_path.clone()) => parts.push(part),
                Ok(part) => log::warn!("skipping duplicate part {}", part.part_path),
                Err(err) => log::warn!("skipping part: {err}"),
            }
        }

        let presets = match obj.get("colorPresets") {
            None => PresetUpdate::Unchanged,
            Some(raw) => match decode_presets(raw) {
                Ok(PresetUpdate::Replace(list)) if list.is_empty() => PresetUpdate::Unchanged,
                Ok(update) => update,
                Err(err) => {
                    log::warn!("{err}; keeping current presets");
                    PresetUpdate::Unchanged
                }
            },
        };

        Ok(Self {
            vehicle_id: obj.get("vehicleId").and_then(vehicle_id),
            base_paints: obj.get("basePaints").map(PaintSpec::list_from_json).unwrap_or_default(),
            original_base_paints: obj
                .get("originalBasePaints")
                .filter(|v| v.is_array())
                .map(PaintSpec::list_from_json),
            parts,
            presets,
        })
    }
}

fn vehicle_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
