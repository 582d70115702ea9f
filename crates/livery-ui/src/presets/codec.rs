use livery_engine::paint::{PaintSpec, json_number};
use serde_json::{Map, Value};

use crate::error::DecodeError;

const CONTEXT: &str = "color presets";

/// A named paint the user saved for reuse.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPreset {
    pub name: String,
    pub paint: PaintSpec,
    /// 1-based position in the stored list. Reassigned on every rebuild, so it
    /// only identifies an entry until the next update.
    pub storage_index: usize,
}

impl ColorPreset {
    /// Same name and view-equal paint; the storage index is not compared.
    pub fn same_entry(&self, other: &ColorPreset) -> bool {
        self.name == other.name && self.paint.view_eq(&other.paint)
    }
}

/// Outcome of decoding a preset payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetUpdate {
    /// The payload explicitly carried no preset information.
    Unchanged,
    /// Authoritative list, storage indices already assigned.
    Replace(Vec<ColorPreset>),
}

/// Decodes a preset payload in any of the stored shapes.
///
/// Accepted: an array of entries, a JSON string holding such an array, or a
/// sparse table keyed `"1"`, `"2"`, ... with optional `length`/`n` counts.
/// `null` means "no update". Shapes that cannot be read are errors; callers
/// keep their current presets.
pub fn decode_presets(value: &Value) -> Result<PresetUpdate, DecodeError> {
    match value {
        Value::Null => Ok(PresetUpdate::Unchanged),
        Value::Array(items) => Ok(PresetUpdate::Replace(decode_list(items))),
        Value::Object(map) => {
            let items = sparse_table_to_array(map)?;
            Ok(PresetUpdate::Replace(decode_list(&items)))
        }
        Value::String(text) => {
            if text.trim().is_empty() {
                return Ok(PresetUpdate::Replace(Vec::new()));
            }
            let parsed: Value = serde_json::from_str(text)
                .map_err(|e| DecodeError::new(CONTEXT, format!("invalid JSON: {e}")))?;
            match parsed {
                Value::String(_) => Err(DecodeError::new(CONTEXT, "JSON string nested in a JSON string")),
                other => decode_presets(&other),
            }
        }
        Value::Bool(_) | Value::Number(_) => Err(DecodeError::new(CONTEXT, "expected a list or table")),
    }
}

/// Rebuilds a dense list from a 1-based sparse table.
///
/// An empty table, or one whose count says zero, is an empty list. A table
/// that claims entries but has none under numeric keys is unrecognized.
/// Holes are skipped; entries past a declared count are ignored.
pub fn sparse_table_to_array(map: &Map<String, Value>) -> Result<Vec<Value>, DecodeError> {
    let declared = ["length", "n"]
        .iter()
        .find_map(|key| map.get(*key).and_then(json_number))
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as usize);

    let mut entries: Vec<(usize, &Value)> = map
        .iter()
        .filter_map(|(key, v)| key.trim().parse::<usize>().ok().filter(|i| *i >= 1).map(|i| (i, v)))
        .collect();
    entries.sort_by_key(|(i, _)| *i);
    if let Some(n) = declared.filter(|n| *n > 0) {
        entries.retain(|(i, _)| *i <= n);
    }

    if entries.is_empty() {
        return if map.is_empty() || declared == Some(0) {
            Ok(Vec::new())
        } else {
            Err(DecodeError::new(CONTEXT, "table has no numeric entries"))
        };
    }
    Ok(entries.into_iter().map(|(_, v)| v.clone()).collect())
}

fn decode_list(items: &[Value]) -> Vec<ColorPreset> {
    let mut presets: Vec<ColorPreset> = items
        .iter()
        .filter_map(|raw| {
            let preset = sanitize_entry(raw);
            if preset.is_none() {
                log::debug!("dropping preset entry without color: {raw}");
            }
            preset
        })
        .collect();
    reindex(&mut presets);
    presets
}

/// Assigns dense 1-based storage indices in list order.
pub fn reindex(presets: &mut [ColorPreset]) {
    for (i, preset) in presets.iter_mut().enumerate() {
        preset.storage_index = i + 1;
    }
}

/// Normalizes one raw entry. Entries without any recognizable color are dropped.
///
/// Color sources, first match wins: `paint.baseColor`, `baseColor`, a `value`
/// array, a `value` object with `r`/`g`/`b`/`a`. Finish channels come from the
/// `paint` sub-object when present, else from the entry itself.
pub fn sanitize_entry(raw: &Value) -> Option<ColorPreset> {
    let obj = raw.as_object()?;
    let paint_obj = obj.get("paint").and_then(Value::as_object);

    let base_color = paint_obj
        .and_then(|p| p.get("baseColor"))
        .and_then(channels_from_array)
        .or_else(|| obj.get("baseColor").and_then(channels_from_array))
        .or_else(|| obj.get("value").and_then(channels_from_array))
        .or_else(|| obj.get("value").and_then(channels_from_object))?;

    let finish = |key: &str| {
        paint_obj
            .and_then(|p| p.get(key))
            .or_else(|| obj.get(key))
            .and_then(json_number)
            .unwrap_or(0.0)
    };
    let paint = PaintSpec {
        base_color,
        metallic: finish("metallic"),
        roughness: finish("roughness"),
        clearcoat: finish("clearcoat"),
        clearcoat_roughness: finish("clearcoatRoughness"),
    }
    .sanitized();

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| paint.to_view().hex());

    Some(ColorPreset { name, paint, storage_index: 0 })
}

fn channels_from_array(value: &Value) -> Option<[f64; 4]> {
    let items = value.as_array()?;
    if items.len() < 3 {
        return None;
    }
    let mut out = [0.0, 0.0, 0.0, 1.0];
    for (slot, v) in out.iter_mut().zip(items) {
        *slot = json_number(v)?;
    }
    Some(out)
}

fn channels_from_object(value: &Value) -> Option<[f64; 4]> {
    let obj = value.as_object()?;
    let channel = |key: &str| obj.get(key).and_then(json_number);
    Some([channel("r")?, channel("g")?, channel("b")?, channel("a").unwrap_or(1.0)])
}

/// Minimal stored shape: `[{baseColor, metallic, roughness, clearcoat, clearcoatRoughness, name}]`.
pub fn serialize_for_storage(presets: &[ColorPreset]) -> Value {
    Value::Array(
        presets
            .iter()
            .map(|preset| {
                let mut entry = preset.paint.to_json();
                if let Value::Object(map) = &mut entry {
                    map.insert("name".to_string(), Value::String(preset.name.clone()));
                }
                entry
            })
            .collect(),
    )
}
