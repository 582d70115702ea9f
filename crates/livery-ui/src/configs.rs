use std::cmp::Ordering;

use serde_json::Value;

use crate::command::{Command, CommandSink};
use crate::error::DecodeError;

/// One saved vehicle configuration as listed by the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedConfig {
    pub name: String,
    pub relative_path: String,
    pub preview_image: String,
    pub player: bool,
    /// Legacy `isUserConfig` flag.
    pub user_config: bool,
    /// `Some(false)` forbids deletion regardless of the other flags.
    pub allow_delete: Option<bool>,
}

impl SavedConfig {
    /// Decodes one list entry. Entries without a relative path are unusable.
    pub fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let relative_path = obj.get("relativePath").and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())?;
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty());

        let name = text("displayName")
            .or_else(|| text("name"))
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(relative_path).to_string());

        Some(Self {
            name,
            relative_path: relative_path.to_string(),
            preview_image: text("previewImage").unwrap_or_default().to_string(),
            player: obj.get("player").is_some_and(truthy),
            user_config: obj.get("isUserConfig").is_some_and(truthy),
            allow_delete: obj.get("allowDelete").and_then(Value::as_bool),
        })
    }

    pub fn can_delete(&self) -> bool {
        if self.allow_delete == Some(false) {
            return false;
        }
        self.player || self.user_config
    }

    /// Root-relative resource URL for the preview, without any `local/` prefix.
    pub fn preview_src(&self) -> Option<String> {
        let path = self.preview_image.trim().trim_start_matches('/');
        let path = path.strip_prefix("local/").unwrap_or(path);
        if path.is_empty() { None } else { Some(format!("/{path}")) }
    }

    #[inline]
    pub fn has_preview(&self) -> bool {
        self.preview_src().is_some()
    }
}

fn file_stem(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}

/// Loose truthiness used by the configuration flags.
///
/// Booleans as-is, numbers when non-zero, strings unless blank or one of
/// `false`/`0`/`no`/`off` (any case).
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            !matches!(s.as_str(), "" | "false" | "0" | "no" | "off")
        }
        _ => false,
    }
}

// ── list + delete dialog ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteDialog {
    /// Copy of the configuration taken when the dialog opened.
    pub config: Option<SavedConfig>,
    pub deleting: bool,
}

impl DeleteDialog {
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.config.is_some()
    }
}

/// Saved configurations for the current vehicle.
#[derive(Debug, Clone, Default)]
pub struct SavedConfigs {
    vehicle_id: Option<String>,
    configs: Vec<SavedConfig>,
    dialog: DeleteDialog,
}

impl SavedConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn configs(&self) -> &[SavedConfig] {
        &self.configs
    }

    #[inline]
    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    #[inline]
    pub fn dialog(&self) -> &DeleteDialog {
        &self.dialog
    }

    /// Applies a `VehiclePartsPaintingSavedConfigs` payload.
    ///
    /// The list is replaced and sorted by name (case-insensitive). An open
    /// delete dialog whose target is gone is closed.
    pub fn apply_json(&mut self, value: &Value) -> Result<(), DecodeError> {
        let obj = value
            .as_object()
            .ok_or_else(|| DecodeError::new("saved configurations", "payload is not an object"))?;
        let raw = match obj.get("configs") {
            Some(Value::Array(items)) => items.as_slice(),
            None | Some(Value::Null) => &[],
            Some(_) => return Err(DecodeError::new("saved configurations", "configs is not an array")),
        };

        let mut configs: Vec<SavedConfig> = raw.iter().filter_map(SavedConfig::from_json).collect();
        if configs.len() != raw.len() {
            log::warn!("dropped {} saved configurations without a path", raw.len() - configs.len());
        }
        configs.sort_by(compare_names);

        self.vehicle_id = match obj.get("vehicleId") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        self.configs = configs;
        self.revalidate_dialog();
        Ok(())
    }

    fn revalidate_dialog(&mut self) {
        let Some(target) = &self.dialog.config else {
            return;
        };
        if !self.configs.iter().any(|c| c.relative_path == target.relative_path) {
            log::debug!("closing delete dialog; {} is gone", target.relative_path);
            self.dialog = DeleteDialog::default();
        }
    }

    pub fn find(&self, relative_path: &str) -> Option<&SavedConfig> {
        self.configs.iter().find(|c| c.relative_path == relative_path)
    }

    /// Opens the delete dialog. Non-deletable configurations are ignored.
    pub fn prompt_delete(&mut self, config: &SavedConfig) -> bool {
        if !config.can_delete() {
            return false;
        }
        self.dialog = DeleteDialog { config: Some(config.clone()), deleting: false };
        true
    }

    pub fn cancel_delete(&mut self) {
        self.dialog = DeleteDialog::default();
    }

    /// Sends the delete command. The dialog stays open, marked as deleting,
    /// until the next list update drops the entry.
    pub fn confirm_delete(&mut self, sink: &mut impl CommandSink) -> bool {
        if self.dialog.deleting {
            return false;
        }
        let Some(target) = &self.dialog.config else {
            return false;
        };
        sink.send(Command::DeleteConfig { relative_path: target.relative_path.clone() });
        self.dialog.deleting = true;
        true
    }
}

fn compare_names(a: &SavedConfig, b: &SavedConfig) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.relative_path.cmp(&b.relative_path))
}

/// Saves the current vehicle under `name`. Blank names are rejected.
pub fn save_config(name: &str, sink: &mut impl CommandSink) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    sink.send(Command::SaveConfig { name: name.to_string() });
    true
}

pub fn spawn_config(relative_path: &str, sink: &mut impl CommandSink) -> bool {
    let path = relative_path.trim();
    if path.is_empty() {
        return false;
    }
    sink.send(Command::SpawnConfig { relative_path: path.to_string() });
    true
}
