//! Stdin line format.
//!
//! Each line is one JSON object, either a broadcast from the simulation:
//!
//! ```json
//! {"event": "VehiclePartsPaintingState", "data": {...}}
//! ```
//!
//! or a user action from the front end:
//!
//! ```json
//! {"action": "select", "partPath": "vehicle/hood"}
//! ```

use livery_engine::paint::PaintSpec;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Inbound {
    Event {
        event: String,
        #[serde(default)]
        data: Value,
    },
    Action(Action),
}

/// Which editor row a slot-addressed action touches.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Editor {
    #[default]
    Part,
    Base,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Open,
    Close,
    Refresh,
    Select { part_path: String },
    Hover { part_path: Option<String> },
    ShowAll,
    Filter { query: String },
    ToggleExpanded { part_path: String },
    ExpandAll,
    CollapseAll,
    /// Optional `paints` replaces the edited paints before applying.
    ApplyPaint { paints: Option<Vec<PaintSpec>> },
    ResetPaint,
    CopyFromVehicle { slot: usize },
    ApplyBasePaint { paints: Option<Vec<PaintSpec>> },
    ResetBasePaint,
    AddPreset {
        #[serde(default)]
        editor: Editor,
        slot: usize,
        name: Option<String>,
    },
    ApplyPreset {
        storage_index: usize,
        #[serde(default)]
        editor: Editor,
        slot: usize,
    },
    PressPreset { storage_index: usize },
    ReleasePreset,
    ConfirmRemovePreset,
    CancelRemovePreset,
    SaveConfig { name: String },
    SpawnConfig { relative_path: String },
    DeleteConfig { relative_path: String },
    ConfirmDeleteConfig,
    CancelDeleteConfig,
}

pub fn parse_line(line: &str) -> serde_json::Result<Inbound> {
    serde_json::from_str(line)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_events() {
        let line = r#"{"event":"SettingsChanged","data":{"values":{}}}"#;
        assert_eq!(
            parse_line(line).unwrap(),
            Inbound::Event { event: "SettingsChanged".into(), data: json!({ "values": {} }) }
        );
        let bare = r#"{"event":"VehiclePartsPaintingState"}"#;
        assert!(matches!(parse_line(bare).unwrap(), Inbound::Event { data: Value::Null, .. }));
    }

    #[test]
    fn parses_camel_case_actions() {
        assert_eq!(
            parse_line(r#"{"action":"select","partPath":"vehicle/hood"}"#).unwrap(),
            Inbound::Action(Action::Select { part_path: "vehicle/hood".into() })
        );
        assert_eq!(
            parse_line(r#"{"action":"hover","partPath":null}"#).unwrap(),
            Inbound::Action(Action::Hover { part_path: None })
        );
        assert_eq!(
            parse_line(r#"{"action":"applyPreset","storageIndex":2,"editor":"base","slot":1}"#).unwrap(),
            Inbound::Action(Action::ApplyPreset { storage_index: 2, editor: Editor::Base, slot: 1 })
        );
        assert_eq!(
            parse_line(r#"{"action":"addPreset","slot":0}"#).unwrap(),
            Inbound::Action(Action::AddPreset { editor: Editor::Part, slot: 0, name: None })
        );
        assert_eq!(
            parse_line(r#"{"action":"confirmRemovePreset"}"#).unwrap(),
            Inbound::Action(Action::ConfirmRemovePreset)
        );
    }

    #[test]
    fn paint_lists_decode_clamped() {
        let line = r#"{"action":"applyPaint","paints":[{"baseColor":[2,0,0,1],"metallic":-3},null]}"#;
        let Inbound::Action(Action::ApplyPaint { paints: Some(paints) }) = parse_line(line).unwrap() else {
            panic!("expected applyPaint with paints");
        };
        assert_eq!(paints, vec![PaintSpec::rgba(1.0, 0.0, 0.0, 1.0), PaintSpec::default()]);
        assert_eq!(
            parse_line(r#"{"action":"applyBasePaint"}"#).unwrap(),
            Inbound::Action(Action::ApplyBasePaint { paints: None })
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_line("not json").is_err());
        assert!(parse_line(r#"{"action":"launchRockets"}"#).is_err());
        assert!(parse_line(r#"{"action":"select"}"#).is_err());
    }
}
