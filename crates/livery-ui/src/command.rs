use livery_engine::paint::PaintSpec;
use serde_json::{Value, json};

/// Name of the simulation extension that receives part-painting commands.
pub const EXTENSION: &str = "freeroam_vehiclePartsPainting";

/// One-way instruction for the simulation backend or the settings store.
///
/// Commands are fire-and-forget: nothing waits for an answer, and the next
/// state broadcast reconciles whatever the backend actually did.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Unconditional `extensions.load`, used after a world reload.
    LoadExtension,
    Open,
    Close,
    RequestState,
    RequestSavedConfigs,
    ApplyPartPaint {
        part_path: String,
        part_name: String,
        slot_path: String,
        paints: Vec<PaintSpec>,
    },
    ResetPartPaint { part_path: String },
    SetBasePaints { paints: Vec<PaintSpec> },
    HighlightPart { part_path: String },
    ShowAllParts,
    SaveConfig { name: String },
    SpawnConfig { relative_path: String },
    DeleteConfig { relative_path: String },
    /// Serialized preset list for the settings store.
    PersistPresets { json: String },
}

/// Destination for outbound commands.
pub trait CommandSink {
    fn send(&mut self, command: Command);
}

/// Records commands in order; hosts drain it, tests assert on it.
impl CommandSink for Vec<Command> {
    fn send(&mut self, command: Command) {
        self.push(command);
    }
}

impl Command {
    /// Lua chunk the simulation executes for this command.
    ///
    /// Extension calls are wrapped so they load the extension on demand and do
    /// nothing when it is still unavailable.
    pub fn to_lua(&self) -> String {
        match self {
            Command::PersistPresets { json } => {
                format!("settings.setState({{ userPaintPresets = {} }})", lua_string(json))
            }
            Command::LoadExtension => format!("extensions.load(\"{EXTENSION}\")"),
            _ => self.extension_call().map(|call| guarded(&call)).unwrap_or_default(),
        }
    }

    fn extension_call(&self) -> Option<String> {
        let call = |func: &str, arg: Option<String>| format!("{EXTENSION}.{func}({})", arg.unwrap_or_default());
        let lua = match self {
            Command::Open => call("open", None),
            Command::Close => call("close", None),
            Command::RequestState => call("requestState", None),
            Command::RequestSavedConfigs => call("requestSavedConfigs", None),
            Command::ApplyPartPaint { part_path, part_name, slot_path, paints } => {
                let payload = json!({
                    "partPath": part_path,
                    "partName": part_name,
                    "slotPath": slot_path,
                    "paints": PaintSpec::list_to_json(paints),
                });
                call("applyPartPaintJson", Some(lua_string(&payload.to_string())))
            }
            Command::ResetPartPaint { part_path } => call("resetPartPaint", Some(lua_string(part_path))),
            Command::SetBasePaints { paints } => {
                let payload: Value = PaintSpec::list_to_json(paints);
                call("setVehicleBasePaintsJson", Some(lua_string(&payload.to_string())))
            }
            Command::HighlightPart { part_path } => call("highlightPart", Some(lua_string(part_path))),
            Command::ShowAllParts => call("showAllParts", None),
            Command::SaveConfig { name } => call("saveCurrentConfiguration", Some(lua_string(name))),
            Command::SpawnConfig { relative_path } => {
                call("spawnSavedConfiguration", Some(lua_string(relative_path)))
            }
            Command::DeleteConfig { relative_path } => {
                call("deleteSavedConfiguration", Some(lua_string(relative_path)))
            }
            Command::PersistPresets { .. } | Command::LoadExtension => return None,
        };
        Some(lua)
    }
}

fn guarded(body: &str) -> String {
    format!(
        "(function() local available = {EXTENSION} ~= nil \
         if not available then extensions.load(\"{EXTENSION}\") available = {EXTENSION} ~= nil end \
         if available then {body} end end)()"
    )
}

/// Single-quoted Lua string literal.
pub fn lua_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
