//! Bridge backend: feeds parsed lines into the editor and drains the Lua it queues.

use std::time::Instant;

use livery_ui::{Command, EditorConfig, PaintEditor, PickerTarget};

use crate::protocol::{Action, Editor, Inbound, parse_line};

// ── Bridge ────────────────────────────────────────────────────────────────────

pub struct Bridge {
    editor: PaintEditor<Vec<Command>>,
}

impl Bridge {
    pub fn new(config: EditorConfig, now: Instant) -> Self {
        Self { editor: PaintEditor::new(config, Vec::new(), now) }
    }

    #[cfg(test)]
    pub fn editor(&self) -> &PaintEditor<Vec<Command>> {
        &self.editor
    }

    /// Handles one stdin line and returns the Lua chunks it produced.
    ///
    /// Malformed lines are logged and produce nothing.
    pub fn handle_line(&mut self, line: &str, now: Instant) -> Vec<String> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }
        match parse_line(line) {
            Ok(Inbound::Event { event, data }) => {
                if !self.editor.handle_event(&event, &data).is_consumed() {
                    log::debug!("ignoring broadcast {event}");
                }
            }
            Ok(Inbound::Action(action)) => self.dispatch(action, now),
            Err(err) => log::warn!("skipping malformed line: {err}"),
        }
        self.drain()
    }

    /// Advances editor timers and returns any Lua they produced.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        if self.editor.tick(now) {
            log::debug!("timers changed visible state");
        }
        self.drain()
    }

    fn drain(&mut self) -> Vec<String> {
        self.editor.sink_mut().drain(..).map(|c| c.to_lua()).collect()
    }

    fn dispatch(&mut self, action: Action, now: Instant) {
        let editor = &mut self.editor;
        let handled = match action {
            Action::Open => {
                editor.open();
                true
            }
            Action::Close => {
                editor.close();
                true
            }
            Action::Refresh => {
                editor.refresh();
                true
            }
            Action::Select { part_path } => editor.select_part(&part_path),
            Action::Hover { part_path } => {
                editor.hover_part(part_path.as_deref());
                true
            }
            Action::ShowAll => {
                editor.show_all_parts();
                true
            }
            Action::Filter { query } => {
                editor.set_filter(&query);
                true
            }
            Action::ToggleExpanded { part_path } => editor.toggle_expanded(&part_path),
            Action::ExpandAll => editor.expand_all(),
            Action::CollapseAll => editor.collapse_all(),
            Action::ApplyPaint { paints } => {
                if let Some(paints) = paints {
                    editor.set_edited_paints(&paints);
                }
                editor.apply_paint()
            }
            Action::ResetPaint => editor.reset_paint(),
            Action::CopyFromVehicle { slot } => editor.copy_from_vehicle(slot),
            Action::ApplyBasePaint { paints } => {
                if let Some(paints) = paints {
                    editor.set_base_editors(&paints);
                }
                editor.apply_base_editors()
            }
            Action::ResetBasePaint => {
                editor.reset_base_editors();
                true
            }
            Action::AddPreset { editor: which, slot, name } => {
                editor.add_preset(target(which, slot), name.as_deref()).is_some()
            }
            Action::ApplyPreset { storage_index, editor: which, slot } => {
                editor.apply_preset(storage_index, target(which, slot))
            }
            Action::PressPreset { storage_index } => editor.press_preset(storage_index, now),
            Action::ReleasePreset => {
                editor.release_preset();
                true
            }
            Action::ConfirmRemovePreset => editor.confirm_remove_preset(),
            Action::CancelRemovePreset => {
                editor.cancel_remove_preset();
                true
            }
            Action::SaveConfig { name } => editor.save_config(&name),
            Action::SpawnConfig { relative_path } => editor.spawn_config(&relative_path),
            Action::DeleteConfig { relative_path } => editor.prompt_delete_config(&relative_path),
            Action::ConfirmDeleteConfig => editor.confirm_delete_config(),
            Action::CancelDeleteConfig => {
                editor.cancel_delete_config();
                true
            }
        };
        if !handled {
            log::debug!("action had no effect");
        }
    }
}

fn target(editor: Editor, slot: usize) -> PickerTarget {
    match editor {
        Editor::Part => PickerTarget::Part(slot),
        Editor::Base => PickerTarget::Base(slot),
    }
}
