use std::time::{Duration, Instant};

use livery_engine::paint::{PaintSpec, PaintView};
use livery_engine::time::Deadline;

use super::codec::{ColorPreset, PresetUpdate, reindex, serialize_for_storage};
use crate::command::{Command, CommandSink};

/// The user's color presets plus the hold-to-delete gesture.
///
/// Holding a preset for `hold_duration` opens a remove dialog targeting a
/// copy of the preset taken at press time. Confirming only deletes when the
/// entry at the captured storage index is still that same preset; if the
/// list changed underneath, the dialog closes without deleting anything.
#[derive(Debug, Clone)]
pub struct PresetStore {
    presets: Vec<ColorPreset>,
    hold_duration: Duration,
    hold: Deadline,
    held: Option<ColorPreset>,
    remove_dialog: Option<ColorPreset>,
}

impl PresetStore {
    pub fn new(hold_duration: Duration) -> Self {
        Self {
            presets: Vec::new(),
            hold_duration,
            hold: Deadline::idle(),
            held: None,
            remove_dialog: None,
        }
    }

    #[inline]
    pub fn presets(&self) -> &[ColorPreset] {
        &self.presets
    }

    pub fn get(&self, storage_index: usize) -> Option<&ColorPreset> {
        storage_index.checked_sub(1).and_then(|i| self.presets.get(i))
    }

    /// Replaces the list wholesale and reassigns storage indices.
    pub fn replace(&mut self, mut presets: Vec<ColorPreset>) {
        reindex(&mut presets);
        log::debug!("preset list replaced ({} entries)", presets.len());
        self.presets = presets;
        self.revalidate_dialog();
    }

    /// Closes the remove dialog when its captured entry no longer matches.
    fn revalidate_dialog(&mut self) {
        let Some(target) = &self.remove_dialog else {
            return;
        };
        if !self.is_current(target) {
            log::debug!("closing remove dialog; preset {} changed", target.storage_index);
            self.remove_dialog = None;
        }
    }

    fn is_current(&self, target: &ColorPreset) -> bool {
        self.get(target.storage_index).is_some_and(|current| current.same_entry(target))
    }

    /// Applies a decoded update. Returns whether the list was replaced.
    pub fn apply_update(&mut self, update: PresetUpdate) -> bool {
        match update {
            PresetUpdate::Unchanged => false,
            PresetUpdate::Replace(list) => {
                self.replace(list);
                true
            }
        }
    }

    /// Appends a preset from an editor view and persists the list.
    ///
    /// A missing or blank name defaults to the color's hex code.
    pub fn add(&mut self, view: &PaintView, name: Option<&str>, sink: &mut impl CommandSink) -> &ColorPreset {
        let paint = PaintSpec::from_view(view);
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| view.hex());
        self.presets.push(ColorPreset { name, paint, storage_index: self.presets.len() + 1 });
        self.persist(sink);
        let idx = self.presets.len() - 1;
        &self.presets[idx]
    }

    /// Sends the serialized list to the settings store.
    pub fn persist(&self, sink: &mut impl CommandSink) {
        sink.send(Command::PersistPresets { json: serialize_for_storage(&self.presets).to_string() });
    }

    // ── hold to delete ────────────────────────────────────────────────────

    /// Starts the hold timer on a preset. Unknown indices are ignored.
    pub fn press(&mut self, storage_index: usize, now: Instant) -> bool {
        let Some(preset) = self.get(storage_index).cloned() else {
            return false;
        };
        self.held = Some(preset);
        self.hold.start(now, self.hold_duration);
        true
    }

    /// Pointer released or left before the hold completed.
    pub fn release(&mut self) {
        self.hold.cancel();
        self.held = None;
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        self.hold.is_armed()
    }

    /// Advances the hold timer. Returns `true` when the remove dialog opened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.hold.poll(now) {
            return false;
        }
        match self.held.take() {
            Some(preset) => {
                log::debug!("hold completed on preset {} ({})", preset.storage_index, preset.name);
                self.remove_dialog = Some(preset);
                true
            }
            None => false,
        }
    }

    /// Target of the open remove dialog.
    #[inline]
    pub fn remove_dialog(&self) -> Option<&ColorPreset> {
        self.remove_dialog.as_ref()
    }

    pub fn cancel_remove(&mut self) {
        self.remove_dialog = None;
    }

    /// Confirms the open remove dialog. Returns whether an entry was deleted.
    pub fn confirm_remove(&mut self, sink: &mut impl CommandSink) -> bool {
        let Some(target) = self.remove_dialog.take() else {
            return false;
        };
        if !self.is_current(&target) {
            log::debug!("preset {} changed since the hold began; not deleting", target.storage_index);
            return false;
        }
        self.presets.remove(target.storage_index - 1);
        reindex(&mut self.presets);
        self.persist(sink);
        true
    }
}
