use std::collections::HashSet;
use std::time::Instant;

use livery_engine::coords::{Rect, Vec2};
use livery_engine::input::PointerEvent;
use livery_engine::paint::{PaintSpec, PaintView, editor_slots, views_equal, views_to_paints};
use livery_engine::time::Interval;
use livery_slots::{FilteredNode, Forest};
use serde_json::Value;

use crate::command::{Command, CommandSink};
use crate::config::EditorConfig;
use crate::configs::{SavedConfigs, save_config, spawn_config};
use crate::error::DecodeError;
use crate::event::{EventResult, InboundEvent, WORLD_READY};
use crate::filter::FilterState;
use crate::part::{Part, Snapshot};
use crate::picker::{DragTarget, HsvPicker};
use crate::presets::{ColorPreset, PresetStore, PresetUpdate};
use crate::sync::PaintSync;

/// Which paint slot an open picker edits.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PickerTarget {
    /// Slot of the selected part's edited paints.
    Part(usize),
    /// Slot of the base paint editors.
    Base(usize),
}

/// One visible line of the part tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    /// Index into [`PaintEditor::parts`].
    pub part: usize,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    /// Whether the part itself matched the active filter (always true
    /// when no filter is active).
    pub matched: bool,
}

// ── PaintEditor ───────────────────────────────────────────────────────────

/// Editor state for one painting session.
///
/// Owns every sub-model and the outbound [`CommandSink`]. Hosts feed it
/// broadcasts ([`handle_event`](Self::handle_event)), user actions (the
/// remaining `pub fn`s) and the clock ([`tick`](Self::tick)).
pub struct PaintEditor<S: CommandSink> {
    config: EditorConfig,
    sync: PaintSync,
    filter: FilterState,
    presets: PresetStore,
    picker: Option<(PickerTarget, HsvPicker)>,
    configs: SavedConfigs,

    selection: Option<String>,
    hovered: Option<String>,
    highlight_suspended: bool,
    expanded: HashSet<String>,
    edited: Vec<PaintView>,
    base_editors: Vec<PaintView>,
    base_paint_collapsed: bool,
    /// Last reported world state; `None` until the first world broadcast.
    world_state: Option<i64>,

    badge_refresh: Interval,
    sink: S,
}

impl<S: CommandSink> PaintEditor<S> {
    pub fn new(config: EditorConfig, sink: S, now: Instant) -> Self {
        Self {
            badge_refresh: Interval::new(config.badge_refresh_interval, now),
            presets: PresetStore::new(config.preset_hold_duration),
            sync: PaintSync::new(),
            filter: FilterState::new(),
            picker: None,
            configs: SavedConfigs::new(),
            selection: None,
            hovered: None,
            highlight_suspended: false,
            expanded: HashSet::new(),
            edited: Vec::new(),
            base_editors: Vec::new(),
            base_paint_collapsed: false,
            world_state: None,
            config,
            sink,
        }
    }

    /// Loads the extension and asks for the first state and config list.
    pub fn open(&mut self) {
        self.sink.send(Command::Open);
        self.sink.send(Command::RequestState);
        self.sink.send(Command::RequestSavedConfigs);
    }

    /// Leaves the vehicle fully visible and tells the extension we are gone.
    pub fn close(&mut self) {
        self.picker = None;
        self.sink.send(Command::ShowAllParts);
        self.sink.send(Command::Close);
    }

    pub fn refresh(&mut self) {
        self.sink.send(Command::RequestState);
        self.sink.send(Command::RequestSavedConfigs);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn sync(&self) -> &PaintSync {
        &self.sync
    }

    #[inline]
    pub fn parts(&self) -> &[Part] {
        self.sync.parts()
    }

    #[inline]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[inline]
    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    #[inline]
    pub fn saved_configs(&self) -> &SavedConfigs {
        &self.configs
    }

    #[inline]
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_part(&self) -> Option<&Part> {
        self.selection.as_deref().and_then(|p| self.sync.part(p))
    }

    #[inline]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    #[inline]
    pub fn is_highlight_suspended(&self) -> bool {
        self.highlight_suspended
    }

    #[inline]
    pub fn edited_paints(&self) -> &[PaintView] {
        &self.edited
    }

    pub fn edited_paints_mut(&mut self) -> &mut [PaintView] {
        &mut self.edited
    }

    #[inline]
    pub fn base_editors(&self) -> &[PaintView] {
        &self.base_editors
    }

    pub fn base_editors_mut(&mut self) -> &mut [PaintView] {
        &mut self.base_editors
    }

    pub fn has_custom_badge(&self, part_path: &str) -> bool {
        self.sync.part(part_path).is_some_and(|p| p.has_custom_paint)
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ── inbound ───────────────────────────────────────────────────────────

    /// Routes a named broadcast. Decode failures are logged and leave the
    /// editor untouched.
    pub fn handle_event(&mut self, name: &str, data: &Value) -> EventResult {
        match InboundEvent::parse(name, data) {
            Ok(Some(InboundEvent::State(snapshot))) => self.handle_snapshot(snapshot),
            Ok(Some(InboundEvent::SavedConfigs(payload))) => {
                if let Err(err) = self.handle_saved_configs(&payload) {
                    log::warn!("{err}; keeping saved configurations");
                }
            }
            Ok(Some(InboundEvent::SettingsChanged(update))) => self.handle_settings_changed(update),
            Ok(Some(InboundEvent::WorldReady { state, forced })) => {
                self.handle_world_ready(state, forced);
            }
            Ok(None) => return EventResult::Ignored,
            Err(err) => log::warn!("{name}: {err}; keeping current state"),
        }
        EventResult::Consumed
    }

    /// Reconciles with an authoritative vehicle state.
    pub fn handle_snapshot(&mut self, mut snapshot: Snapshot) {
        let presets = std::mem::replace(&mut snapshot.presets, PresetUpdate::Unchanged);
        self.presets.apply_update(presets);

        let outcome = self.sync.apply_snapshot(snapshot);
        if outcome.vehicle_changed {
            self.selection = None;
            self.filter.clear();
            self.highlight_suspended = false;
            self.hovered = None;
            self.picker = None;
            self.expanded.clear();
            self.expand_all_nodes();
        }

        let kept = self.selection.take().filter(|p| self.sync.part(p).is_some());
        self.selection = match kept {
            Some(path) => Some(path),
            None => {
                self.highlight_suspended = false;
                self.sync.parts().first().map(|p| p.part_path.clone())
            }
        };

        self.load_edited_paints();
        self.reset_base_editors_to_current();
        self.recompute_filter();

        match self.selection.clone() {
            Some(path) if !self.highlight_suspended => self.highlight(&path),
            Some(_) => {}
            None => self.sink.send(Command::ShowAllParts),
        }
    }

    pub fn handle_saved_configs(&mut self, payload: &Value) -> Result<(), DecodeError> {
        self.configs.apply_json(payload)
    }

    /// A settings change is authoritative for presets, including an empty list.
    pub fn handle_settings_changed(&mut self, update: PresetUpdate) {
        self.presets.apply_update(update);
    }

    /// Reloads the extension and re-syncs when the world becomes ready.
    ///
    /// A repeated ready notification is ignored unless `forced`. Returns
    /// whether commands were sent.
    pub fn handle_world_ready(&mut self, state: i64, forced: bool) -> bool {
        let previous = self.world_state.replace(state);
        if state != WORLD_READY || (!forced && previous == Some(WORLD_READY)) {
            return false;
        }
        log::info!("world ready (previous state {previous:?}); reloading extension");
        self.sink.send(Command::LoadExtension);
        self.open();
        true
    }

    #[inline]
    pub fn world_state(&self) -> Option<i64> {
        self.world_state
    }

    // ── selection & highlight ─────────────────────────────────────────────

    pub fn select_part(&mut self, part_path: &str) -> bool {
        if self.sync.part(part_path).is_none() {
            log::warn!("select: unknown part {part_path}");
            return false;
        }
        self.highlight_suspended = false;
        self.selection = Some(part_path.to_string());
        self.picker = None;
        self.load_edited_paints();
        self.highlight(part_path);
        true
    }

    /// Makes every part visible until the next selection.
    pub fn show_all_parts(&mut self) {
        self.highlight_suspended = true;
        self.sink.send(Command::ShowAllParts);
    }

    pub fn hover_part(&mut self, part_path: Option<&str>) {
        match part_path.filter(|p| self.sync.part(p).is_some()) {
            Some(path) => {
                if self.hovered.as_deref() == Some(path) {
                    return;
                }
                self.hovered = Some(path.to_string());
                if self.config.highlight_on_select {
                    self.sink.send(Command::HighlightPart { part_path: path.to_string() });
                }
            }
            None => {
                if self.hovered.take().is_none() {
                    return;
                }
                match self.selection.clone() {
                    Some(path) if !self.highlight_suspended => self.highlight(&path),
                    _ => self.sink.send(Command::ShowAllParts),
                }
            }
        }
    }

    fn highlight(&mut self, part_path: &str) {
        if self.highlight_suspended || !self.config.highlight_on_select {
            return;
        }
        self.sink.send(Command::HighlightPart { part_path: part_path.to_string() });
    }

    // ── tree view ─────────────────────────────────────────────────────────

    pub fn set_filter(&mut self, query: &str) {
        self.filter.set_query(query);
        self.recompute_filter();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    fn recompute_filter(&mut self) {
        let (parts, forest) = self.sync.parts_and_forest();
        self.filter.recompute(forest, parts);
    }

    /// Expand/collapse is meaningless while the filter shows a pruned tree.
    #[inline]
    pub fn tree_controls_disabled(&self) -> bool {
        self.filter.is_active()
    }

    pub fn is_expanded(&self, part_path: &str) -> bool {
        self.expanded.contains(part_path)
    }

    pub fn toggle_expanded(&mut self, part_path: &str) -> bool {
        if self.tree_controls_disabled() || self.sync.part(part_path).is_none() {
            return false;
        }
        if !self.expanded.remove(part_path) {
            self.expanded.insert(part_path.to_string());
        }
        true
    }

    pub fn expand_all(&mut self) -> bool {
        if self.tree_controls_disabled() {
            return false;
        }
        self.expand_all_nodes();
        true
    }

    pub fn collapse_all(&mut self) -> bool {
        if self.tree_controls_disabled() {
            return false;
        }
        self.expanded.clear();
        true
    }

    fn expand_all_nodes(&mut self) {
        let (parts, forest) = self.sync.parts_and_forest();
        let with_children: Vec<String> = forest
            .walk()
            .into_iter()
            .filter(|(id, _)| !forest.children(*id).is_empty())
            .map(|(id, _)| parts[id.index()].part_path.clone())
            .collect();
        self.expanded.extend(with_children);
    }

    /// Rows to draw, in order.
    ///
    /// With an active filter every kept node is shown; otherwise children
    /// appear only under expanded parents.
    pub fn visible_rows(&mut self) -> Vec<TreeRow> {
        let filtering = self.filter.is_active();
        let expanded = &self.expanded;
        let (parts, forest) = self.sync.parts_and_forest();
        let mut rows = Vec::new();
        for node in self.filter.tree() {
            push_rows(node, 0, forest, parts, expanded, filtering, &mut rows);
        }
        rows
    }

    // ── paint editing ─────────────────────────────────────────────────────

    fn load_edited_paints(&mut self) {
        self.edited = match self.selected_part() {
            Some(part) => editor_slots(&part.current_paints, self.sync.base_paints(), self.config.paint_slots),
            None => Vec::new(),
        };
    }

    /// Replaces the edited paints, padded to the configured slot count.
    pub fn set_edited_paints(&mut self, paints: &[PaintSpec]) {
        self.edited = editor_slots(paints, self.sync.base_paints(), self.config.paint_slots);
    }

    /// Copies a base paint slot (or the last one) into an edited slot.
    pub fn copy_from_vehicle(&mut self, slot: usize) -> bool {
        let base = self.sync.base_paints();
        let Some(paint) = base.get(slot).or_else(|| base.last()) else {
            return false;
        };
        let view = paint.to_view();
        match self.edited.get_mut(slot) {
            Some(target) => {
                *target = view;
                true
            }
            None => false,
        }
    }

    /// Sends the edited paints for the selected part.
    pub fn apply_paint(&mut self) -> bool {
        let Some(path) = self.selection.clone() else {
            return false;
        };
        if self.edited.is_empty() {
            return false;
        }
        let paints = views_to_paints(&self.edited);
        self.sync.apply_paint(&path, paints, &mut self.sink)
    }

    pub fn reset_paint(&mut self) -> bool {
        let Some(path) = self.selection.clone() else {
            return false;
        };
        let reset = self.sync.reset_paint(&path, &mut self.sink);
        if reset {
            self.load_edited_paints();
        }
        reset
    }

    // ── base paint ────────────────────────────────────────────────────────

    fn reset_base_editors_to_current(&mut self) {
        self.base_editors = editor_slots(self.sync.base_paints(), &[], self.config.paint_slots);
    }

    /// Whether the base editors differ from the vehicle's current base paint.
    pub fn has_base_paint_changes(&self) -> bool {
        let current = editor_slots(self.sync.base_paints(), &[], self.config.paint_slots);
        !views_equal(&self.base_editors, &current)
    }

    pub fn set_base_editors(&mut self, paints: &[PaintSpec]) {
        self.base_editors = editor_slots(paints, self.sync.base_paints(), self.config.paint_slots);
    }

    /// Loads the vehicle's original base paint into the editors.
    pub fn reset_base_editors(&mut self) {
        self.base_editors = editor_slots(self.sync.original_base_paints(), &[], self.config.paint_slots);
    }

    pub fn apply_base_editors(&mut self) -> bool {
        if self.base_editors.is_empty() {
            return false;
        }
        let paints = views_to_paints(&self.base_editors);
        let applied = self.sync.apply_base_paint(paints, &mut self.sink);
        if applied {
            self.load_edited_paints();
        }
        applied
    }

    #[inline]
    pub fn is_base_paint_collapsed(&self) -> bool {
        self.base_paint_collapsed
    }

    pub fn toggle_base_paint_collapsed(&mut self) {
        self.base_paint_collapsed = !self.base_paint_collapsed;
    }

    // ── presets ───────────────────────────────────────────────────────────

    fn slot_view(&self, target: PickerTarget) -> Option<PaintView> {
        match target {
            PickerTarget::Part(i) => self.edited.get(i).copied(),
            PickerTarget::Base(i) => self.base_editors.get(i).copied(),
        }
    }

    fn slot_view_mut(&mut self, target: PickerTarget) -> Option<&mut PaintView> {
        match target {
            PickerTarget::Part(i) => self.edited.get_mut(i),
            PickerTarget::Base(i) => self.base_editors.get_mut(i),
        }
    }

    /// Stores the paint in `target` as a new preset.
    pub fn add_preset(&mut self, target: PickerTarget, name: Option<&str>) -> Option<&ColorPreset> {
        let view = self.slot_view(target)?;
        Some(self.presets.add(&view, name, &mut self.sink))
    }

    /// Copies a preset into an editor slot.
    pub fn apply_preset(&mut self, storage_index: usize, target: PickerTarget) -> bool {
        let Some(view) = self.presets.get(storage_index).map(|p| p.paint.to_view()) else {
            return false;
        };
        match self.slot_view_mut(target) {
            Some(slot) => {
                *slot = view;
                true
            }
            None => false,
        }
    }

    pub fn press_preset(&mut self, storage_index: usize, now: Instant) -> bool {
        self.presets.press(storage_index, now)
    }

    pub fn release_preset(&mut self) {
        self.presets.release();
    }

    pub fn confirm_remove_preset(&mut self) -> bool {
        self.presets.confirm_remove(&mut self.sink)
    }

    pub fn cancel_remove_preset(&mut self) {
        self.presets.cancel_remove();
    }

    // ── picker ────────────────────────────────────────────────────────────

    pub fn open_picker(&mut self, target: PickerTarget) -> bool {
        let Some(view) = self.slot_view(target) else {
            return false;
        };
        self.picker = Some((target, HsvPicker::open(view)));
        true
    }

    pub fn picker(&self) -> Option<(PickerTarget, &HsvPicker)> {
        self.picker.as_ref().map(|(t, p)| (*t, p))
    }

    pub fn picker_mut(&mut self) -> Option<&mut HsvPicker> {
        self.picker.as_mut().map(|(_, p)| p)
    }

    pub fn begin_picker_drag(&mut self, target: DragTarget, bounds: Rect, position: Vec2) -> bool {
        self.picker_mut().is_some_and(|p| p.begin_drag(target, bounds, position))
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventResult {
        match self.picker_mut() {
            Some(picker) => picker.handle_pointer(event),
            None => EventResult::Ignored,
        }
    }

    /// Writes the picker's working copy back into its slot.
    pub fn commit_picker(&mut self) -> bool {
        let Some((target, picker)) = self.picker.take() else {
            return false;
        };
        let view = picker.commit();
        match self.slot_view_mut(target) {
            Some(slot) => {
                *slot = view;
                true
            }
            None => false,
        }
    }

    pub fn cancel_picker(&mut self) {
        if let Some((_, picker)) = self.picker.take() {
            picker.cancel();
        }
    }

    // ── saved configurations ──────────────────────────────────────────────

    pub fn save_config(&mut self, name: &str) -> bool {
        save_config(name, &mut self.sink)
    }

    pub fn spawn_config(&mut self, relative_path: &str) -> bool {
        spawn_config(relative_path, &mut self.sink)
    }

    pub fn prompt_delete_config(&mut self, relative_path: &str) -> bool {
        let Some(config) = self.configs.find(relative_path).cloned() else {
            return false;
        };
        self.configs.prompt_delete(&config)
    }

    pub fn cancel_delete_config(&mut self) {
        self.configs.cancel_delete();
    }

    pub fn confirm_delete_config(&mut self) -> bool {
        self.configs.confirm_delete(&mut self.sink)
    }

    // ── timers ────────────────────────────────────────────────────────────

    /// Advances the badge refresh and the preset hold. Returns whether
    /// anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.badge_refresh.poll(now) {
            let flipped = self.sync.refresh_custom_badges();
            if flipped > 0 {
                log::debug!("badge refresh flipped {flipped} parts");
                changed = true;
            }
        }
        if self.presets.tick(now) {
            changed = true;
        }
        changed
    }
}

fn push_rows(
    node: &FilteredNode,
    depth: usize,
    forest: &Forest,
    parts: &[Part],
    expanded: &HashSet<String>,
    filtering: bool,
    rows: &mut Vec<TreeRow>,
) {
    let part = node.node.index();
    let has_children = !node.children.is_empty() || !forest.children(node.node).is_empty();
    let open = filtering || expanded.contains(&parts[part].part_path);
    rows.push(TreeRow { part, depth, has_children, expanded: open, matched: node.matched });
    if open {
        for child in &node.children {
            push_rows(child, depth + 1, forest, parts, expanded, filtering, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use livery_engine::paint::Rgb8;
    use serde_json::json;

    use super::*;
    use crate::event::{SAVED_CONFIGS_EVENT, SETTINGS_EVENT, STATE_EVENT, WORLD_READY_EVENT, WORLD_STATE_EVENT};

    fn red() -> Value {
        json!({ "baseColor": [1, 0, 0, 1], "metallic": 0, "roughness": 0, "clearcoat": 0, "clearcoatRoughness": 0 })
    }

    fn state() -> Value {
        let part = |path: &str, slot: &str| json!({ "partPath": path, "slotPath": slot, "currentPaints": [red(), red(), red()] });
        json!({
            "vehicleId": 4242,
            "basePaints": [red(), red(), red()],
            "parts": [
                part("vehicle/root", "body"),
                part("vehicle/hood", "body/hood"),
                part("vehicle/door", "body/door"),
                { "partPath": "vehicle/front_bumper", "slotPath": "body/front_bumper", "displayName": "Front Bumper",
                  "currentPaints": [red(), red(), red()] },
                part("vehicle/steering_wheel", "interior/steering_wheel"),
            ],
        })
    }

    fn editor() -> (PaintEditor<Vec<Command>>, Instant) {
        let t0 = Instant::now();
        let mut editor = PaintEditor::new(EditorConfig::default(), Vec::new(), t0);
        editor.handle_event(STATE_EVENT, &state());
        editor.sink_mut().clear();
        (editor, t0)
    }

    fn paths(editor: &mut PaintEditor<Vec<Command>>) -> Vec<String> {
        let rows = editor.visible_rows();
        rows.iter().map(|r| editor.parts()[r.part].part_path.clone()).collect()
    }

    #[test]
    fn open_requests_state_and_configs() {
        let mut editor = PaintEditor::new(EditorConfig::default(), Vec::new(), Instant::now());
        editor.open();
        assert_eq!(*editor.sink(), vec![Command::Open, Command::RequestState, Command::RequestSavedConfigs]);
    }

    #[test]
    fn world_ready_reloads_and_resyncs_once() {
        let (mut editor, _) = editor();
        let resync = vec![Command::LoadExtension, Command::Open, Command::RequestState, Command::RequestSavedConfigs];

        let ready = json!({ "worldReadyState": 1, "previousState": 0 });
        assert!(editor.handle_event(WORLD_READY_EVENT, &ready).is_consumed());
        assert_eq!(editor.world_state(), Some(1));
        assert_eq!(*editor.sink(), resync);

        editor.sink_mut().clear();
        editor.handle_event(WORLD_READY_EVENT, &json!({ "worldReadyState": 1 }));
        assert!(editor.sink().is_empty());

        editor.handle_event(WORLD_STATE_EVENT, &json!({ "state": 1 }));
        assert_eq!(*editor.sink(), resync);
    }

    #[test]
    fn world_loading_then_ready_resyncs_again() {
        let (mut editor, _) = editor();
        assert!(!editor.handle_world_ready(0, false));
        assert!(editor.sink().is_empty());
        assert!(editor.handle_world_ready(1, false));
        assert!(!editor.handle_world_ready(1, false));
        assert!(!editor.handle_world_ready(2, false));
        assert!(editor.handle_world_ready(1, false));
        assert_eq!(editor.sink().iter().filter(|c| **c == Command::LoadExtension).count(), 2);
    }

    #[test]
    fn first_snapshot_selects_first_part_and_highlights_it() {
        let mut editor = PaintEditor::new(EditorConfig::default(), Vec::new(), Instant::now());
        editor.handle_event(STATE_EVENT, &state());
        assert_eq!(editor.selection(), Some("vehicle/root"));
        assert_eq!(editor.edited_paints().len(), 3);
        assert_eq!(editor.base_editors().len(), 3);
        assert!(!editor.has_base_paint_changes());
        assert_eq!(*editor.sink(), vec![Command::HighlightPart { part_path: "vehicle/root".into() }]);
    }

    #[test]
    fn unknown_event_is_ignored_and_bad_state_keeps_parts() {
        let (mut editor, _) = editor();
        assert_eq!(editor.handle_event("Other", &json!({})), EventResult::Ignored);
        assert!(editor.handle_event(STATE_EVENT, &json!({ "parts": "broken" })).is_consumed());
        assert_eq!(editor.parts().len(), 5);
        assert!(editor.sink().is_empty());
    }

    #[test]
    fn selection_survives_snapshot_and_falls_back_when_part_vanishes() {
        let (mut editor, _) = editor();
        assert!(editor.select_part("vehicle/door"));
        editor.handle_event(STATE_EVENT, &state());
        assert_eq!(editor.selection(), Some("vehicle/door"));

        let mut next = state();
        next["parts"].as_array_mut().unwrap().retain(|p| p["partPath"] != "vehicle/door");
        editor.handle_event(STATE_EVENT, &next);
        assert_eq!(editor.selection(), Some("vehicle/root"));

        editor.sink_mut().clear();
        editor.handle_event(STATE_EVENT, &json!({ "vehicleId": 4242, "parts": [] }));
        assert_eq!(editor.selection(), None);
        assert!(editor.edited_paints().is_empty());
        assert_eq!(*editor.sink(), vec![Command::ShowAllParts]);
    }

    #[test]
    fn show_all_suspends_highlight_until_next_selection() {
        let (mut editor, _) = editor();
        editor.show_all_parts();
        editor.handle_event(STATE_EVENT, &state());
        assert_eq!(*editor.sink(), vec![Command::ShowAllParts]);
        assert!(editor.is_highlight_suspended());

        editor.select_part("vehicle/hood");
        assert!(!editor.is_highlight_suspended());
        assert_eq!(editor.sink().last(), Some(&Command::HighlightPart { part_path: "vehicle/hood".into() }));
    }

    #[test]
    fn hover_highlights_then_restores_selection() {
        let (mut editor, _) = editor();
        editor.hover_part(Some("vehicle/door"));
        editor.hover_part(Some("vehicle/door"));
        editor.hover_part(None);
        assert_eq!(
            *editor.sink(),
            vec![
                Command::HighlightPart { part_path: "vehicle/door".into() },
                Command::HighlightPart { part_path: "vehicle/root".into() },
            ]
        );
        editor.sink_mut().clear();
        editor.show_all_parts();
        editor.hover_part(Some("vehicle/hood"));
        editor.hover_part(None);
        assert_eq!(editor.sink().last(), Some(&Command::ShowAllParts));
    }

    #[test]
    fn apply_and_reset_paint_drive_badges() {
        let (mut editor, _) = editor();
        editor.select_part("vehicle/hood");
        editor.edited_paints_mut()[0].color = Rgb8::new(0, 0, 255);
        assert!(editor.apply_paint());
        assert!(editor.has_custom_badge("vehicle/hood"));
        assert!(!editor.has_custom_badge("vehicle/door"));
        assert!(matches!(editor.sink().last(), Some(Command::ApplyPartPaint { part_path, .. }) if part_path == "vehicle/hood"));

        assert!(editor.reset_paint());
        assert!(!editor.has_custom_badge("vehicle/hood"));
        assert_eq!(editor.edited_paints()[0].color, Rgb8::new(255, 0, 0));
        assert_eq!(
            editor.sink().last(),
            Some(&Command::ResetPartPaint { part_path: "vehicle/hood".into() })
        );
    }

    #[test]
    fn base_editors_track_changes_and_propagate() {
        let (mut editor, _) = editor();
        editor.select_part("vehicle/hood");
        editor.edited_paints_mut()[0].color = Rgb8::new(0, 0, 255);
        editor.apply_paint();

        editor.base_editors_mut()[0].color = Rgb8::new(255, 128, 64);
        assert!(editor.has_base_paint_changes());
        assert!(editor.apply_base_editors());
        assert!(!editor.has_base_paint_changes());
        assert!(matches!(editor.sink().last(), Some(Command::SetBasePaints { .. })));

        let door = editor.sync().part("vehicle/door").unwrap().current_paints[0].to_view();
        assert_eq!(door.color, Rgb8::new(255, 128, 64));
        let hood = editor.sync().part("vehicle/hood").unwrap().current_paints[0].to_view();
        assert_eq!(hood.color, Rgb8::new(0, 0, 255));

        editor.reset_base_editors();
        assert_eq!(editor.base_editors()[0].color, Rgb8::new(255, 0, 0));
        assert!(editor.has_base_paint_changes());
        editor.apply_base_editors();
        assert!((editor.sync().base_paints()[0].base_color[0] - 1.0).abs() < 0.001);
        assert!((editor.sync().original_base_paints()[0].base_color[0] - 1.0).abs() < 0.001);
    }

    #[test]
    fn setters_pad_to_slot_count() {
        let (mut editor, _) = editor();
        editor.set_edited_paints(&[PaintSpec::rgba(0.0, 0.0, 1.0, 1.0)]);
        assert_eq!(editor.edited_paints().len(), 3);
        assert_eq!(editor.edited_paints()[2].color, Rgb8::new(0, 0, 255));
        editor.set_base_editors(&[]);
        assert_eq!(editor.base_editors()[0].color, Rgb8::new(255, 0, 0));
        assert!(!editor.has_base_paint_changes());
    }

    #[test]
    fn copy_from_vehicle_uses_matching_base_slot() {
        let (mut editor, _) = editor();
        editor.edited_paints_mut()[2].color = Rgb8::new(1, 2, 3);
        assert!(editor.copy_from_vehicle(2));
        assert_eq!(editor.edited_paints()[2].color, Rgb8::new(255, 0, 0));
        assert!(!editor.copy_from_vehicle(7));
    }

    #[test]
    fn filter_disables_tree_controls_and_shows_pruned_rows() {
        let (mut editor, _) = editor();
        assert_eq!(paths(&mut editor).len(), 5);
        assert!(editor.collapse_all());
        assert_eq!(paths(&mut editor), vec!["vehicle/root", "vehicle/steering_wheel"]);

        editor.set_filter("bumper");
        assert!(editor.tree_controls_disabled());
        assert!(!editor.toggle_expanded("vehicle/root"));
        assert!(!editor.expand_all());
        assert_eq!(paths(&mut editor), vec!["vehicle/root", "vehicle/front_bumper"]);
        assert_eq!(editor.filter().results().len(), 1);

        editor.clear_filter();
        assert!(!editor.tree_controls_disabled());
        assert!(editor.toggle_expanded("vehicle/root"));
        assert_eq!(paths(&mut editor).len(), 5);
    }

    #[test]
    fn vehicle_change_resets_view_state() {
        let (mut editor, _) = editor();
        editor.select_part("vehicle/door");
        editor.collapse_all();
        editor.set_filter("door");
        editor.hover_part(Some("vehicle/hood"));
        assert!(!editor.is_expanded("vehicle/root"));

        let mut other = state();
        other["vehicleId"] = json!("other");
        editor.handle_event(STATE_EVENT, &other);
        assert_eq!(editor.selection(), Some("vehicle/root"));
        assert!(!editor.filter().is_active());
        assert_eq!(editor.hovered(), None);
        assert!(editor.is_expanded("vehicle/root"));
    }

    #[test]
    fn filter_survives_snapshot() {
        let (mut editor, _) = editor();
        editor.set_filter("steering");
        editor.handle_event(STATE_EVENT, &state());
        assert_eq!(editor.filter().results().len(), 1);
    }

    #[test]
    fn badge_timer_catches_out_of_band_paint() {
        let (mut editor, t0) = editor();
        let blue = PaintSpec::rgba(0.0, 0.0, 1.0, 1.0);
        editor.sync.observe_paints("vehicle/door", vec![blue]);
        assert!(!editor.has_custom_badge("vehicle/door"));
        assert!(!editor.tick(t0 + Duration::from_millis(100)));
        assert!(editor.tick(t0 + Duration::from_millis(750)));
        assert!(editor.has_custom_badge("vehicle/door"));
        assert!(!editor.tick(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn presets_add_apply_and_hold_to_delete() {
        let (mut editor, t0) = editor();
        editor.base_editors_mut()[0].color = Rgb8::new(255, 128, 64);
        let added = editor.add_preset(PickerTarget::Base(0), None).unwrap();
        assert_eq!(added.name, "#FF8040");
        assert!(matches!(editor.sink().last(), Some(Command::PersistPresets { .. })));

        assert!(editor.apply_preset(1, PickerTarget::Part(1)));
        assert_eq!(editor.edited_paints()[1].color, Rgb8::new(255, 128, 64));
        assert!(!editor.apply_preset(9, PickerTarget::Part(1)));

        editor.press_preset(1, t0);
        assert!(editor.tick(t0 + Duration::from_millis(650)));
        assert!(editor.presets().remove_dialog().is_some());
        assert!(editor.confirm_remove_preset());
        assert!(editor.presets().presets().is_empty());
    }

    #[test]
    fn settings_and_snapshot_preset_rules() {
        let (mut editor, _) = editor();
        let data = json!({ "values": { "userPaintPresets": "[{\"name\":\"Sample purple\",\"baseColor\":[0.2,0.1,0.8,1]}]" } });
        editor.handle_event(SETTINGS_EVENT, &data);
        assert_eq!(editor.presets().presets().len(), 1);
        assert_eq!(editor.presets().presets()[0].storage_index, 1);

        let mut placeholder = state();
        placeholder["colorPresets"] = Value::Null;
        editor.handle_event(STATE_EVENT, &placeholder);
        placeholder["colorPresets"] = json!({ "length": 1, "n": 1 });
        editor.handle_event(STATE_EVENT, &placeholder);
        assert_eq!(editor.presets().presets().len(), 1);

        placeholder["colorPresets"] = json!({ "length": 1, "n": 1, "1": { "name": "Lua style swatch", "baseColor": [0, 1, 0, 1] } });
        editor.handle_event(STATE_EVENT, &placeholder);
        assert_eq!(editor.presets().presets()[0].name, "Lua style swatch");

        editor.handle_event(SETTINGS_EVENT, &json!({ "values": { "userPaintPresets": "[]" } }));
        assert!(editor.presets().presets().is_empty());
    }

    #[test]
    fn picker_commits_into_slot() {
        let (mut editor, _) = editor();
        assert!(editor.open_picker(PickerTarget::Part(0)));
        assert!(editor.begin_picker_drag(DragTarget::Surface, Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::new(0.0, 0.0)));
        assert!(editor.handle_pointer(&PointerEvent::release(0.0, 100.0)).is_consumed());
        assert!(editor.commit_picker());
        assert_eq!(editor.edited_paints()[0].color, Rgb8::new(0, 0, 0));

        editor.open_picker(PickerTarget::Part(0));
        editor.picker_mut().unwrap().set_hue(120.0);
        editor.cancel_picker();
        assert_eq!(editor.edited_paints()[0].color, Rgb8::new(0, 0, 0));
        assert_eq!(editor.handle_pointer(&PointerEvent::moved(1.0, 1.0)), EventResult::Ignored);
        assert!(!editor.open_picker(PickerTarget::Base(5)));
    }

    #[test]
    fn saved_config_flow() {
        let (mut editor, _) = editor();
        editor.handle_event(
            SAVED_CONFIGS_EVENT,
            &json!({ "vehicleId": 4242, "configs": [{ "relativePath": "vehicles/a.pc", "displayName": "A", "player": true }] }),
        );
        assert!(editor.prompt_delete_config("vehicles/a.pc"));
        assert!(!editor.prompt_delete_config("vehicles/missing.pc"));
        assert!(editor.confirm_delete_config());
        assert_eq!(editor.sink().last(), Some(&Command::DeleteConfig { relative_path: "vehicles/a.pc".into() }));

        assert!(!editor.save_config(" "));
        assert!(editor.save_config("Mine"));
        assert!(editor.spawn_config("vehicles/a.pc"));
        assert_eq!(editor.sink().last(), Some(&Command::SpawnConfig { relative_path: "vehicles/a.pc".into() }));
    }

    #[test]
    fn close_shows_all_parts() {
        let (mut editor, _) = editor();
        editor.close();
        assert_eq!(*editor.sink(), vec![Command::ShowAllParts, Command::Close]);
    }

    #[test]
    fn base_panel_toggle() {
        let (mut editor, _) = editor();
        assert!(!editor.is_base_paint_collapsed());
        editor.toggle_base_paint_collapsed();
        assert!(editor.is_base_paint_collapsed());
    }
}
