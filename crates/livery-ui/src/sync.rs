use std::collections::HashMap;

use livery_engine::paint::{PaintSpec, paints_equal};
use livery_slots::Forest;

use crate::command::{Command, CommandSink};
use crate::part::{Part, Snapshot};

/// Whether a part shows the "custom paint" badge.
///
/// A non-empty override always counts. Otherwise the part's current paints
/// are compared to the vehicle base at view precision, which also catches
/// custom paint the backend applied without reporting an override.
pub fn compute_has_custom_paint(part: &Part, base_paints: &[PaintSpec]) -> bool {
    if part.custom_paints.as_ref().is_some_and(|p| !p.is_empty()) {
        return true;
    }
    !paints_equal(&part.current_paints, base_paints)
}

/// What a snapshot changed, for callers that manage view state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    pub vehicle_changed: bool,
}

// ── PaintSync ─────────────────────────────────────────────────────────────

/// Part table with optimistic local edits and snapshot reconciliation.
///
/// Local edits patch parts in place through the path index and recompute the
/// custom badges before returning, so the UI never waits for the backend.
/// A snapshot replaces the table wholesale; the forest is then marked dirty
/// and rebuilt lazily on the next [`forest`](Self::forest) call.
#[derive(Debug, Clone, Default)]
pub struct PaintSync {
    vehicle_id: Option<String>,
    parts: Vec<Part>,
    index: HashMap<String, usize>,
    base_paints: Vec<PaintSpec>,
    original_base_paints: Vec<PaintSpec>,
    forest: Forest,
    forest_dirty: bool,
}

impl PaintSync {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vehicle_id(&self) -> Option<&str> {
        self.vehicle_id.as_deref()
    }

    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, part_path: &str) -> Option<&Part> {
        self.index.get(part_path).map(|&i| &self.parts[i])
    }

    #[inline]
    pub fn base_paints(&self) -> &[PaintSpec] {
        &self.base_paints
    }

    /// Base paint the vehicle had when it was first seen (or as reported).
    #[inline]
    pub fn original_base_paints(&self) -> &[PaintSpec] {
        &self.original_base_paints
    }

    #[inline]
    pub fn is_forest_dirty(&self) -> bool {
        self.forest_dirty
    }

    /// Hierarchy over [`parts`](Self::parts), rebuilt first if structure changed.
    pub fn forest(&mut self) -> &Forest {
        if self.forest_dirty {
            self.forest = Forest::build(&self.parts);
            self.forest_dirty = false;
            log::debug!("rebuilt part forest ({} parts, {} roots)", self.parts.len(), self.forest.roots().len());
        }
        &self.forest
    }

    /// Parts and forest together, for read-only passes like filtering.
    pub fn parts_and_forest(&mut self) -> (&[Part], &Forest) {
        self.forest();
        (&self.parts, &self.forest)
    }

    /// Replaces local state with an authoritative snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) -> SnapshotOutcome {
        let vehicle_changed = snapshot.vehicle_id != self.vehicle_id;
        if vehicle_changed {
            log::info!(
                "vehicle changed: {} -> {}",
                self.vehicle_id.as_deref().unwrap_or("none"),
                snapshot.vehicle_id.as_deref().unwrap_or("none")
            );
        }

        self.vehicle_id = snapshot.vehicle_id;
        self.base_paints = snapshot.base_paints;
        match snapshot.original_base_paints {
            Some(original) => self.original_base_paints = original,
            None if vehicle_changed || self.original_base_paints.is_empty() => {
                self.original_base_paints = self.base_paints.clone();
            }
            None => {}
        }

        self.parts = snapshot.parts;
        self.index = self.parts.iter().enumerate().map(|(i, p)| (p.part_path.clone(), i)).collect();
        self.forest_dirty = true;
        self.refresh_custom_badges();

        SnapshotOutcome { vehicle_changed }
    }

    /// Gives a part its own paint and tells the backend.
    ///
    /// Returns `false` (and sends nothing) for unknown parts or empty paints.
    pub fn apply_paint(&mut self, part_path: &str, paints: Vec<PaintSpec>, sink: &mut impl CommandSink) -> bool {
        let Some(&i) = self.index.get(part_path) else {
            log::warn!("apply paint: unknown part {part_path}");
            return false;
        };
        if paints.is_empty() {
            return false;
        }
        let part = &mut self.parts[i];
        part.current_paints = paints.clone();
        part.custom_paints = Some(paints.clone());
        sink.send(Command::ApplyPartPaint {
            part_path: part.part_path.clone(),
            part_name: part.part_name.clone(),
            slot_path: part.slot_path.clone(),
            paints,
        });
        self.refresh_custom_badges();
        true
    }

    /// Returns a part to the vehicle base paint and tells the backend.
    pub fn reset_paint(&mut self, part_path: &str, sink: &mut impl CommandSink) -> bool {
        let Some(&i) = self.index.get(part_path) else {
            log::warn!("reset paint: unknown part {part_path}");
            return false;
        };
        let part = &mut self.parts[i];
        part.custom_paints = None;
        part.current_paints = self.base_paints.clone();
        sink.send(Command::ResetPartPaint { part_path: part.part_path.clone() });
        self.refresh_custom_badges();
        true
    }

    /// Changes the vehicle base paint.
    ///
    /// Parts following the base take the new paint; parts with custom paint
    /// keep theirs. The original base paint is not touched.
    pub fn apply_base_paint(&mut self, paints: Vec<PaintSpec>, sink: &mut impl CommandSink) -> bool {
        if paints.is_empty() {
            return false;
        }
        let mut propagated = 0;
        for part in &mut self.parts {
            if !compute_has_custom_paint(part, &self.base_paints) {
                part.current_paints = paints.clone();
                propagated += 1;
            }
        }
        log::debug!("base paint applied; {propagated} of {} parts follow it", self.parts.len());
        self.base_paints = paints.clone();
        sink.send(Command::SetBasePaints { paints });
        self.refresh_custom_badges();
        true
    }

    /// Recomputes every part's custom badge. Returns how many flags flipped.
    ///
    /// Runs after each local edit and on a timer; a second call without an
    /// intervening change always returns 0.
    pub fn refresh_custom_badges(&mut self) -> usize {
        let mut changed = 0;
        for part in &mut self.parts {
            let custom = compute_has_custom_paint(part, &self.base_paints);
            if part.has_custom_paint != custom {
                part.has_custom_paint = custom;
                changed += 1;
            }
        }
        changed
    }

    /// Replaces a part's current paints as reported out of band, without
    /// sending anything. The next badge refresh picks up the difference.
    pub fn observe_paints(&mut self, part_path: &str, paints: Vec<PaintSpec>) -> bool {
        match self.index.get(part_path) {
            Some(&i) => {
                self.parts[i].current_paints = paints;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> PaintSpec {
        PaintSpec::rgba(1.0, 0.0, 0.0, 1.0)
    }

    fn green() -> PaintSpec {
        PaintSpec::rgba(0.0, 1.0, 0.0, 1.0)
    }

    fn blue() -> PaintSpec {
        PaintSpec::rgba(0.0, 0.0, 1.0, 1.0)
    }

    fn part(path: &str, slot: &str, paints: Vec<PaintSpec>) -> Part {
        let mut p = Part::new(path, slot);
        p.current_paints = paints;
        p
    }

    fn snapshot(vehicle: &str, base: Vec<PaintSpec>, parts: Vec<Part>) -> Snapshot {
        Snapshot {
            vehicle_id: Some(vehicle.to_string()),
            base_paints: base,
            original_base_paints: None,
            parts,
            presets: crate::presets::PresetUpdate::Unchanged,
        }
    }

    fn three_parts() -> PaintSync {
        let mut sync = PaintSync::new();
        sync.apply_snapshot(snapshot("v1", vec![red()], vec![
            part("a", "body", vec![red()]),
            part("b", "body/hood", vec![red()]),
            part("c", "body/door", vec![red()]),
        ]));
        sync
    }

    #[test]
    fn badge_compares_at_view_precision() {
        let base = vec![PaintSpec::rgba(0.4, 0.6, 0.2, 1.0)];
        let noisy = part("a", "body", vec![PaintSpec::rgba(0.400_001, 0.599_999, 0.2, 1.0)]);
        assert!(!compute_has_custom_paint(&noisy, &base));
        let other = part("a", "body", vec![blue()]);
        assert!(compute_has_custom_paint(&other, &base));
    }

    #[test]
    fn override_always_counts_as_custom() {
        let mut p = part("a", "body", vec![red()]);
        p.custom_paints = Some(vec![red()]);
        assert!(compute_has_custom_paint(&p, &[red()]));
        p.custom_paints = Some(Vec::new());
        assert!(!compute_has_custom_paint(&p, &[red()]));
    }

    #[test]
    fn apply_paint_is_optimistic() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        assert!(sync.apply_paint("b", vec![blue()], &mut sink));
        let b = sync.part("b").unwrap();
        assert!(b.has_custom_paint);
        assert_eq!(b.current_paints, vec![blue()]);
        assert!(matches!(&sink[0], Command::ApplyPartPaint { part_path, slot_path, .. }
            if part_path == "b" && slot_path == "body/hood"));
        assert!(!sync.part("a").unwrap().has_custom_paint);
    }

    #[test]
    fn apply_paint_ignores_unknown_and_empty() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        assert!(!sync.apply_paint("zzz", vec![blue()], &mut sink));
        assert!(!sync.apply_paint("a", Vec::new(), &mut sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn reset_restores_base() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        sync.apply_paint("a", vec![blue()], &mut sink);
        sync.apply_paint("b", vec![green()], &mut sink);
        assert!(sync.reset_paint("b", &mut sink));
        assert!(!sync.part("b").unwrap().has_custom_paint);
        assert!(sync.part("a").unwrap().has_custom_paint);
        assert_eq!(sink.last(), Some(&Command::ResetPartPaint { part_path: "b".into() }));
    }

    #[test]
    fn base_paint_propagates_to_base_parts_only() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        sync.apply_paint("a", vec![blue()], &mut sink);
        assert!(sync.apply_base_paint(vec![green()], &mut sink));

        assert_eq!(sync.part("a").unwrap().current_paints, vec![blue()]);
        for path in ["b", "c"] {
            let p = sync.part(path).unwrap();
            assert_eq!(p.current_paints, vec![green()]);
            assert!(!p.has_custom_paint);
        }
        assert_eq!(sync.base_paints(), &[green()]);
        assert_eq!(sync.original_base_paints(), &[red()]);
        assert_eq!(sink.last(), Some(&Command::SetBasePaints { paints: vec![green()] }));
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut sync = three_parts();
        sync.observe_paints("c", vec![blue()]);
        assert_eq!(sync.refresh_custom_badges(), 1);
        let first: Vec<bool> = sync.parts().iter().map(|p| p.has_custom_paint).collect();
        assert_eq!(sync.refresh_custom_badges(), 0);
        let second: Vec<bool> = sync.parts().iter().map(|p| p.has_custom_paint).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_supersedes_local_edits() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        sync.apply_paint("a", vec![blue()], &mut sink);
        let outcome = sync.apply_snapshot(snapshot("v1", vec![red()], vec![part("a", "body", vec![red()])]));
        assert!(!outcome.vehicle_changed);
        assert_eq!(sync.parts().len(), 1);
        assert!(!sync.part("a").unwrap().has_custom_paint);
        assert!(sync.part("b").is_none());
    }

    #[test]
    fn forest_rebuilds_lazily() {
        let mut sync = three_parts();
        assert!(sync.is_forest_dirty());
        assert_eq!(sync.forest().roots().len(), 1);
        assert!(!sync.is_forest_dirty());
        let mut sink: Vec<Command> = Vec::new();
        sync.apply_paint("a", vec![blue()], &mut sink);
        assert!(!sync.is_forest_dirty());
        sync.apply_snapshot(snapshot("v1", vec![red()], vec![part("x", "a", vec![]), part("y", "b", vec![])]));
        assert!(sync.is_forest_dirty());
        assert_eq!(sync.forest().roots().len(), 2);
    }

    #[test]
    fn original_base_tracks_vehicle_changes() {
        let mut sync = three_parts();
        let mut sink: Vec<Command> = Vec::new();
        sync.apply_base_paint(vec![green()], &mut sink);
        sync.apply_snapshot(snapshot("v1", vec![green()], vec![]));
        assert_eq!(sync.original_base_paints(), &[red()]);

        let outcome = sync.apply_snapshot(snapshot("v2", vec![blue()], vec![]));
        assert!(outcome.vehicle_changed);
        assert_eq!(sync.original_base_paints(), &[blue()]);

        let mut reported = snapshot("v2", vec![green()], vec![]);
        reported.original_base_paints = Some(vec![red()]);
        sync.apply_snapshot(reported);
        assert_eq!(sync.original_base_paints(), &[red()]);
    }
}
