// ── SlotRecord ────────────────────────────────────────────────────────────

/// A flat record that can be placed in a slot-path forest.
///
/// Implemented by whatever the caller stores per part; the forest only ever
/// holds indices into the caller's slice, never the records themselves.
pub trait SlotRecord {
    /// Stable unique key (the part path).
    fn identifier(&self) -> &str;

    /// Raw, un-normalized slot path (`body/hood`, `body\\door`, ...).
    fn slot_path(&self) -> &str;

    fn display_name(&self) -> &str;

    fn part_name(&self) -> &str {
        ""
    }

    fn slot_name(&self) -> &str {
        ""
    }

    /// Optional human label for the slot, preferred over `slot_name` for display.
    fn slot_label(&self) -> Option<&str> {
        None
    }

    /// Explicit sort key. Records with an order sort before records without one.
    fn order(&self) -> Option<i64> {
        None
    }

    /// Every text field a search query is tested against.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.display_name(), self.part_name(), self.slot_name()];
        if let Some(label) = self.slot_label() {
            fields.push(label);
        }
        fields.push(self.identifier());
        fields.push(self.slot_path());
        fields
    }

    /// Display name, falling back to the part name and then the identifier.
    fn name_label(&self) -> &str {
        first_non_blank(&[self.display_name(), self.part_name(), self.identifier()])
    }

    /// Slot label, falling back to the slot name and then the raw slot path.
    fn slot_label_text(&self) -> &str {
        first_non_blank(&[
            self.slot_label().unwrap_or(""),
            self.slot_name(),
            self.slot_path(),
        ])
    }
}

fn first_non_blank<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
}
