use std::cmp::Ordering;
use std::collections::HashMap;

use crate::record::SlotRecord;
use crate::slot_path::{normalize_slot_path, parent_key};

// ── NodeId ────────────────────────────────────────────────────────────────

/// Index of a node in a [`Forest`].
///
/// Nodes are created one per record, in input order, so a `NodeId` is also the
/// index of its record in the slice the forest was built from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    slot_key: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

// ── Forest ────────────────────────────────────────────────────────────────

/// Hierarchy of flat records derived from their slot paths.
///
/// Parentage is never stored in the records: a node's parent is the node whose
/// normalized slot path equals the child's path minus its last segment. Nodes
/// without such a parent are roots.
///
/// Building is O(n) plus the O(n log n) child sort. Lookups by identifier or
/// slot key are O(1), which is what lets callers patch a record's leaf fields
/// in place without touching the forest.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    by_identifier: HashMap<String, NodeId>,
    by_slot: HashMap<String, NodeId>,
}

impl Forest {
    pub fn build<R: SlotRecord>(records: &[R]) -> Self {
        let mut forest = Forest {
            nodes: Vec::with_capacity(records.len()),
            ..Forest::default()
        };

        // Pass 1: one node per record, indexed by identifier and slot key.
        // Duplicate slot keys are tolerated; the first record keeps the key.
        for (i, record) in records.iter().enumerate() {
            let slot_key = normalize_slot_path(record.slot_path());
            forest.by_slot.entry(slot_key.clone()).or_insert(NodeId(i));
            forest
                .by_identifier
                .entry(record.identifier().to_string())
                .or_insert(NodeId(i));
            forest.nodes.push(Node { slot_key, parent: None, children: Vec::new() });
        }

        // Pass 2: link to parent-by-key or promote to root.
        for i in 0..forest.nodes.len() {
            let parent = parent_key(&forest.nodes[i].slot_key)
                .and_then(|key| forest.by_slot.get(key).copied())
                .filter(|p| p.0 != i);
            match parent {
                Some(p) => {
                    forest.nodes[i].parent = Some(p);
                    forest.nodes[p.0].children.push(NodeId(i));
                }
                None => forest.roots.push(NodeId(i)),
            }
        }

        // Pass 3: deterministic sibling order.
        let cmp = |a: &NodeId, b: &NodeId| compare_records(records, a.0, b.0);
        forest.roots.sort_by(cmp);
        for node in &mut forest.nodes {
            node.children.sort_by(cmp);
        }

        forest
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Normalized slot path of the node.
    pub fn slot_key(&self, id: NodeId) -> &str {
        self.nodes.get(id.0).map(|n| n.slot_key.as_str()).unwrap_or("")
    }

    /// Node holding the record with this identifier.
    pub fn node_for(&self, identifier: &str) -> Option<NodeId> {
        self.by_identifier.get(identifier).copied()
    }

    /// Node owning this slot path (normalized before lookup).
    pub fn node_for_slot(&self, raw_slot_path: &str) -> Option<NodeId> {
        self.by_slot.get(&normalize_slot_path(raw_slot_path)).copied()
    }

    /// Pre-order traversal of the whole forest with each node's depth.
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = self.roots.iter().rev().map(|r| (*r, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for child in self.children(id).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }
}

// ── ordering ──────────────────────────────────────────────────────────────

fn compare_records<R: SlotRecord>(records: &[R], a: usize, b: usize) -> Ordering {
    let (ra, rb) = (&records[a], &records[b]);
    order_rank(ra.order())
        .cmp(&order_rank(rb.order()))
        .then_with(|| cmp_ignore_case(ra.slot_name(), rb.slot_name()))
        .then_with(|| cmp_ignore_case(ra.display_name(), rb.display_name()))
        .then_with(|| ra.identifier().cmp(rb.identifier()))
        .then(a.cmp(&b))
}

fn order_rank(order: Option<i64>) -> (u8, i64) {
    match order {
        Some(n) => (0, n),
        None => (1, 0),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::fixture::{Rec, vehicle};

    use super::*;

    fn ids(records: &[Rec], nodes: &[NodeId]) -> Vec<String> {
        nodes.iter().map(|n| records[n.index()].id.clone()).collect()
    }

    #[test]
    fn links_children_by_slot_prefix() {
        let records = vehicle();
        let forest = Forest::build(&records);
        let body = forest.node_for("vehicle/root").unwrap();
        let hood = forest.node_for("vehicle/hood").unwrap();
        assert_eq!(forest.parent(hood), Some(body));
        assert!(forest.children(body).contains(&hood));
    }

    #[test]
    fn orphan_is_promoted_to_root() {
        let records = vehicle();
        let forest = Forest::build(&records);
        // `interior` has no node, so the steering wheel becomes a root.
        let wheel = forest.node_for("vehicle/steering_wheel").unwrap();
        assert_eq!(forest.parent(wheel), None);
        assert!(forest.roots().contains(&wheel));
    }

    #[test]
    fn every_record_appears_exactly_once() {
        let records = vehicle();
        let forest = Forest::build(&records);
        let walked = forest.walk();
        assert_eq!(walked.len(), records.len());
        let unique: HashSet<NodeId> = walked.iter().map(|(id, _)| *id).collect();
        assert_eq!(unique.len(), records.len());
    }

    #[test]
    fn duplicate_slot_paths_are_tolerated() {
        let records = vec![
            Rec::new("a", "body", "A"),
            Rec::new("b", "body", "B"),
            Rec::new("c", "body/hood", "C"),
        ];
        let forest = Forest::build(&records);
        assert_eq!(forest.walk().len(), 3);
        // First record owns the slot key; the twin is a separate root.
        assert_eq!(forest.node_for_slot("body"), forest.node_for("a"));
        assert_eq!(forest.parent(forest.node_for("c").unwrap()), forest.node_for("a"));
        assert_eq!(forest.roots().len(), 2);
    }

    #[test]
    fn empty_slot_acts_as_root_of_single_segment_paths() {
        let records = vec![
            Rec::new("frame", "", "Frame"),
            Rec::new("body", "body", "Body"),
        ];
        let forest = Forest::build(&records);
        let frame = forest.node_for("frame").unwrap();
        let body = forest.node_for("body").unwrap();
        assert_eq!(forest.roots(), &[frame]);
        assert_eq!(forest.parent(body), Some(frame));
    }

    #[test]
    fn siblings_sort_by_slot_then_name_case_insensitively() {
        let records = vec![
            Rec::new("root", "body", "Body"),
            Rec::new("z", "body/z", "zeta").with_slot_name("Trim"),
            Rec::new("a", "body/a", "Alpha").with_slot_name("trim"),
            Rec::new("d", "body/d", "door").with_slot_name("Door"),
        ];
        let forest = Forest::build(&records);
        let root = forest.node_for("root").unwrap();
        assert_eq!(ids(&records, forest.children(root)), vec!["d", "a", "z"]);
    }

    #[test]
    fn explicit_order_wins() {
        let records = vec![
            Rec::new("root", "body", "Body"),
            Rec::new("a", "body/a", "Alpha"),
            Rec::new("b", "body/b", "Beta").with_order(2),
            Rec::new("c", "body/c", "Gamma").with_order(1),
        ];
        let forest = Forest::build(&records);
        let root = forest.node_for("root").unwrap();
        assert_eq!(ids(&records, forest.children(root)), vec!["c", "b", "a"]);
    }

    #[test]
    fn walk_reports_depth() {
        let records = vehicle();
        let forest = Forest::build(&records);
        let hood = forest.node_for("vehicle/hood").unwrap();
        let (_, depth) = forest.walk().into_iter().find(|(id, _)| *id == hood).unwrap();
        assert_eq!(depth, 1);
    }

    #[test]
    fn lookup_normalizes_slot_paths() {
        let records = vehicle();
        let forest = Forest::build(&records);
        assert_eq!(forest.node_for_slot("\\body\\hood/"), forest.node_for("vehicle/hood"));
    }
}
