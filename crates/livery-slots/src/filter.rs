use std::ops::Range;

use crate::record::SlotRecord;
use crate::tree::{Forest, NodeId};

// ── matching ──────────────────────────────────────────────────────────────

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Compares char by char so the returned range always falls on char
/// boundaries of the original text, whatever the case folding does to lengths.
/// An empty needle matches at offset 0.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return Some(0..0);
    }
    for (start, _) in haystack.char_indices() {
        let mut hay = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = true;
        for n in needle.chars() {
            match hay.next() {
                Some((offset, h)) if chars_eq_ignore_case(h, n) => {
                    end = start + offset + h.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some(start..end);
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Case-insensitive substring test across every search field of `record`.
///
/// The empty query matches everything.
pub fn matches<R: SlotRecord>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record
        .search_fields()
        .into_iter()
        .any(|field| find_ignore_case(field, query).is_some())
}

// ── FilteredNode ──────────────────────────────────────────────────────────

/// A node of a pruned forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredNode {
    pub node: NodeId,
    /// Whether the node's own record matched the query.
    pub matched: bool,
    pub children: Vec<FilteredNode>,
}

impl FilteredNode {
    /// Finds the filtered node for `id` anywhere below (and including) `self`.
    pub fn find(&self, id: NodeId) -> Option<&FilteredNode> {
        if self.node == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

/// Finds `id` in a list of filtered roots.
pub fn find_filtered(nodes: &[FilteredNode], id: NodeId) -> Option<&FilteredNode> {
    nodes.iter().find_map(|n| n.find(id))
}

/// Prunes the forest to the nodes relevant for `query`.
///
/// A node is kept when it matches or has a kept descendant. A matching node
/// keeps its entire subtree, so searching for a slot shows everything mounted
/// in it.
pub fn filter_tree<R: SlotRecord>(forest: &Forest, records: &[R], query: &str) -> Vec<FilteredNode> {
    forest
        .roots()
        .iter()
        .filter_map(|root| prune(forest, records, *root, query))
        .collect()
}

/// The whole forest as filtered nodes, every node marked as matched.
pub fn full_tree(forest: &Forest) -> Vec<FilteredNode> {
    fn expand(forest: &Forest, id: NodeId) -> FilteredNode {
        FilteredNode {
            node: id,
            matched: true,
            children: forest.children(id).iter().map(|c| expand(forest, *c)).collect(),
        }
    }
    forest.roots().iter().map(|r| expand(forest, *r)).collect()
}

fn prune<R: SlotRecord>(forest: &Forest, records: &[R], id: NodeId, query: &str) -> Option<FilteredNode> {
    let record = records.get(id.index())?;
    if matches(record, query) {
        return Some(reveal(forest, records, id, query));
    }
    let children: Vec<FilteredNode> = forest
        .children(id)
        .iter()
        .filter_map(|c| prune(forest, records, *c, query))
        .collect();
    if children.is_empty() {
        None
    } else {
        Some(FilteredNode { node: id, matched: false, children })
    }
}

fn reveal<R: SlotRecord>(forest: &Forest, records: &[R], id: NodeId, query: &str) -> FilteredNode {
    FilteredNode {
        node: id,
        matched: records.get(id.index()).is_some_and(|r| matches(r, query)),
        children: forest
            .children(id)
            .iter()
            .map(|c| reveal(forest, records, *c, query))
            .collect(),
    }
}
