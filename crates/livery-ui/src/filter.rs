use livery_slots::{FilterResult, FilteredNode, Forest, collect_results, filter_tree, full_tree};

use crate::part::Part;

/// Search box state and the views derived from it.
///
/// While inactive (blank query) `tree` is the whole forest and `results` is
/// empty. While active, `tree` is the pruned forest and `results` the flat
/// hit list with highlight segments.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    query: String,
    results: Vec<FilterResult>,
    tree: Vec<FilteredNode>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw query as typed.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    #[inline]
    pub fn results(&self) -> &[FilterResult] {
        &self.results
    }

    #[inline]
    pub fn tree(&self) -> &[FilteredNode] {
        &self.tree
    }

    /// Stores a new query. Call [`recompute`](Self::recompute) afterwards.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Rebuilds the derived views for the current query.
    pub fn recompute(&mut self, forest: &Forest, parts: &[Part]) {
        let needle = self.query.trim();
        if needle.is_empty() {
            self.results.clear();
            self.tree = full_tree(forest);
            return;
        }
        self.tree = filter_tree(forest, parts, needle);
        self.results = collect_results(forest, parts, needle);
        log::debug!("filter {needle:?}: {} hits", self.results.len());
    }
}
