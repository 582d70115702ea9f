//! Highlight segments for rendering search hits.
//!
//! [`highlight`] splits a label into matched/unmatched runs around the first
//! hit; [`group_by_word`] re-partitions those runs per display word so a
//! renderer can wrap on word boundaries without splitting a highlight.

use crate::filter::{find_ignore_case, matches};
use crate::record::SlotRecord;
use crate::tree::Forest;

// ── Segment / WordGroup ───────────────────────────────────────────────────

/// A contiguous run of text that either is or is not part of the hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn new(text: impl Into<String>, matched: bool) -> Self {
        Self { text: text.into(), matched }
    }
}

/// One display word, split into matched/unmatched runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGroup {
    pub segments: Vec<Segment>,
}

impl WordGroup {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn has_match(&self) -> bool {
        self.segments.iter().any(|s| s.matched)
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits `text` around the first case-insensitive occurrence of `query`.
///
/// Concatenating the returned segments always reproduces `text` exactly. An
/// empty query, or one that does not occur, yields a single unmatched segment.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let range = match find_ignore_case(text, query) {
        Some(r) if !query.is_empty() => r,
        _ => return vec![Segment::new(text, false)],
    };
    let mut out = Vec::with_capacity(3);
    if range.start > 0 {
        out.push(Segment::new(&text[..range.start], false));
    }
    out.push(Segment::new(&text[range.clone()], true));
    if range.end < text.len() {
        out.push(Segment::new(&text[range.end..], false));
    }
    out
}

/// Regroups segments at whitespace boundaries.
///
/// Whitespace itself is dropped; joining the group texts with single spaces
/// ([`join_words`]) gives back the whitespace-normalized source text.
pub fn group_by_word(segments: &[Segment]) -> Vec<WordGroup> {
    let mut groups = Vec::new();
    let mut current = WordGroup::default();
    for segment in segments {
        for ch in segment.text.chars() {
            if ch.is_whitespace() {
                if !current.segments.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                continue;
            }
            match current.segments.last_mut() {
                Some(last) if last.matched == segment.matched => last.text.push(ch),
                _ => current.segments.push(Segment::new(ch.to_string(), segment.matched)),
            }
        }
    }
    if !current.segments.is_empty() {
        groups.push(current);
    }
    groups
}

pub fn join_words(groups: &[WordGroup]) -> String {
    groups.iter().map(WordGroup::text).collect::<Vec<_>>().join(" ")
}

// ── FilterResult ──────────────────────────────────────────────────────────

/// Render data for one matching record in the flat result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    /// Index of the record in the slice the results were built from.
    pub record: usize,
    pub name_segments: Vec<Segment>,
    pub slot_segments: Vec<Segment>,
    pub identifier_segments: Vec<Segment>,
    pub name_words: Vec<WordGroup>,
    pub slot_words: Vec<WordGroup>,
}

impl FilterResult {
    pub fn new<R: SlotRecord>(index: usize, record: &R, query: &str) -> Self {
        let name = normalize_whitespace(record.name_label());
        let slot = normalize_whitespace(record.slot_label_text());
        let name_segments = highlight(&name, query);
        let slot_segments = highlight(&slot, query);
        Self {
            record: index,
            name_words: group_by_word(&name_segments),
            slot_words: group_by_word(&slot_segments),
            identifier_segments: highlight(record.identifier(), query),
            name_segments,
            slot_segments,
        }
    }
}

/// Results for every matching record, in forest pre-order.
pub fn collect_results<R: SlotRecord>(forest: &Forest, records: &[R], query: &str) -> Vec<FilterResult> {
    forest
        .walk()
        .into_iter()
        .filter_map(|(id, _)| {
            let record = records.get(id.index())?;
            matches(record, query).then(|| FilterResult::new(id.index(), record, query))
        })
        .collect()
}
