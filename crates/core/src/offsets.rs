//! Offset reconciliation against the extracted document text
//!
//! Maps the live highlight set back onto linear character ranges of the
//! full document text for the external redaction call. Offsets are byte
//! indices into the same UTF-8 string that is submitted alongside them, so
//! the pair stays internally consistent.

use crate::highlight::Highlight;
use serde::ser::SerializeTuple;

/// Label attached to every reconciled span
pub const REDACTION_LABEL: &str = "REDACTED";

/// One character-offset range to redact
///
/// Serializes as the `[start, end, label]` triple the redaction service
/// expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl RedactionSpan {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end, label: REDACTION_LABEL.to_string() }
    }
}

impl serde::Serialize for RedactionSpan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.start)?;
        tuple.serialize_element(&self.end)?;
        tuple.serialize_element(&self.label)?;
        tuple.end()
    }
}

/// Find the redaction spans for the current highlight set
///
/// For every text highlight, scans `full_text` case-sensitively for every
/// occurrence of the highlight's text and emits one span per occurrence
/// (`end = start + text length`). Results are flattened in highlight order.
/// Overlapping or duplicate spans from different highlights are passed
/// through as-is; deduplication is the consumer's concern. Area highlights
/// contribute nothing.
pub fn find_offsets(full_text: &str, highlights: &[Highlight]) -> Vec<RedactionSpan> {
    highlights
        .iter()
        .filter_map(|highlight| highlight.content.text.as_deref())
        .filter(|text| !text.is_empty())
        .flat_map(|text| occurrences(full_text, text))
        .collect()
}

/// Every non-overlapping occurrence of `needle`, case-sensitively
///
/// The scan resumes past each match, matching the original one-pass
/// index-of loop.
fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = RedactionSpan> + 'a {
    let len = needle.len();
    haystack
        .match_indices(needle)
        .map(move |(start, _)| RedactionSpan::new(start, start + len))
}
