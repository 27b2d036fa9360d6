//! Highlight data model and the authoritative highlight collection
//!
//! A highlight is a marked region of the rendered document: either a text
//! selection (one rectangle per visual line) or a freehand area capture.
//! Positions are stored in scaled coordinate space so they survive zoom and
//! resize; conversion to viewport space happens only at the rendering edge.

use crate::coords::Rect;
use tracing::debug;

/// Unique identifier for a highlight
///
/// Assigned once at insertion time, never reused, carries no meaning beyond
/// identity. Generated using UUID v4.
pub type HighlightId = uuid::Uuid;

/// Geometric location of a highlight, in scaled space when stored
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// Owning page, 1-based
    pub page_number: u32,

    /// Minimal rectangle enclosing all sub-rectangles
    pub bounding_rect: Rect,

    /// One rectangle per visually distinct line of the underlying text range.
    /// An area highlight has exactly one, sized to the freehand box.
    pub rects: Vec<Rect>,
}

/// What a highlight marks
///
/// A text highlight sets `text`; an area highlight sets `image` (an opaque
/// raster capture of the boxed region) and carries its geometry in the
/// position's bounding rectangle.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HighlightContent {
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl HighlightContent {
    /// Content for a text highlight
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), image: None }
    }

    /// Content for an area highlight
    pub fn image(image: Vec<u8>) -> Self {
        Self { text: None, image: Some(image) }
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }
}

/// A stored highlight
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Highlight {
    pub id: HighlightId,
    pub position: Position,
    pub content: HighlightContent,
    pub comment: String,
}

/// A highlight that has not been admitted to the collection yet
///
/// Produced by user selection or by the text locator. The store assigns the
/// id on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightCandidate {
    pub position: Position,
    pub content: HighlightContent,
    pub comment: String,
}

impl HighlightCandidate {
    pub fn new(position: Position, content: HighlightContent) -> Self {
        Self { position, content, comment: String::new() }
    }

    fn into_highlight(self, id: HighlightId) -> Highlight {
        Highlight { id, position: self.position, content: self.content, comment: self.comment }
    }
}

/// Partial position update, shallow-merged into an existing position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionPatch {
    pub page_number: Option<u32>,
    pub bounding_rect: Option<Rect>,
    pub rects: Option<Vec<Rect>>,
}

impl PositionPatch {
    /// Patch that replaces only the bounding rectangle (area-highlight resize)
    pub fn bounding_rect(rect: Rect) -> Self {
        Self { bounding_rect: Some(rect), ..Self::default() }
    }
}

/// Partial content update, shallow-merged into existing content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    pub text: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl ContentPatch {
    /// Patch that replaces only the raster capture (area-highlight resize)
    pub fn image(image: Vec<u8>) -> Self {
        Self { image: Some(image), ..Self::default() }
    }
}

/// Configuration for the highlight store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Vertical tolerance, in scaled units, for two highlights to count as
    /// being on the same line when deciding overlap. Tunable; there is no
    /// documented derivation for the default.
    pub overlap_tolerance: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { overlap_tolerance: 5.0 }
    }
}

/// Errors that can occur during store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No highlight with the given id exists in the collection
    #[error("highlight not found: {0}")]
    NotFound(HighlightId),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of an `add` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// No overlap found; the candidate was inserted under this id
    Inserted(HighlightId),

    /// The candidate overlapped existing highlights; this many were removed
    /// and the candidate was discarded
    Toggled { removed: usize },
}

/// The authoritative, order-sensitive highlight collection
///
/// Insertion order matters only for rendering stack order (newest first).
/// The store guarantees that no two stored highlights satisfy the overlap
/// predicate: re-marking over an existing highlight removes it instead of
/// inserting, which is the user's delete affordance.
#[derive(Debug, Default)]
pub struct HighlightStore {
    highlights: Vec<Highlight>,
    config: StoreConfig,
}

impl HighlightStore {
    /// Create an empty store with the default overlap tolerance
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with an explicit configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self { highlights: Vec::new(), config }
    }

    /// Clear the collection unconditionally
    pub fn reset(&mut self) {
        self.highlights.clear();
    }

    /// Add a candidate, applying the overlap toggle
    ///
    /// If any existing highlight overlaps the candidate, every overlapping
    /// highlight is removed and the candidate is discarded. Otherwise the
    /// candidate receives a fresh id and is prepended (newest first).
    pub fn add(&mut self, candidate: HighlightCandidate) -> AddOutcome {
        let any_overlap = self
            .highlights
            .iter()
            .any(|h| self.overlaps(&h.position, &candidate.position));

        if any_overlap {
            let before = self.highlights.len();
            let tolerance = self.config.overlap_tolerance;
            let candidate_position = candidate.position;
            self.highlights
                .retain(|h| !overlap(&h.position, &candidate_position, tolerance));
            let removed = before - self.highlights.len();
            debug!(removed, "re-marked region toggled existing highlights off");
            return AddOutcome::Toggled { removed };
        }

        let id = HighlightId::new_v4();
        debug!(%id, page = candidate.position.page_number, "saving highlight");
        self.highlights.insert(0, candidate.into_highlight(id));
        AddOutcome::Inserted(id)
    }

    /// Bulk import of locator results
    ///
    /// Each candidate receives a fresh id and is appended without overlap
    /// arbitration; the caller is trusted to have deduplicated already.
    pub fn add_batch(&mut self, candidates: Vec<HighlightCandidate>) -> Vec<HighlightId> {
        let mut ids = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let id = HighlightId::new_v4();
            self.highlights.push(candidate.into_highlight(id));
            ids.push(id);
        }
        debug!(count = ids.len(), "imported highlight batch");
        ids
    }

    /// Shallow-merge patches into the highlight with the given id
    ///
    /// All other highlights, and all unpatched fields of the target, are left
    /// untouched.
    pub fn update(
        &mut self,
        id: HighlightId,
        position: PositionPatch,
        content: ContentPatch,
    ) -> StoreResult<()> {
        let highlight = self
            .highlights
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(page_number) = position.page_number {
            highlight.position.page_number = page_number;
        }
        if let Some(bounding_rect) = position.bounding_rect {
            highlight.position.bounding_rect = bounding_rect;
        }
        if let Some(rects) = position.rects {
            highlight.position.rects = rects;
        }
        if let Some(text) = content.text {
            highlight.content.text = Some(text);
        }
        if let Some(image) = content.image {
            highlight.content.image = Some(image);
        }

        debug!(%id, "updated highlight");
        Ok(())
    }

    /// Find a highlight by id
    pub fn lookup(&self, id: HighlightId) -> StoreResult<&Highlight> {
        self.highlights
            .iter()
            .find(|h| h.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// All highlights in rendering stack order (newest first)
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    fn overlaps(&self, a: &Position, b: &Position) -> bool {
        overlap(a, b, self.config.overlap_tolerance)
    }
}

/// Overlap predicate: same line, overlapping horizontal span
///
/// Two highlights overlap iff their bounding rectangles intersect on the
/// horizontal axis and their top edges differ by at most the configured
/// tolerance.
fn overlap(a: &Position, b: &Position, tolerance: f64) -> bool {
    a.bounding_rect.overlaps_horizontally(&b.bounding_rect)
        && (a.bounding_rect.y1 - b.bounding_rect.y1).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_candidate(text: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> HighlightCandidate {
        let rect = Rect::new(x1, y1, x2, y2);
        HighlightCandidate::new(
            Position { page_number: 1, bounding_rect: rect, rects: vec![rect] },
            HighlightContent::text(text),
        )
    }

    #[test]
    fn add_without_overlap_inserts_newest_first() {
        let mut store = HighlightStore::new();

        let first = store.add(text_candidate("alpha", 0.0, 0.0, 40.0, 10.0));
        let second = store.add(text_candidate("beta", 0.0, 100.0, 40.0, 110.0));

        assert!(matches!(first, AddOutcome::Inserted(_)));
        let AddOutcome::Inserted(second_id) = second else {
            panic!("expected insertion");
        };
        assert_eq!(store.len(), 2);
        assert_eq!(store.highlights()[0].id, second_id);
    }

    #[test]
    fn add_over_existing_highlight_toggles_it_off() {
        let mut store = HighlightStore::new();
        store.add(text_candidate("alpha", 10.0, 50.0, 60.0, 60.0));
        assert_eq!(store.len(), 1);

        // Same line (within tolerance), horizontally overlapping span.
        let outcome = store.add(text_candidate("alpha", 30.0, 53.0, 80.0, 63.0));

        assert_eq!(outcome, AddOutcome::Toggled { removed: 1 });
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn add_never_leaves_size_unchanged() {
        let mut store = HighlightStore::new();
        store.add(text_candidate("alpha", 0.0, 0.0, 40.0, 10.0));

        let before = store.len();
        store.add(text_candidate("beta", 0.0, 200.0, 40.0, 210.0));
        assert_eq!(store.len(), before + 1);

        let before = store.len();
        store.add(text_candidate("beta", 10.0, 202.0, 50.0, 212.0));
        assert_eq!(store.len(), before - 1);
    }

    #[test]
    fn toggle_removes_every_overlapping_highlight() {
        let mut store = HighlightStore::new();
        store.add(text_candidate("left", 0.0, 50.0, 30.0, 60.0));
        store.add(text_candidate("right", 60.0, 50.0, 90.0, 60.0));
        assert_eq!(store.len(), 2);

        // Spans both existing highlights on the same line.
        let outcome = store.add(text_candidate("row", 0.0, 51.0, 90.0, 61.0));

        assert_eq!(outcome, AddOutcome::Toggled { removed: 2 });
        assert!(store.is_empty());
    }

    #[test]
    fn same_column_on_distant_lines_does_not_overlap() {
        let mut store = HighlightStore::new();
        store.add(text_candidate("alpha", 10.0, 50.0, 60.0, 60.0));

        let outcome = store.add(text_candidate("beta", 10.0, 70.0, 60.0, 80.0));

        assert!(matches!(outcome, AddOutcome::Inserted(_)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn overlap_tolerance_is_configurable() {
        let mut store = HighlightStore::with_config(StoreConfig { overlap_tolerance: 0.5 });
        store.add(text_candidate("alpha", 10.0, 50.0, 60.0, 60.0));

        // Three units apart: within the default tolerance, outside this one.
        let outcome = store.add(text_candidate("beta", 10.0, 53.0, 60.0, 63.0));

        assert!(matches!(outcome, AddOutcome::Inserted(_)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_batch_skips_overlap_arbitration() {
        let mut store = HighlightStore::new();
        let ids = store.add_batch(vec![
            text_candidate("alpha", 10.0, 50.0, 60.0, 60.0),
            text_candidate("alpha", 12.0, 51.0, 62.0, 61.0),
        ]);

        assert_eq!(ids.len(), 2);
        assert_eq!(store.len(), 2);
        // Batch imports append rather than prepend.
        assert_eq!(store.highlights()[0].id, ids[0]);
    }

    #[test]
    fn update_patches_only_the_targeted_highlight() {
        let mut store = HighlightStore::new();
        let AddOutcome::Inserted(target) = store.add(text_candidate("alpha", 0.0, 0.0, 40.0, 10.0))
        else {
            panic!("expected insertion");
        };
        let AddOutcome::Inserted(other) = store.add(text_candidate("beta", 0.0, 100.0, 40.0, 110.0))
        else {
            panic!("expected insertion");
        };
        let other_before = store.lookup(other).unwrap().clone();

        let resized = Rect::new(5.0, 5.0, 50.0, 20.0);
        store
            .update(target, PositionPatch::bounding_rect(resized), ContentPatch::image(vec![1, 2]))
            .unwrap();

        let updated = store.lookup(target).unwrap();
        assert_eq!(updated.position.bounding_rect, resized);
        assert_eq!(updated.content.image.as_deref(), Some(&[1u8, 2u8][..]));
        // Unpatched fields survive the merge.
        assert_eq!(updated.content.text.as_deref(), Some("alpha"));
        assert_eq!(updated.position.rects.len(), 1);
        assert_eq!(store.lookup(other).unwrap(), &other_before);
    }

    #[test]
    fn update_and_lookup_report_missing_ids() {
        let mut store = HighlightStore::new();
        let missing = HighlightId::new_v4();

        assert!(matches!(
            store.update(missing, PositionPatch::default(), ContentPatch::default()),
            Err(StoreError::NotFound(id)) if id == missing
        ));
        assert!(matches!(store.lookup(missing), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn reset_clears_unconditionally() {
        let mut store = HighlightStore::new();
        store.add(text_candidate("alpha", 0.0, 0.0, 40.0, 10.0));
        store.add(text_candidate("beta", 0.0, 100.0, 40.0, 110.0));

        store.reset();
        assert!(store.is_empty());
    }
}
