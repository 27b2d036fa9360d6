//! Redactor Core Library
//!
//! Annotation geometry and matching core for the PDF redaction highlighter:
//! the highlight collection and its overlap-toggle semantics, coordinate
//! normalization between viewport and scaled space, text-to-geometry
//! location of classifier-proposed fragments, whole-document text
//! extraction, and reconciliation of highlights back onto character offsets
//! for redaction.

pub mod coords;
pub mod extract;
pub mod highlight;
pub mod locator;
pub mod offsets;
pub mod session;
pub mod text_layer;

pub use coords::{
    position_to_scaled, position_to_viewport, to_scaled, to_viewport, PageViewport, Rect,
};
pub use extract::{extract_full_text, ExtractError, ExtractResult, PageTextSource};
pub use highlight::{
    AddOutcome, ContentPatch, Highlight, HighlightCandidate, HighlightContent, HighlightId,
    HighlightStore, Position, PositionPatch, StoreConfig, StoreError, StoreResult,
};
pub use locator::locate;
pub use offsets::{find_offsets, RedactionSpan, REDACTION_LABEL};
pub use session::{DocumentSession, DEFAULT_DOCUMENT_URL};
pub use text_layer::{PageTextLayer, TextRun};
