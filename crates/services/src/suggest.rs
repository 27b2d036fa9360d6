//! Automated suggestion workflow
//!
//! Drives one round trip of the "Suggest" action: classify the extracted
//! text, locate the flagged fragments in the materialized text layers, and
//! admit the resulting highlights as a batch. Failure anywhere leaves the
//! highlight set unchanged and clears the in-progress indicator.

use crate::classify::ClassificationClient;
use crate::ServiceResult;
use redactor_core::{locate, DocumentSession, HighlightId, PageTextLayer};
use tracing::warn;

/// Source of sensitive-fragment suggestions for a document text
///
/// Implemented by the classification client; kept as a seam so the workflow
/// can be exercised without a live service.
pub trait SuggestionSource {
    fn suggest(&self, text: &str) -> ServiceResult<Vec<String>>;
}

impl SuggestionSource for ClassificationClient {
    fn suggest(&self, text: &str) -> ServiceResult<Vec<String>> {
        ClassificationClient::suggest(self, text)
    }
}

/// Run one suggestion round trip for the session
///
/// Returns the ids of the admitted highlights; an empty list when the
/// session has no extracted text yet. On a classification failure the error
/// is surfaced, the store is untouched, and the suggesting flag is cleared.
pub fn run_suggestion(
    session: &mut DocumentSession,
    source: &dyn SuggestionSource,
    pages: &[PageTextLayer],
) -> ServiceResult<Vec<HighlightId>> {
    if !session.begin_suggestion() {
        return Ok(Vec::new());
    }

    let text = session.full_text().unwrap_or_default().to_string();

    match source.suggest(&text) {
        Ok(fragments) => {
            let candidates = locate(&fragments, pages);
            Ok(session.apply_suggestions(candidates))
        }
        Err(error) => {
            warn!(%error, "suggestion request failed");
            session.suggestion_failed();
            Err(error)
        }
    }
}
