//! Per-document annotation session
//!
//! Owns the mutable state of one active document: its highlight store, the
//! extracted full text, and the in-progress suggestion flag. The session is
//! replaced wholesale when the active document URL changes; there is no
//! partial invalidation. In-flight work from a previous document can still
//! resolve later, so results are identity-checked against the active URL
//! before they are applied.

use crate::highlight::{HighlightCandidate, HighlightId, HighlightStore, StoreConfig};
use crate::offsets::{find_offsets, RedactionSpan};
use tracing::{debug, warn};

/// Document shown before the user picks one from the tree listing
pub const DEFAULT_DOCUMENT_URL: &str = "https://arxiv.org/pdf/1708.08021.pdf";

/// State of one active document
pub struct DocumentSession {
    url: String,
    full_text: Option<String>,
    store: HighlightStore,
    suggesting: bool,
}

impl DocumentSession {
    /// Start a session for the given document URL
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_config(url, StoreConfig::default())
    }

    /// Start a session with an explicit store configuration
    pub fn with_config(url: impl Into<String>, config: StoreConfig) -> Self {
        Self {
            url: url.into(),
            full_text: None,
            store: HighlightStore::with_config(config),
            suggesting: false,
        }
    }

    /// Switch to a different document, replacing all session state
    pub fn open(&mut self, url: impl Into<String>) {
        self.url = url.into();
        self.full_text = None;
        self.suggesting = false;
        self.store.reset();
        debug!(url = %self.url, "opened document");
    }

    /// The active document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Apply an extraction result, guarding against stale completions
    ///
    /// An extraction started for a previous document may resolve after the
    /// URL has changed; it is dropped rather than applied. Returns whether
    /// the text was accepted.
    pub fn apply_extraction(&mut self, url: &str, text: String) -> bool {
        if url != self.url {
            warn!(stale = url, active = %self.url, "dropping extraction for replaced document");
            return false;
        }
        self.full_text = Some(text);
        true
    }

    /// The extracted full text, once extraction has landed
    pub fn full_text(&self) -> Option<&str> {
        self.full_text.as_deref()
    }

    pub fn store(&self) -> &HighlightStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HighlightStore {
        &mut self.store
    }

    /// Mark a suggestion request as in flight
    ///
    /// Suggestions need the extracted text; without it there is nothing to
    /// classify and the request is refused.
    pub fn begin_suggestion(&mut self) -> bool {
        if self.full_text.is_none() {
            return false;
        }
        self.suggesting = true;
        true
    }

    /// Whether a suggestion request is currently in flight
    pub fn is_suggesting(&self) -> bool {
        self.suggesting
    }

    /// Admit located suggestion results and clear the in-flight flag
    pub fn apply_suggestions(&mut self, candidates: Vec<HighlightCandidate>) -> Vec<HighlightId> {
        let ids = self.store.add_batch(candidates);
        self.suggesting = false;
        ids
    }

    /// Record a failed suggestion request
    ///
    /// Clears the in-flight flag; the highlight set is left unchanged.
    pub fn suggestion_failed(&mut self) {
        self.suggesting = false;
    }

    /// Redaction spans for the current highlight set
    ///
    /// `None` until an extraction has been applied. Pure with respect to the
    /// store: a failed submission downstream cannot corrupt the collection.
    pub fn redaction_offsets(&self) -> Option<Vec<RedactionSpan>> {
        let text = self.full_text.as_deref()?;
        Some(find_offsets(text, self.store.highlights()))
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_URL)
    }
}
