//! Whole-document text extraction
//!
//! Fetches every page's text from the rendering collaborator concurrently
//! and joins the results in page order. The concatenated string is the
//! reference the offset reconciler indexes into, so a partial extraction is
//! never returned: any page failure fails the whole operation.

use std::sync::Arc;
use std::thread;

/// Errors that can occur during full-text extraction
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A page's text fetch failed
    #[error("failed to extract text from page {page}: {message}")]
    Page { page: u32, message: String },

    /// A page fetch worker terminated without producing a result
    #[error("page {page} text fetch did not complete")]
    Worker { page: u32 },
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Per-page text retrieval capability of the rendering collaborator
///
/// Implementations fetch the text content of a single page; fetches for
/// different pages are independent and may run concurrently.
pub trait PageTextSource: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Text content of one page (1-based)
    fn page_text(&self, page_number: u32) -> ExtractResult<String>;
}

/// Extract the full document text
///
/// Pages are fetched concurrently, one worker per page, then joined with a
/// single space in page order 1..N regardless of the order the fetches
/// complete. All fetches are awaited before returning; the first page
/// failure (in page order) fails the extraction.
pub fn extract_full_text(source: Arc<dyn PageTextSource>) -> ExtractResult<String> {
    let page_count = source.page_count();

    let handles: Vec<_> = (1..=page_count)
        .map(|page_number| {
            let source = Arc::clone(&source);
            (page_number, thread::spawn(move || source.page_text(page_number)))
        })
        .collect();

    let mut page_texts = Vec::with_capacity(page_count as usize);
    let mut first_error = None;

    // Join every worker even after a failure so no fetch outlives the call.
    for (page_number, handle) in handles {
        match handle.join() {
            Ok(Ok(text)) => page_texts.push(text),
            Ok(Err(error)) => {
                first_error.get_or_insert(error);
            }
            Err(_) => {
                first_error.get_or_insert(ExtractError::Worker { page: page_number });
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(page_texts.join(" ")),
    }
}
