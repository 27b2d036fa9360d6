//! Boundary clients for the redaction highlighter's external services
//!
//! Typed HTTP clients for the entity classification service, the redaction
//! submission endpoint, and the document tree listing, plus the suggestion
//! workflow that feeds classification results through the core locator into
//! the highlight store.

pub mod classify;
pub mod redact;
pub mod suggest;
pub mod tree;

pub use classify::{ClassificationClient, Entity, REDACTED_LABELS};
pub use redact::RedactionClient;
pub use suggest::{run_suggestion, SuggestionSource};
pub use tree::{DocumentNode, DocumentTree, TreeClient};

use std::time::Duration;

/// spaCy model requested from the classification and redaction services
pub const DEFAULT_MODEL: &str = "en_core_web_sm";

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors that can occur talking to an external service
///
/// There is no automatic retry; a failed call surfaces to the caller, which
/// must leave the highlight state untouched.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The HTTP client could not be constructed
    #[error("failed to create http client: {source}")]
    Client { source: reqwest::Error },

    /// The request failed or the service answered with an error status
    #[error("request to {endpoint} failed: {source}")]
    Http { endpoint: String, source: reqwest::Error },

    /// The service answered 200 with a payload that does not match the contract
    #[error("malformed response from {endpoint}: {source}")]
    Payload { endpoint: String, source: reqwest::Error },
}

/// Result type for service calls
pub type ServiceResult<T> = Result<T, ServiceError>;

fn http_client() -> ServiceResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| ServiceError::Client { source })
}
