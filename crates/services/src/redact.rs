//! Redaction submission client
//!
//! Hands the full document text and the reconciled character-offset spans to
//! the redaction service. Nothing of the response is consumed beyond
//! success or failure, and a failure must leave the caller's highlight
//! state exactly as it was.

use crate::{http_client, ServiceError, ServiceResult, DEFAULT_MODEL};
use redactor_core::RedactionSpan;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct Redactions<'a> {
    text: &'a str,
    offsets: &'a [RedactionSpan],
}

#[derive(Debug, Serialize)]
struct RedactRequest<'a> {
    model: &'a str,
    redactions: Redactions<'a>,
}

/// Client for the redaction service's `/update` endpoint
pub struct RedactionClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl RedactionClient {
    /// Create a client for a service at the given base URL
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{}/update", base_url.trim_end_matches('/')),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the model named in the submission
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Submit the document text with its redaction offsets
    pub fn submit(&self, text: &str, offsets: &[RedactionSpan]) -> ServiceResult<()> {
        let request = RedactRequest {
            model: &self.model,
            redactions: Redactions { text, offsets },
        };

        self.client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ServiceError::Http { endpoint: self.endpoint.clone(), source })?;

        info!(spans = offsets.len(), "submitted redaction request");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redactor_core::find_offsets;
    use redactor_core::{Highlight, HighlightContent, HighlightId, Position, Rect};

    fn text_highlight(text: &str) -> Highlight {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        Highlight {
            id: HighlightId::new_v4(),
            position: Position { page_number: 1, bounding_rect: rect, rects: vec![rect] },
            content: HighlightContent::text(text),
            comment: String::new(),
        }
    }

    #[test]
    fn request_serializes_offsets_as_triples() {
        let text = "Alice met Bob. Bob left.";
        let offsets = find_offsets(text, &[text_highlight("Bob")]);
        let request = RedactRequest {
            model: "en_core_web_sm",
            redactions: Redactions { text, offsets: &offsets },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "en_core_web_sm",
                "redactions": {
                    "text": "Alice met Bob. Bob left.",
                    "offsets": [[10, 13, "REDACTED"], [15, 18, "REDACTED"]]
                }
            })
        );
    }
}
