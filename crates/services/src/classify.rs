//! Entity classification client
//!
//! Sends the extracted document text to the classification service and
//! returns the flagged fragments worth highlighting. The service labels
//! every entity it finds; only a fixed allow-list of labels counts as
//! sensitive here.

use crate::{http_client, ServiceError, ServiceResult, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Entity labels treated as sensitive content
pub const REDACTED_LABELS: [&str; 7] =
    ["PERSON", "ORG", "GPE", "DATE", "TIME", "PERCENT", "MONEY"];

/// One entity the classification service found
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entity {
    pub word: String,
    pub label: String,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    result: Vec<Entity>,
}

/// Client for the classification service's `/ent` endpoint
pub struct ClassificationClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl ClassificationClient {
    /// Create a client for a service at the given base URL
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{}/ent", base_url.trim_end_matches('/')),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the model requested from the service
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Classify the document text and return the sensitive fragments
    ///
    /// Entities whose label is outside the allow-list are discarded; the
    /// surviving words feed the text locator.
    pub fn suggest(&self, text: &str) -> ServiceResult<Vec<String>> {
        let response: ClassifyResponse = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { model: &self.model, text })
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ServiceError::Http { endpoint: self.endpoint.clone(), source })?
            .json()
            .map_err(|source| ServiceError::Payload { endpoint: self.endpoint.clone(), source })?;

        let words = flagged_words(response.result);
        debug!(count = words.len(), "classification returned sensitive fragments");
        Ok(words)
    }
}

/// Keep the words whose label is on the allow-list, in service order
fn flagged_words(entities: Vec<Entity>) -> Vec<String> {
    entities
        .into_iter()
        .filter(|entity| REDACTED_LABELS.contains(&entity.label.as_str()))
        .map(|entity| entity.word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(word: &str, label: &str) -> Entity {
        Entity { word: word.to_string(), label: label.to_string() }
    }

    #[test]
    fn only_allow_listed_labels_survive_filtering() {
        let words = flagged_words(vec![
            entity("John Smith", "PERSON"),
            entity("quickly", "ADV"),
            entity("Acme Corp", "ORG"),
            entity("tomorrow", "DATE"),
            entity("the", "DET"),
        ]);

        assert_eq!(words, vec!["John Smith", "Acme Corp", "tomorrow"]);
    }

    #[test]
    fn label_matching_is_exact_and_case_sensitive() {
        let words = flagged_words(vec![entity("x", "person"), entity("y", "PERSONAL")]);
        assert!(words.is_empty());
    }

    #[test]
    fn response_payload_parses_per_contract() {
        let payload = r#"{"result":[{"word":"John Smith","label":"PERSON"}]}"#;
        let response: ClassifyResponse = serde_json::from_str(payload).unwrap();

        assert_eq!(response.result, vec![entity("John Smith", "PERSON")]);
    }

    #[test]
    fn request_carries_model_and_text() {
        let request = ClassifyRequest { model: "en_core_web_sm", text: "Revenue grew." };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "model": "en_core_web_sm", "text": "Revenue grew." })
        );
    }
}
