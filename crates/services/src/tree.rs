//! Document tree listing
//!
//! The listing service describes available documents as a nested mapping of
//! directory names to further mappings, with string leaves for files. The
//! core's only use of it is resolving a leaf path to the URL the rendering
//! collaborator loads; traversal and display of the tree are someone else's
//! concern.

use crate::{http_client, ServiceError, ServiceResult};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Path prefix under which the listing's documents are served
const DOCUMENT_URL_PREFIX: &str = "/api/pdf";

/// One node of the document tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DocumentNode {
    /// Directory: name to child node
    Directory(BTreeMap<String, DocumentNode>),

    /// File leaf
    File(String),
}

/// The available-documents listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentTree {
    #[serde(rename = "data")]
    root: DocumentNode,
}

impl DocumentTree {
    /// Look up the node at a `/`-separated path
    pub fn resolve(&self, path: &str) -> Option<&DocumentNode> {
        let mut node = &self.root;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let DocumentNode::Directory(children) = node else {
                return None;
            };
            node = children.get(segment)?;
        }
        Some(node)
    }

    /// Resolve a leaf path to the document URL to load
    ///
    /// Returns `None` when the path is missing or names a directory.
    pub fn document_url(&self, path: &str) -> Option<String> {
        match self.resolve(path)? {
            DocumentNode::File(_) => Some(format!(
                "{}/{}",
                DOCUMENT_URL_PREFIX,
                path.trim_start_matches('/')
            )),
            DocumentNode::Directory(_) => None,
        }
    }
}

/// Client for the document listing endpoint
pub struct TreeClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl TreeClient {
    /// Create a client for a service at the given base URL
    pub fn new(base_url: &str) -> ServiceResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: format!("{}/list_documents", base_url.trim_end_matches('/')),
        })
    }

    /// Fetch the current document tree
    pub fn list_documents(&self) -> ServiceResult<DocumentTree> {
        self.client
            .get(&self.endpoint)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ServiceError::Http { endpoint: self.endpoint.clone(), source })?
            .json()
            .map_err(|source| ServiceError::Payload { endpoint: self.endpoint.clone(), source })
    }
}
