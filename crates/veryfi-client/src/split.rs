//! Split a multi-document PDF into individual documents.
//!
//! Each submission creates a document set at `/partner/documents-set/`
//! whose members are processed as ordinary documents.

use std::path::Path;

use serde_json::Map;

use crate::error::VeryfiError;
use crate::params::{self, FileUpload, ListOptions, ProcessOptions};
use crate::transport::Transport;

const DOCUMENT_SET_PATH: &str = "/partner/documents-set/";

/// Client for document sets.
#[derive(Debug, Clone)]
pub struct Split {
    transport: Transport,
}

impl Split {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Split and process a local PDF.
    pub async fn process_file(
        &self,
        path: impl AsRef<Path>,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let upload = FileUpload::from_path(path)?;
        let payload = params::base64_payload(&upload.file_name, &upload.to_base64(), opts, true);
        self.transport.post_json(DOCUMENT_SET_PATH, &payload).await
    }

    /// Split and process a remote PDF.
    pub async fn process_url(
        &self,
        file_url: &str,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let payload = params::url_payload(Some(file_url), &[], opts, true);
        self.transport.post_json(DOCUMENT_SET_PATH, &payload).await
    }

    /// A document set with the documents it was split into.
    pub async fn get(&self, set_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .get(&format!("{DOCUMENT_SET_PATH}{set_id}/"), &Map::new())
            .await
    }

    pub async fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.transport
            .get(DOCUMENT_SET_PATH, &params::list_query(opts))
            .await
    }
}
