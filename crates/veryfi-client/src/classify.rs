//! Document classification.
//!
//! `POST /partner/classify/` returns the detected document type without
//! running a full extraction.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::VeryfiError;
use crate::params::{self, FileUpload, ProcessOptions};
use crate::transport::Transport;

const CLASSIFY_PATH: &str = "/partner/classify/";

/// Client for the classification endpoint.
#[derive(Debug, Clone)]
pub struct Classify {
    transport: Transport,
}

impl Classify {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Classify a local file. `document_types` narrows the candidates; empty
    /// means every type Veryfi knows.
    pub async fn classify_file(
        &self,
        path: impl AsRef<Path>,
        document_types: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let upload = FileUpload::from_path(path)?;
        let mut payload = params::base64_payload(&upload.file_name, &upload.to_base64(), opts, false);
        insert_document_types(&mut payload, document_types);
        self.transport.post_json(CLASSIFY_PATH, &payload).await
    }

    /// Classify a remote file.
    pub async fn classify_url(
        &self,
        file_url: &str,
        document_types: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let mut payload = params::url_payload(Some(file_url), &[], opts, false);
        insert_document_types(&mut payload, document_types);
        self.transport.post_json(CLASSIFY_PATH, &payload).await
    }
}

fn insert_document_types(payload: &mut Map<String, Value>, document_types: &[String]) {
    if !document_types.is_empty() {
        payload.insert(
            "document_types".into(),
            Value::Array(document_types.iter().cloned().map(Value::String).collect()),
        );
    }
}
