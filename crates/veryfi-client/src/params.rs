//! Request parameter assembly.
//!
//! Merges caller options with the fixed fields each operation sends. The
//! caller's free-form `extra` map is laid down first and typed options are
//! written over it, so a typed option always wins over an extra key of the
//! same name.

use std::path::Path;

use base64::Engine;
use serde_json::{Map, Value};

use crate::error::VeryfiError;

/// Options for any processing (upload) request.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Candidate categories. Only sent for kinds that accept them.
    pub categories: Vec<String>,
    /// Delete the document from Veryfi once it has been processed.
    pub auto_delete: Option<bool>,
    /// Skip enrichment for faster turnaround.
    pub boost_mode: Option<bool>,
    /// Caller-side identifier stored on the document.
    pub external_id: Option<String>,
    pub max_pages_to_process: Option<u32>,
    pub tags: Vec<String>,
    /// Additional parameters sent verbatim.
    pub extra: Map<String, Value>,
}

impl ProcessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = Some(auto_delete);
        self
    }

    pub fn boost_mode(mut self, boost_mode: bool) -> Self {
        self.boost_mode = Some(boost_mode);
        self
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn max_pages_to_process(mut self, pages: u32) -> Self {
        self.max_pages_to_process = Some(pages);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Blueprint used by any-document extraction.
    pub fn blueprint(self, name: impl Into<String>) -> Self {
        self.param("blueprint_name", name.into())
    }

    /// Add an arbitrary parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Flatten into a payload map.
    pub fn to_payload(&self, include_categories: bool) -> Map<String, Value> {
        let mut payload = self.extra.clone();
        if include_categories && !self.categories.is_empty() {
            payload.insert("categories".into(), string_array(&self.categories));
        }
        if let Some(v) = self.auto_delete {
            payload.insert("auto_delete".into(), Value::Bool(v));
        }
        if let Some(v) = self.boost_mode {
            payload.insert("boost_mode".into(), Value::Bool(v));
        }
        if let Some(v) = &self.external_id {
            payload.insert("external_id".into(), Value::String(v.clone()));
        }
        if let Some(v) = self.max_pages_to_process {
            payload.insert("max_pages_to_process".into(), Value::from(v));
        }
        if !self.tags.is_empty() {
            payload.insert("tags".into(), string_array(&self.tags));
        }
        payload
    }
}

/// Options for collection listings.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Include bounding boxes for extracted fields.
    pub bounding_boxes: bool,
    /// Include per-field confidence scores.
    pub confidence_details: bool,
    /// Additional query parameters sent verbatim.
    pub extra: Map<String, Value>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn bounding_boxes(mut self, on: bool) -> Self {
        self.bounding_boxes = on;
        self
    }

    pub fn confidence_details(mut self, on: bool) -> Self {
        self.confidence_details = on;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Query parameters for a listing, as a map (the form that gets signed).
pub fn list_query(opts: &ListOptions) -> Map<String, Value> {
    let mut query = opts.extra.clone();
    if let Some(page) = opts.page {
        query.insert("page".into(), Value::from(page));
    }
    if let Some(size) = opts.page_size {
        query.insert("page_size".into(), Value::from(size));
    }
    if opts.bounding_boxes {
        query.insert("bounding_boxes".into(), Value::Bool(true));
    }
    if opts.confidence_details {
        query.insert("confidence_details".into(), Value::Bool(true));
    }
    query
}

/// Render a parameter map as URL query pairs.
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect()
}

/// Payload for uploading a base64-encoded file.
pub fn base64_payload(
    file_name: &str,
    file_data: &str,
    opts: &ProcessOptions,
    include_categories: bool,
) -> Map<String, Value> {
    let mut payload = opts.to_payload(include_categories);
    payload.insert("file_name".into(), Value::String(file_name.to_string()));
    payload.insert("file_data".into(), Value::String(file_data.to_string()));
    payload
}

/// Payload for processing one or more remote files.
pub fn url_payload(
    file_url: Option<&str>,
    file_urls: &[String],
    opts: &ProcessOptions,
    include_categories: bool,
) -> Map<String, Value> {
    let mut payload = opts.to_payload(include_categories);
    if let Some(url) = file_url {
        payload.insert("file_url".into(), Value::String(url.to_string()));
    }
    if !file_urls.is_empty() {
        payload.insert("file_urls".into(), string_array(file_urls));
    }
    payload
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// A file held in memory, ready to be sent.
#[derive(Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping its final path component as the name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VeryfiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| VeryfiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_options_win_over_extra() {
        let opts = ProcessOptions::new()
            .param("auto_delete", false)
            .param("compute", true)
            .auto_delete(true);
        let payload = opts.to_payload(false);
        assert_eq!(payload["auto_delete"], json!(true));
        assert_eq!(payload["compute"], json!(true));
    }

    #[test]
    fn categories_only_sent_when_accepted() {
        let opts = ProcessOptions::new().categories(["Fuel", "Meals"]);
        assert_eq!(opts.to_payload(true)["categories"], json!(["Fuel", "Meals"]));
        assert!(!opts.to_payload(false).contains_key("categories"));
    }

    #[test]
    fn empty_options_produce_empty_payload() {
        assert!(ProcessOptions::new().to_payload(true).is_empty());
    }

    #[test]
    fn base64_payload_carries_file_fields() {
        let opts = ProcessOptions::new().boost_mode(true).max_pages_to_process(2);
        let payload = base64_payload("receipt.jpg", "aGVsbG8=", &opts, true);
        assert_eq!(payload["file_name"], json!("receipt.jpg"));
        assert_eq!(payload["file_data"], json!("aGVsbG8="));
        assert_eq!(payload["boost_mode"], json!(true));
        assert_eq!(payload["max_pages_to_process"], json!(2));
    }

    #[test]
    fn url_payload_sets_single_and_multiple_urls() {
        let urls = vec!["https://a/1.jpg".to_string(), "https://a/2.jpg".to_string()];
        let payload = url_payload(Some("https://a/0.jpg"), &urls, &ProcessOptions::new(), false);
        assert_eq!(payload["file_url"], json!("https://a/0.jpg"));
        assert_eq!(payload["file_urls"], json!(["https://a/1.jpg", "https://a/2.jpg"]));

        let single = url_payload(Some("https://a/0.jpg"), &[], &ProcessOptions::new(), false);
        assert!(!single.contains_key("file_urls"));
    }

    #[test]
    fn list_query_only_includes_set_flags() {
        let q = list_query(&ListOptions::new().page(2).page_size(25).bounding_boxes(true));
        assert_eq!(q["page"], json!(2));
        assert_eq!(q["page_size"], json!(25));
        assert_eq!(q["bounding_boxes"], json!(true));
        assert!(!q.contains_key("confidence_details"));
    }

    #[test]
    fn query_pairs_render_strings_without_quotes() {
        let q = list_query(&ListOptions::new().page(1).param("q", "coffee"));
        let pairs = query_pairs(&q);
        assert!(pairs.contains(&("page".to_string(), "1".to_string())));
        assert!(pairs.contains(&("q".to_string(), "coffee".to_string())));
    }

    #[test]
    fn file_upload_from_path_keeps_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        std::fs::write(&path, b"hello").unwrap();

        let upload = FileUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "invoice.pdf");
        assert_eq!(upload.to_base64(), "aGVsbG8=");
    }

    #[test]
    fn file_upload_from_missing_path_is_io_error() {
        let err = FileUpload::from_path("/nonexistent/veryfi/receipt.jpg").unwrap_err();
        assert!(matches!(err, VeryfiError::Io { .. }));
    }
}
