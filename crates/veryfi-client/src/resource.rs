//! Generic document-type service.
//!
//! Every Veryfi document type exposes the same operations against its own
//! collection path. [`Resource`] implements them once; the document type is
//! a marker implementing [`DocumentKind`] (see [`crate::kinds`]).
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `{path}` | [`Resource::list`] |
//! | GET    | `{path}{id}/` | [`Resource::get`] |
//! | POST   | `{path}` | `process_*` |
//! | PUT    | `{path}{id}/` | [`Resource::update`] |
//! | DELETE | `{path}{id}/` | [`Resource::delete`] |

use std::marker::PhantomData;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::VeryfiError;
use crate::params::{self, FileUpload, ListOptions, ProcessOptions};
use crate::transport::Transport;

/// A Veryfi document type.
pub trait DocumentKind: Send + Sync + 'static {
    /// Collection path, with leading and trailing slash.
    const PATH: &'static str;
    /// Human-readable name for logs.
    const NAME: &'static str;
    /// Whether processing requests carry `categories`.
    const ACCEPTS_CATEGORIES: bool = false;

    /// Reject a processing payload before it is sent.
    fn check_payload(_payload: &Map<String, Value>) -> Result<(), VeryfiError> {
        Ok(())
    }
}

/// Service for one document type.
pub struct Resource<K> {
    transport: Transport,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: DocumentKind> std::fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::NAME)
            .field("path", &K::PATH)
            .finish()
    }
}

impl<K: DocumentKind> Resource<K> {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    /// Path of a single item.
    pub fn item_path(id: u64) -> String {
        format!("{}{id}/", K::PATH)
    }

    /// List items of this type.
    pub async fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.transport.get(K::PATH, &params::list_query(opts)).await
    }

    /// Fetch one item.
    pub async fn get(&self, id: u64) -> Result<String, VeryfiError> {
        self.transport.get(&Self::item_path(id), &Map::new()).await
    }

    /// Fetch one item with listing flags such as `bounding_boxes`.
    pub async fn get_with(&self, id: u64, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.transport
            .get(&Self::item_path(id), &params::list_query(opts))
            .await
    }

    /// Read a local file, base64-encode it, and submit it for processing.
    pub async fn process_file(
        &self,
        path: impl AsRef<Path>,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let upload = FileUpload::from_path(path)?;
        self.process_base64(&upload.file_name, &upload.to_base64(), opts)
            .await
    }

    /// Submit already base64-encoded file data.
    pub async fn process_base64(
        &self,
        file_name: &str,
        file_data: &str,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let payload = params::base64_payload(file_name, file_data, opts, K::ACCEPTS_CATEGORIES);
        self.submit(&payload).await
    }

    /// Submit a file as `multipart/form-data`.
    pub async fn process_upload(
        &self,
        upload: &FileUpload,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let fields = opts.to_payload(K::ACCEPTS_CATEGORIES);
        K::check_payload(&fields)?;
        tracing::debug!(kind = K::NAME, file_name = %upload.file_name, "uploading file");
        self.transport
            .post_multipart(K::PATH, upload, &fields)
            .await
    }

    /// Submit a publicly reachable file URL.
    pub async fn process_url(
        &self,
        file_url: &str,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        let payload = params::url_payload(Some(file_url), &[], opts, K::ACCEPTS_CATEGORIES);
        self.submit(&payload).await
    }

    /// Submit several file URLs that make up one item.
    pub async fn process_urls(
        &self,
        file_urls: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        if file_urls.is_empty() {
            return Err(VeryfiError::InvalidRequest(
                "at least one file URL is required".into(),
            ));
        }
        let payload = params::url_payload(None, file_urls, opts, K::ACCEPTS_CATEGORIES);
        self.submit(&payload).await
    }

    /// Update fields of an item.
    pub async fn update(&self, id: u64, fields: &Map<String, Value>) -> Result<String, VeryfiError> {
        if fields.is_empty() {
            return Err(VeryfiError::InvalidRequest(
                "update requires at least one field".into(),
            ));
        }
        self.transport.put_json(&Self::item_path(id), fields).await
    }

    /// Delete an item.
    pub async fn delete(&self, id: u64) -> Result<String, VeryfiError> {
        self.transport.delete(&Self::item_path(id)).await
    }

    async fn submit(&self, payload: &Map<String, Value>) -> Result<String, VeryfiError> {
        K::check_payload(payload)?;
        tracing::debug!(kind = K::NAME, "submitting for processing");
        self.transport.post_json(K::PATH, payload).await
    }
}
