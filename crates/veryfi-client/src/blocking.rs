//! Blocking variants of every Veryfi operation.
//!
//! [`VeryfiClient`] owns a current-thread tokio runtime and drives the async
//! client on it. Services mirror their async counterparts method for method
//! and return the same results.
//!
//! # Panics
//!
//! Calling into a blocking client from within an async execution context
//! panics, as with any nested tokio runtime. Use the async client there.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::runtime::Runtime;

use crate::error::VeryfiError;
use crate::kinds;
use crate::line_items::{AddLineItem, UpdateLineItem};
use crate::params::{FileUpload, ListOptions, ProcessOptions};
use crate::resource::DocumentKind;
use crate::VeryfiConfig;

#[derive(Debug, Clone)]
struct Driver {
    rt: Arc<Runtime>,
}

impl Driver {
    fn run<T>(&self, fut: impl Future<Output = Result<T, VeryfiError>>) -> Result<T, VeryfiError> {
        self.rt.block_on(fut)
    }
}

/// Blocking Veryfi client.
#[derive(Debug, Clone)]
pub struct VeryfiClient {
    inner: crate::VeryfiClient,
    driver: Driver,
}

impl VeryfiClient {
    pub fn new(config: VeryfiConfig) -> Result<Self, VeryfiError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(VeryfiError::Runtime)?;
        Ok(Self {
            inner: crate::VeryfiClient::new(config)?,
            driver: Driver { rt: Arc::new(rt) },
        })
    }

    pub fn config(&self) -> &VeryfiConfig {
        self.inner.config()
    }

    pub fn resource<K: DocumentKind>(&self) -> Resource<K> {
        Resource {
            inner: self.inner.resource(),
            driver: self.driver.clone(),
        }
    }

    pub fn documents(&self) -> Resource<kinds::Document> {
        self.resource()
    }

    pub fn any_documents(&self) -> Resource<kinds::AnyDocument> {
        self.resource()
    }

    pub fn bank_statements(&self) -> Resource<kinds::BankStatement> {
        self.resource()
    }

    pub fn business_cards(&self) -> Resource<kinds::BusinessCard> {
        self.resource()
    }

    pub fn checks(&self) -> Resource<kinds::Check> {
        self.resource()
    }

    pub fn w2s(&self) -> Resource<kinds::W2> {
        self.resource()
    }

    pub fn w8s(&self) -> Resource<kinds::W8> {
        self.resource()
    }

    pub fn w9s(&self) -> Resource<kinds::W9> {
        self.resource()
    }

    pub fn contracts(&self) -> Resource<kinds::Contract> {
        self.resource()
    }

    pub fn line_items(&self) -> LineItems {
        LineItems {
            inner: self.inner.line_items(),
            driver: self.driver.clone(),
        }
    }

    pub fn tags(&self) -> Tags {
        Tags {
            inner: self.inner.tags(),
            driver: self.driver.clone(),
        }
    }

    pub fn classify(&self) -> Classify {
        Classify {
            inner: self.inner.classify(),
            driver: self.driver.clone(),
        }
    }

    pub fn split(&self) -> Split {
        Split {
            inner: self.inner.split(),
            driver: self.driver.clone(),
        }
    }
}

/// Blocking service for one document type.
#[derive(Debug, Clone)]
pub struct Resource<K: DocumentKind> {
    inner: crate::Resource<K>,
    driver: Driver,
}

impl<K: DocumentKind> Resource<K> {
    pub fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.list(opts))
    }

    pub fn get(&self, id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.get(id))
    }

    pub fn get_with(&self, id: u64, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.get_with(id, opts))
    }

    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_file(path, opts))
    }

    pub fn process_base64(
        &self,
        file_name: &str,
        file_data: &str,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver
            .run(self.inner.process_base64(file_name, file_data, opts))
    }

    pub fn process_upload(
        &self,
        upload: &FileUpload,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_upload(upload, opts))
    }

    pub fn process_url(&self, file_url: &str, opts: &ProcessOptions) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_url(file_url, opts))
    }

    pub fn process_urls(
        &self,
        file_urls: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_urls(file_urls, opts))
    }

    pub fn update(&self, id: u64, fields: &Map<String, Value>) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.update(id, fields))
    }

    pub fn delete(&self, id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.delete(id))
    }
}

/// Blocking line item service.
#[derive(Debug, Clone)]
pub struct LineItems {
    inner: crate::line_items::LineItems,
    driver: Driver,
}

impl LineItems {
    pub fn list(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.list(document_id))
    }

    pub fn get(&self, document_id: u64, line_item_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.get(document_id, line_item_id))
    }

    pub fn add(&self, document_id: u64, item: &AddLineItem) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.add(document_id, item))
    }

    pub fn update(
        &self,
        document_id: u64,
        line_item_id: u64,
        changes: &UpdateLineItem,
    ) -> Result<String, VeryfiError> {
        self.driver
            .run(self.inner.update(document_id, line_item_id, changes))
    }

    pub fn delete(&self, document_id: u64, line_item_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.delete(document_id, line_item_id))
    }

    pub fn delete_all(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.delete_all(document_id))
    }
}

/// Blocking tag service.
#[derive(Debug, Clone)]
pub struct Tags {
    inner: crate::tags::Tags,
    driver: Driver,
}

impl Tags {
    pub fn list(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.list(document_id))
    }

    pub fn list_all(&self) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.list_all())
    }

    pub fn add(&self, document_id: u64, name: &str) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.add(document_id, name))
    }

    pub fn add_many(&self, document_id: u64, names: &[String]) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.add_many(document_id, names))
    }

    pub fn replace(&self, document_id: u64, names: &[String]) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.replace(document_id, names))
    }

    pub fn delete(&self, document_id: u64, tag_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.delete(document_id, tag_id))
    }

    pub fn delete_all(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.delete_all(document_id))
    }
}

/// Blocking classification service.
#[derive(Debug, Clone)]
pub struct Classify {
    inner: crate::classify::Classify,
    driver: Driver,
}

impl Classify {
    pub fn classify_file(
        &self,
        path: impl AsRef<Path>,
        document_types: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver
            .run(self.inner.classify_file(path, document_types, opts))
    }

    pub fn classify_url(
        &self,
        file_url: &str,
        document_types: &[String],
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver
            .run(self.inner.classify_url(file_url, document_types, opts))
    }
}

/// Blocking document-set service.
#[derive(Debug, Clone)]
pub struct Split {
    inner: crate::split::Split,
    driver: Driver,
}

impl Split {
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_file(path, opts))
    }

    pub fn process_url(&self, file_url: &str, opts: &ProcessOptions) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.process_url(file_url, opts))
    }

    pub fn get(&self, set_id: u64) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.get(set_id))
    }

    pub fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError> {
        self.driver.run(self.inner.list(opts))
    }
}
