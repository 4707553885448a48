//! Document type selection for the record subcommands.
//!
//! The client's services are generic over a marker type; the CLI picks one
//! at runtime, so each is put behind the object-safe [`Service`] trait.

use std::path::Path;

use clap::ValueEnum;
use serde_json::{Map, Value};

use veryfi_client::blocking::{Resource, VeryfiClient};
use veryfi_client::kinds;
use veryfi_client::{DocumentKind, FileUpload, ListOptions, ProcessOptions, VeryfiError};

/// Document types addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentType {
    /// Receipts and invoices.
    Document,
    /// Blueprint-driven extraction (requires `--blueprint`).
    AnyDocument,
    BankStatement,
    BusinessCard,
    Check,
    W2,
    W8,
    W9,
    Contract,
}

/// Runtime-dispatched view of a blocking document-type service.
pub trait Service {
    fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError>;
    fn get(&self, id: u64, opts: &ListOptions) -> Result<String, VeryfiError>;
    fn process_file(&self, path: &Path, opts: &ProcessOptions) -> Result<String, VeryfiError>;
    fn process_upload(&self, upload: &FileUpload, opts: &ProcessOptions)
        -> Result<String, VeryfiError>;
    fn process_urls(&self, urls: &[String], opts: &ProcessOptions) -> Result<String, VeryfiError>;
    fn update(&self, id: u64, fields: &Map<String, Value>) -> Result<String, VeryfiError>;
    fn delete(&self, id: u64) -> Result<String, VeryfiError>;
}

impl<K: DocumentKind> Service for Resource<K> {
    fn list(&self, opts: &ListOptions) -> Result<String, VeryfiError> {
        Resource::list(self, opts)
    }

    fn get(&self, id: u64, opts: &ListOptions) -> Result<String, VeryfiError> {
        Resource::get_with(self, id, opts)
    }

    fn process_file(&self, path: &Path, opts: &ProcessOptions) -> Result<String, VeryfiError> {
        Resource::process_file(self, path, opts)
    }

    fn process_upload(
        &self,
        upload: &FileUpload,
        opts: &ProcessOptions,
    ) -> Result<String, VeryfiError> {
        Resource::process_upload(self, upload, opts)
    }

    fn process_urls(&self, urls: &[String], opts: &ProcessOptions) -> Result<String, VeryfiError> {
        match urls {
            [single] => Resource::process_url(self, single, opts),
            many => Resource::process_urls(self, many, opts),
        }
    }

    fn update(&self, id: u64, fields: &Map<String, Value>) -> Result<String, VeryfiError> {
        Resource::update(self, id, fields)
    }

    fn delete(&self, id: u64) -> Result<String, VeryfiError> {
        Resource::delete(self, id)
    }
}

/// Resolve the service for a document type.
pub fn service(client: &VeryfiClient, kind: DocumentType) -> Box<dyn Service> {
    match kind {
        DocumentType::Document => Box::new(client.resource::<kinds::Document>()),
        DocumentType::AnyDocument => Box::new(client.resource::<kinds::AnyDocument>()),
        DocumentType::BankStatement => Box::new(client.resource::<kinds::BankStatement>()),
        DocumentType::BusinessCard => Box::new(client.resource::<kinds::BusinessCard>()),
        DocumentType::Check => Box::new(client.resource::<kinds::Check>()),
        DocumentType::W2 => Box::new(client.resource::<kinds::W2>()),
        DocumentType::W8 => Box::new(client.resource::<kinds::W8>()),
        DocumentType::W9 => Box::new(client.resource::<kinds::W9>()),
        DocumentType::Contract => Box::new(client.resource::<kinds::Contract>()),
    }
}
