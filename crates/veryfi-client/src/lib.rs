//! # veryfi-client -- Typed Rust client for the Veryfi API
//!
//! One service per document type, all sharing the same request path:
//! - **Documents** (receipts, invoices) with their **line items** and **tags**
//! - **Any-documents** via named blueprints
//! - **Bank statements**, **business cards**, **checks**, **contracts**
//! - **W-2**, **W-8BEN-E** and **W-9** tax forms
//! - **Classification** and **PDF splitting**
//!
//! Each operation assembles its parameters, attaches the credential headers
//! (signed with HMAC-SHA256 when a client secret is configured), calls the
//! API, and returns the raw response body as text.
//!
//! ## Async and blocking
//!
//! [`VeryfiClient`] is async. [`blocking::VeryfiClient`] drives the same
//! calls on an internal runtime for synchronous callers.
//!
//! ```no_run
//! use veryfi_client::{ListOptions, ProcessOptions, VeryfiClient, VeryfiConfig};
//!
//! # async fn run() -> Result<(), veryfi_client::VeryfiError> {
//! let client = VeryfiClient::new(VeryfiConfig::from_env()?)?;
//! let body = client
//!     .documents()
//!     .process_url(
//!         "https://cdn.example.com/receipt.jpg",
//!         &ProcessOptions::new().categories(["Meals"]).auto_delete(true),
//!     )
//!     .await?;
//! println!("{body}");
//! let page = client.checks().list(&ListOptions::new().page(1)).await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```
//!
//! ## API Path Convention
//!
//! Full URL pattern: `{base_url}{api_version}/partner/{resource}/`,
//! e.g. `https://api.veryfi.com/api/v8/partner/documents/`.

pub mod blocking;
pub mod classify;
pub mod config;
pub mod credentials;
pub mod error;
pub mod kinds;
pub mod line_items;
pub mod params;
pub mod resource;
pub(crate) mod retry;
pub mod split;
pub mod tags;
pub mod transport;

pub use config::VeryfiConfig;
pub use error::VeryfiError;
pub use line_items::{AddLineItem, LineItemFields, UpdateLineItem};
pub use params::{FileUpload, ListOptions, ProcessOptions};
pub use resource::{DocumentKind, Resource};

use transport::Transport;

/// Top-level async Veryfi client. Cheap to clone; services share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct VeryfiClient {
    transport: Transport,
}

impl VeryfiClient {
    /// Create a new client from configuration.
    pub fn new(config: VeryfiConfig) -> Result<Self, VeryfiError> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    pub fn config(&self) -> &VeryfiConfig {
        self.transport.config()
    }

    /// Service for any document type, chosen by marker.
    pub fn resource<K: DocumentKind>(&self) -> Resource<K> {
        Resource::new(self.transport.clone())
    }

    /// Receipts and invoices.
    pub fn documents(&self) -> kinds::Documents {
        self.resource()
    }

    /// Blueprint-driven extraction of arbitrary documents.
    pub fn any_documents(&self) -> kinds::AnyDocuments {
        self.resource()
    }

    pub fn bank_statements(&self) -> kinds::BankStatements {
        self.resource()
    }

    pub fn business_cards(&self) -> kinds::BusinessCards {
        self.resource()
    }

    pub fn checks(&self) -> kinds::Checks {
        self.resource()
    }

    pub fn w2s(&self) -> kinds::W2s {
        self.resource()
    }

    pub fn w8s(&self) -> kinds::W8s {
        self.resource()
    }

    pub fn w9s(&self) -> kinds::W9s {
        self.resource()
    }

    pub fn contracts(&self) -> kinds::Contracts {
        self.resource()
    }

    /// Line items of documents.
    pub fn line_items(&self) -> line_items::LineItems {
        line_items::LineItems::new(self.transport.clone())
    }

    /// Tags on documents.
    pub fn tags(&self) -> tags::Tags {
        tags::Tags::new(self.transport.clone())
    }

    pub fn classify(&self) -> classify::Classify {
        classify::Classify::new(self.transport.clone())
    }

    /// Multi-document PDF splitting.
    pub fn split(&self) -> split::Split {
        split::Split::new(self.transport.clone())
    }
}
