//! Line items of a processed document.
//!
//! Sub-resource of `/partner/documents/{document_id}/line-items/`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::VeryfiError;
use crate::kinds::Document;
use crate::resource::DocumentKind;
use crate::transport::Transport;

/// Line item validation errors, raised before anything is sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineItemError {
    #[error("line item description must not be blank")]
    BlankDescription,
    #[error("line item field {0} must be a finite number")]
    NonFinite(&'static str),
    #[error("line item update must set at least one field")]
    Empty,
    #[error("failed to serialize line item: {0}")]
    Serialization(String),
}

/// Optional fields shared by new and updated line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItemFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl LineItemFields {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn check_numbers(&self) -> Result<(), LineItemError> {
        let numbers = [
            ("tax", self.tax),
            ("price", self.price),
            ("quantity", self.quantity),
            ("tax_rate", self.tax_rate),
            ("discount_rate", self.discount_rate),
        ];
        for (name, value) in numbers {
            finite(name, value)?;
        }
        Ok(())
    }
}

/// A line item to add to a document. `order`, `description` and `total`
/// are required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddLineItem {
    pub order: u32,
    pub description: String,
    pub total: f64,
    #[serde(flatten)]
    pub fields: LineItemFields,
}

impl AddLineItem {
    pub fn new(order: u32, description: impl Into<String>, total: f64) -> Self {
        Self {
            order,
            description: description.into(),
            total,
            fields: LineItemFields::default(),
        }
    }

    pub fn with_fields(mut self, fields: LineItemFields) -> Self {
        self.fields = fields;
        self
    }

    /// Validate and serialize into a request body.
    pub fn to_payload(&self) -> Result<Map<String, Value>, LineItemError> {
        if self.description.trim().is_empty() {
            return Err(LineItemError::BlankDescription);
        }
        finite("total", Some(self.total))?;
        self.fields.check_numbers()?;
        to_map(self)
    }
}

/// Changes to an existing line item. At least one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(flatten)]
    pub fields: LineItemFields,
}

impl UpdateLineItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_payload(&self) -> Result<Map<String, Value>, LineItemError> {
        if self.order.is_none()
            && self.description.is_none()
            && self.total.is_none()
            && self.fields.is_empty()
        {
            return Err(LineItemError::Empty);
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            return Err(LineItemError::BlankDescription);
        }
        finite("total", self.total)?;
        self.fields.check_numbers()?;
        to_map(self)
    }
}

fn finite(name: &'static str, value: Option<f64>) -> Result<(), LineItemError> {
    match value {
        Some(v) if !v.is_finite() => Err(LineItemError::NonFinite(name)),
        _ => Ok(()),
    }
}

fn to_map<T: Serialize>(value: &T) -> Result<Map<String, Value>, LineItemError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(LineItemError::Serialization(format!(
            "expected object, got {other}"
        ))),
        Err(e) => Err(LineItemError::Serialization(e.to_string())),
    }
}

/// Client for document line items.
#[derive(Debug, Clone)]
pub struct LineItems {
    transport: Transport,
}

impl LineItems {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn collection_path(document_id: u64) -> String {
        format!("{}{document_id}/line-items/", Document::PATH)
    }

    fn item_path(document_id: u64, line_item_id: u64) -> String {
        format!("{}{line_item_id}/", Self::collection_path(document_id))
    }

    pub async fn list(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .get(&Self::collection_path(document_id), &Map::new())
            .await
    }

    pub async fn get(&self, document_id: u64, line_item_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .get(&Self::item_path(document_id, line_item_id), &Map::new())
            .await
    }

    /// Add a line item. Invalid items are rejected without a request.
    pub async fn add(&self, document_id: u64, item: &AddLineItem) -> Result<String, VeryfiError> {
        let payload = item.to_payload()?;
        self.transport
            .post_json(&Self::collection_path(document_id), &payload)
            .await
    }

    pub async fn update(
        &self,
        document_id: u64,
        line_item_id: u64,
        changes: &UpdateLineItem,
    ) -> Result<String, VeryfiError> {
        let payload = changes.to_payload()?;
        self.transport
            .put_json(&Self::item_path(document_id, line_item_id), &payload)
            .await
    }

    pub async fn delete(&self, document_id: u64, line_item_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .delete(&Self::item_path(document_id, line_item_id))
            .await
    }

    /// Delete every line item of a document.
    pub async fn delete_all(&self, document_id: u64) -> Result<String, VeryfiError> {
        self.transport
            .delete(&Self::collection_path(document_id))
            .await
    }
}
