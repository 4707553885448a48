//! Document types served by [`Resource`].
//!
//! | Kind | Path |
//! |------|------|
//! | [`Document`] | `/partner/documents/` |
//! | [`AnyDocument`] | `/partner/any-documents/` |
//! | [`BankStatement`] | `/partner/bank-statements/` |
//! | [`BusinessCard`] | `/partner/business-cards/` |
//! | [`Check`] | `/partner/checks/` |
//! | [`W2`] | `/partner/w2s/` |
//! | [`W8`] | `/partner/w-8ben-e/` |
//! | [`W9`] | `/partner/w9s/` |
//! | [`Contract`] | `/partner/contracts/` |

use serde_json::{Map, Value};

use crate::error::VeryfiError;
use crate::resource::{DocumentKind, Resource};

/// Receipts and invoices.
#[derive(Debug, Clone, Copy)]
pub struct Document;

impl DocumentKind for Document {
    const PATH: &'static str = "/partner/documents/";
    const NAME: &'static str = "document";
    const ACCEPTS_CATEGORIES: bool = true;
}

/// Arbitrary documents extracted through a named blueprint.
#[derive(Debug, Clone, Copy)]
pub struct AnyDocument;

impl DocumentKind for AnyDocument {
    const PATH: &'static str = "/partner/any-documents/";
    const NAME: &'static str = "any-document";

    fn check_payload(payload: &Map<String, Value>) -> Result<(), VeryfiError> {
        match payload.get("blueprint_name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Ok(()),
            _ => Err(VeryfiError::InvalidRequest(
                "any-document processing requires a blueprint_name".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BankStatement;

impl DocumentKind for BankStatement {
    const PATH: &'static str = "/partner/bank-statements/";
    const NAME: &'static str = "bank-statement";
}

#[derive(Debug, Clone, Copy)]
pub struct BusinessCard;

impl DocumentKind for BusinessCard {
    const PATH: &'static str = "/partner/business-cards/";
    const NAME: &'static str = "business-card";
}

#[derive(Debug, Clone, Copy)]
pub struct Check;

impl DocumentKind for Check {
    const PATH: &'static str = "/partner/checks/";
    const NAME: &'static str = "check";
}

/// IRS Form W-2.
#[derive(Debug, Clone, Copy)]
pub struct W2;

impl DocumentKind for W2 {
    const PATH: &'static str = "/partner/w2s/";
    const NAME: &'static str = "w2";
}

/// IRS Form W-8BEN-E.
#[derive(Debug, Clone, Copy)]
pub struct W8;

impl DocumentKind for W8 {
    const PATH: &'static str = "/partner/w-8ben-e/";
    const NAME: &'static str = "w8";
}

/// IRS Form W-9.
#[derive(Debug, Clone, Copy)]
pub struct W9;

impl DocumentKind for W9 {
    const PATH: &'static str = "/partner/w9s/";
    const NAME: &'static str = "w9";
}

#[derive(Debug, Clone, Copy)]
pub struct Contract;

impl DocumentKind for Contract {
    const PATH: &'static str = "/partner/contracts/";
    const NAME: &'static str = "contract";
}

pub type Documents = Resource<Document>;
pub type AnyDocuments = Resource<AnyDocument>;
pub type BankStatements = Resource<BankStatement>;
pub type BusinessCards = Resource<BusinessCard>;
pub type Checks = Resource<Check>;
pub type W2s = Resource<W2>;
pub type W8s = Resource<W8>;
pub type W9s = Resource<W9>;
pub type Contracts = Resource<Contract>;
