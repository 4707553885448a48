//! # Record Subcommands
//!
//! CRUD-style operations shared by every document type:
//!
//! - `veryfi list --kind <kind>`: page through a collection.
//! - `veryfi get --kind <kind> <id>`: fetch one record.
//! - `veryfi process --kind <kind> <path>`: upload a local file.
//! - `veryfi process-url --kind <kind> <url>...`: process remote files.
//! - `veryfi update --kind <kind> <id> --json '{...}'`: update fields.
//! - `veryfi delete --kind <kind> <id>`: delete a record.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use veryfi_client::blocking::VeryfiClient;
use veryfi_client::{FileUpload, ListOptions, ProcessOptions};

use crate::kind::{service, DocumentType};

/// Record subcommands.
#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List records of a document type.
    List {
        #[command(flatten)]
        target: KindArg,
        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Fetch one record.
    Get {
        #[command(flatten)]
        target: KindArg,
        id: u64,
        #[arg(long)]
        bounding_boxes: bool,
        #[arg(long)]
        confidence_details: bool,
    },
    /// Upload a local file for processing.
    Process {
        #[command(flatten)]
        target: KindArg,
        path: PathBuf,
        /// Send as multipart/form-data instead of base64 JSON.
        #[arg(long)]
        multipart: bool,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Process one or more remote files.
    ProcessUrl {
        #[command(flatten)]
        target: KindArg,
        #[arg(required = true)]
        urls: Vec<String>,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Update fields of a record.
    Update {
        #[command(flatten)]
        target: KindArg,
        id: u64,
        /// JSON object with the fields to change.
        #[arg(long)]
        json: String,
    },
    /// Delete a record.
    Delete {
        #[command(flatten)]
        target: KindArg,
        id: u64,
    },
}

#[derive(Args, Debug)]
pub struct KindArg {
    /// Document type.
    #[arg(long, short, default_value = "document")]
    pub kind: DocumentType,
}

#[derive(Args, Debug, Default)]
pub struct ListingArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
    #[arg(long)]
    pub bounding_boxes: bool,
    #[arg(long)]
    pub confidence_details: bool,
}

impl ListingArgs {
    pub fn to_options(&self) -> ListOptions {
        let mut opts = ListOptions::new()
            .bounding_boxes(self.bounding_boxes)
            .confidence_details(self.confidence_details);
        opts.page = self.page;
        opts.page_size = self.page_size;
        opts
    }
}

#[derive(Args, Debug, Default)]
pub struct ProcessingArgs {
    /// Candidate category; repeat for several. Documents only.
    #[arg(long = "category")]
    pub categories: Vec<String>,
    #[arg(long)]
    pub auto_delete: bool,
    #[arg(long)]
    pub boost: bool,
    #[arg(long)]
    pub external_id: Option<String>,
    #[arg(long)]
    pub max_pages: Option<u32>,
    /// Tag to attach; repeat for several.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Blueprint name for any-document extraction.
    #[arg(long)]
    pub blueprint: Option<String>,
}

impl ProcessingArgs {
    pub fn to_options(&self) -> ProcessOptions {
        let mut opts = ProcessOptions::new()
            .categories(self.categories.iter().cloned())
            .tags(self.tags.iter().cloned());
        if self.auto_delete {
            opts = opts.auto_delete(true);
        }
        if self.boost {
            opts = opts.boost_mode(true);
        }
        if let Some(id) = &self.external_id {
            opts = opts.external_id(id.clone());
        }
        if let Some(pages) = self.max_pages {
            opts = opts.max_pages_to_process(pages);
        }
        if let Some(name) = &self.blueprint {
            opts = opts.blueprint(name.clone());
        }
        opts
    }
}

/// Execute a record subcommand.
pub fn run_records(cmd: &RecordsCommand, client: &VeryfiClient, out: &mut impl Write) -> Result<u8> {
    let body = match cmd {
        RecordsCommand::List { target, listing } => {
            tracing::info!(kind = ?target.kind, "listing records");
            service(client, target.kind).list(&listing.to_options())?
        }
        RecordsCommand::Get {
            target,
            id,
            bounding_boxes,
            confidence_details,
        } => {
            let opts = ListOptions::new()
                .bounding_boxes(*bounding_boxes)
                .confidence_details(*confidence_details);
            service(client, target.kind).get(*id, &opts)?
        }
        RecordsCommand::Process {
            target,
            path,
            multipart,
            processing,
        } => {
            let svc = service(client, target.kind);
            let opts = processing.to_options();
            tracing::info!(kind = ?target.kind, path = %path.display(), "processing file");
            if *multipart {
                let upload = FileUpload::from_path(path)?;
                svc.process_upload(&upload, &opts)?
            } else {
                svc.process_file(path, &opts)?
            }
        }
        RecordsCommand::ProcessUrl {
            target,
            urls,
            processing,
        } => service(client, target.kind).process_urls(urls, &processing.to_options())?,
        RecordsCommand::Update { target, id, json } => {
            let fields = parse_fields(json)?;
            service(client, target.kind).update(*id, &fields)?
        }
        RecordsCommand::Delete { target, id } => service(client, target.kind).delete(*id)?,
    };
    crate::emit(out, &body)
}

/// Parse a `--json` argument into an object of fields.
pub fn parse_fields(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("--json is not valid JSON")?;
    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        Value::Object(_) => bail!("--json must contain at least one field"),
        other => bail!("--json must be a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fields_accepts_object() {
        let fields = parse_fields(r#"{"notes":"paid","total":3}"#).unwrap();
        assert_eq!(fields["notes"], Value::String("paid".into()));
    }

    #[test]
    fn parse_fields_rejects_non_objects_and_empty() {
        assert!(parse_fields("[1,2]").is_err());
        assert!(parse_fields("{}").is_err());
        assert!(parse_fields("not json").is_err());
    }

    #[test]
    fn processing_args_map_onto_options() {
        let args = ProcessingArgs {
            categories: vec!["Meals".into()],
            auto_delete: true,
            boost: false,
            external_id: Some("x-1".into()),
            max_pages: Some(3),
            tags: vec![],
            blueprint: Some("passport".into()),
        };
        let payload = args.to_options().to_payload(true);
        assert_eq!(payload["categories"], serde_json::json!(["Meals"]));
        assert_eq!(payload["auto_delete"], Value::Bool(true));
        assert!(!payload.contains_key("boost_mode"));
        assert_eq!(payload["external_id"], Value::String("x-1".into()));
        assert_eq!(payload["max_pages_to_process"], serde_json::json!(3));
        assert_eq!(payload["blueprint_name"], Value::String("passport".into()));
    }

    #[test]
    fn listing_args_map_onto_query() {
        let args = ListingArgs {
            page: Some(4),
            page_size: None,
            bounding_boxes: false,
            confidence_details: true,
        };
        let query = veryfi_client::params::list_query(&args.to_options());
        assert_eq!(query["page"], serde_json::json!(4));
        assert!(!query.contains_key("page_size"));
        assert_eq!(query["confidence_details"], Value::Bool(true));
    }
}
