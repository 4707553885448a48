//! # Line Item Subcommands
//!
//! - `veryfi line-items list <document-id>`
//! - `veryfi line-items add <document-id> --order 1 --description Coffee --total 4.5`
//! - `veryfi line-items delete <document-id> <line-item-id>`

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use veryfi_client::blocking::VeryfiClient;
use veryfi_client::{AddLineItem, LineItemFields};

#[derive(Args, Debug)]
pub struct LineItemsArgs {
    #[command(subcommand)]
    pub command: LineItemsCommand,
}

#[derive(Subcommand, Debug)]
pub enum LineItemsCommand {
    /// List line items of a document.
    List { document_id: u64 },
    /// Add a line item to a document.
    Add {
        document_id: u64,
        #[arg(long)]
        order: u32,
        #[arg(long)]
        description: String,
        #[arg(long)]
        total: f64,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        sku: Option<String>,
    },
    /// Delete one line item, or all of them with `--all`.
    Delete {
        document_id: u64,
        line_item_id: Option<u64>,
        #[arg(long, conflicts_with = "line_item_id")]
        all: bool,
    },
}

pub fn run_line_items(
    args: &LineItemsArgs,
    client: &VeryfiClient,
    out: &mut impl Write,
) -> Result<u8> {
    let line_items = client.line_items();
    let body = match &args.command {
        LineItemsCommand::List { document_id } => line_items.list(*document_id)?,
        LineItemsCommand::Add {
            document_id,
            order,
            description,
            total,
            quantity,
            price,
            sku,
        } => {
            let item = AddLineItem::new(*order, description.clone(), *total).with_fields(
                LineItemFields {
                    quantity: *quantity,
                    price: *price,
                    sku: sku.clone(),
                    ..Default::default()
                },
            );
            line_items.add(*document_id, &item)?
        }
        LineItemsCommand::Delete {
            document_id,
            line_item_id,
            all,
        } => match (line_item_id, all) {
            (Some(id), false) => line_items.delete(*document_id, *id)?,
            (None, true) => line_items.delete_all(*document_id)?,
            _ => anyhow::bail!("give a line item id or --all"),
        },
    };
    crate::emit(out, &body)
}
