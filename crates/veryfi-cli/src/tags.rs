//! # Tag Subcommands

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};

use veryfi_client::blocking::VeryfiClient;

#[derive(Args, Debug)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Subcommand, Debug)]
pub enum TagsCommand {
    /// List tags of a document, or every account tag when no id is given.
    List { document_id: Option<u64> },
    /// Attach tags to a document.
    Add {
        document_id: u64,
        #[arg(required = true)]
        names: Vec<String>,
        /// Replace existing tags instead of adding to them.
        #[arg(long)]
        replace: bool,
    },
    /// Remove one tag from a document.
    Delete { document_id: u64, tag_id: u64 },
}

pub fn run_tags(args: &TagsArgs, client: &VeryfiClient, out: &mut impl Write) -> Result<u8> {
    let tags = client.tags();
    let body = match &args.command {
        TagsCommand::List { document_id: Some(id) } => tags.list(*id)?,
        TagsCommand::List { document_id: None } => tags.list_all()?,
        TagsCommand::Add {
            document_id,
            names,
            replace: true,
        } => tags.replace(*document_id, names)?,
        TagsCommand::Add {
            document_id, names, ..
        } => match names.as_slice() {
            [single] => tags.add(*document_id, single)?,
            _ => tags.add_many(*document_id, names)?,
        },
        TagsCommand::Delete {
            document_id,
            tag_id,
        } => tags.delete(*document_id, *tag_id)?,
    };
    crate::emit(out, &body)
}
