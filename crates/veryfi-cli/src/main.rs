//! # veryfi CLI entry point
//!
//! Parses command-line arguments, builds a blocking client from the
//! environment, and dispatches to subcommand handlers.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use veryfi_cli::classify::{run_classify, ClassifyArgs};
use veryfi_cli::line_items::{run_line_items, LineItemsArgs};
use veryfi_cli::records::{run_records, RecordsCommand};
use veryfi_cli::tags::{run_tags, TagsArgs};
use veryfi_client::blocking::VeryfiClient;
use veryfi_client::VeryfiConfig;

/// Command-line client for the Veryfi document-extraction API.
///
/// Reads credentials from VERYFI_CLIENT_ID, VERYFI_USERNAME, VERYFI_API_KEY
/// and (optionally) VERYFI_CLIENT_SECRET. Prints response bodies to stdout.
#[derive(Parser, Debug)]
#[command(name = "veryfi", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Records(RecordsCommand),

    /// Detect the type of a document without extracting it.
    Classify(ClassifyArgs),

    /// Manage line items of a document.
    LineItems(LineItemsArgs),

    /// Manage document tags.
    Tags(TagsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = VeryfiConfig::from_env().context("loading Veryfi credentials")?;
    tracing::debug!(?config, "configuration loaded");
    let client = VeryfiClient::new(config)?;
    let mut out = std::io::stdout().lock();

    match &cli.command {
        Commands::Records(cmd) => run_records(cmd, &client, &mut out),
        Commands::Classify(args) => run_classify(args, &client, &mut out),
        Commands::LineItems(args) => run_line_items(args, &client, &mut out),
        Commands::Tags(args) => run_tags(args, &client, &mut out),
    }
}
