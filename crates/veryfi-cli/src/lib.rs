//! # veryfi-cli - command-line client for the Veryfi API
//!
//! Provides the `veryfi` binary. Credentials come from the environment
//! (`VERYFI_CLIENT_ID`, `VERYFI_USERNAME`, `VERYFI_API_KEY`, optionally
//! `VERYFI_CLIENT_SECRET`); response bodies are written to stdout as
//! returned by the API.
//!
//! ```bash
//! veryfi list --kind check --page 1
//! veryfi process --kind document receipt.jpg --category Meals --auto-delete
//! veryfi process-url --kind any-document --blueprint passport https://cdn.example.com/p.png
//! veryfi line-items list 31727276
//! veryfi tags add 31727276 travel q3
//! ```

pub mod classify;
pub mod kind;
pub mod line_items;
pub mod records;
pub mod tags;

use std::io::Write;

use anyhow::{Context, Result};

/// Write a response body to `out`, followed by a newline.
pub fn emit(out: &mut impl Write, body: &str) -> Result<u8> {
    writeln!(out, "{body}").context("failed to write output")?;
    Ok(0)
}
