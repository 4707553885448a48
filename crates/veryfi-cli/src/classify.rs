//! # Classify Subcommand
//!
//! `veryfi classify <path-or-url> [--type receipt --type invoice]`

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Args;

use veryfi_client::blocking::VeryfiClient;
use veryfi_client::ProcessOptions;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Local file path, or an http(s) URL.
    pub source: String,
    /// Restrict classification to these types; repeat for several.
    #[arg(long = "type")]
    pub document_types: Vec<String>,
}

/// Whether a source argument names a remote file.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn run_classify(args: &ClassifyArgs, client: &VeryfiClient, out: &mut impl Write) -> Result<u8> {
    let classify = client.classify();
    let opts = ProcessOptions::new();
    let body = if is_remote(&args.source) {
        classify.classify_url(&args.source, &args.document_types, &opts)?
    } else {
        classify.classify_file(Path::new(&args.source), &args.document_types, &opts)?
    };
    crate::emit(out, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_sources_are_detected_by_scheme() {
        assert!(is_remote("https://cdn.example.com/a.pdf"));
        assert!(is_remote("http://localhost/a.pdf"));
        assert!(!is_remote("./https-receipt.pdf"));
        assert!(!is_remote("/tmp/a.pdf"));
    }
}
