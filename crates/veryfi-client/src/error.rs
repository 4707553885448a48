//! Veryfi client error types.

/// Errors from Veryfi API calls.
#[derive(Debug, thiserror::Error)]
pub enum VeryfiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A local file could not be read for upload.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// A credential or signature could not be encoded as a header value.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    /// The request was rejected before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The blocking client could not start its runtime.
    #[error("failed to start blocking runtime: {0}")]
    Runtime(std::io::Error),
    /// Line item payload failed validation.
    #[error(transparent)]
    LineItem(#[from] crate::line_items::LineItemError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
