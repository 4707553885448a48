//! Veryfi client configuration.
//!
//! Defaults point to the production API. Override via environment variables
//! or the builder methods for staging and testing.

use url::Url;
use zeroize::Zeroizing;

/// Production API root. The API version is appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.veryfi.com/api/";

/// API version path segment.
pub const DEFAULT_API_VERSION: &str = "v8";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 0;

/// Configuration for connecting to the Veryfi API.
///
/// Custom `Debug` implementation redacts `api_key` and `client_secret`.
/// Both are zeroized on drop.
#[derive(Clone)]
pub struct VeryfiConfig {
    /// Value of the `CLIENT-ID` header.
    pub client_id: String,
    /// Secret used to sign requests. Signing is skipped when absent.
    pub client_secret: Option<Zeroizing<String>>,
    /// Account username, first half of the `apikey` authorization.
    pub username: String,
    /// API key, second half of the `apikey` authorization.
    pub api_key: Zeroizing<String>,
    /// API root, e.g. <https://api.veryfi.com/api/>.
    pub base_url: Url,
    /// Version segment appended to `base_url`, e.g. `v8`.
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry budget for idempotent requests on transport failure. Zero
    /// disables retries.
    pub max_retries: u32,
}

impl std::fmt::Debug for VeryfiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VeryfiConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("username", &self.username)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl VeryfiConfig {
    /// Create a configuration for the production API without request signing.
    pub fn new(
        client_id: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: client_id.into(),
            client_secret: None,
            username: username.into(),
            api_key: Zeroizing::new(api_key.into()),
            base_url: parse_url("base_url", DEFAULT_BASE_URL)?,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Enable HMAC request signing with the given client secret.
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(Zeroizing::new(secret.into()));
        self
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url("base_url", base_url)?;
        Ok(self)
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `VERYFI_CLIENT_ID` (required)
    /// - `VERYFI_USERNAME` (required)
    /// - `VERYFI_API_KEY` (required)
    /// - `VERYFI_CLIENT_SECRET` (optional, enables request signing)
    /// - `VERYFI_URL` (default: `https://api.veryfi.com/api/`)
    /// - `VERYFI_API_VERSION` (default: `v8`)
    /// - `VERYFI_TIMEOUT_SECS` (default: 30)
    /// - `VERYFI_MAX_RETRIES` (default: 0, no retries)
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = required_var("VERYFI_CLIENT_ID")?;
        let username = required_var("VERYFI_USERNAME")?;
        let api_key = required_var("VERYFI_API_KEY")?;

        let base_url = std::env::var("VERYFI_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Self {
            client_id,
            client_secret: std::env::var("VERYFI_CLIENT_SECRET")
                .ok()
                .filter(|s| !s.is_empty())
                .map(Zeroizing::new),
            username,
            api_key: Zeroizing::new(api_key),
            base_url: parse_url("VERYFI_URL", &base_url)?,
            api_version: std::env::var("VERYFI_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.into()),
            timeout_secs: env_number("VERYFI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_retries: env_number("VERYFI_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// Retries are disabled so failure tests stay fast.
    pub fn local_mock(uri: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: "test-client-id".into(),
            client_secret: None,
            username: "test-user".into(),
            api_key: Zeroizing::new("test-api-key".into()),
            base_url: parse_url("local_mock", uri)?,
            api_version: DEFAULT_API_VERSION.into(),
            timeout_secs: 5,
            max_retries: 0,
        })
    }

    /// Full URL for an API path such as `/partner/documents/`.
    pub fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        format!("{base}/{version}/{}", path.trim_start_matches('/'))
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn env_number<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(var.to_string(), raw)),
        Err(_) => Ok(default),
    }
}

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
}
