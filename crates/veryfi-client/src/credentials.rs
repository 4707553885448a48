//! Authentication headers and request signing.
//!
//! Every request carries the static `CLIENT-ID` and `AUTHORIZATION` headers.
//! When a client secret is configured, the request is additionally signed:
//!
//! ```text
//! X-Veryfi-Request-Timestamp: <unix millis>
//! X-Veryfi-Request-Signature: base64(HMAC-SHA256(secret, "timestamp:<ts>,<k1>:<v1>,<k2>:<v2>..."))
//! ```
//!
//! Payload entries are visited in key order. String values are written raw,
//! every other JSON value in its compact JSON form.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use ring::hmac;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

use crate::config::VeryfiConfig;
use crate::error::VeryfiError;

pub const CLIENT_ID_HEADER: &str = "CLIENT-ID";
pub const TIMESTAMP_HEADER: &str = "X-Veryfi-Request-Timestamp";
pub const SIGNATURE_HEADER: &str = "X-Veryfi-Request-Signature";

/// `User-Agent` sent with every request.
pub const SDK_USER_AGENT: &str = concat!("Rust Veryfi-Rust/", env!("CARGO_PKG_VERSION"));

/// Credential material for one client, ready to produce per-request headers.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    authorization: Zeroizing<String>,
    signing_key: Option<hmac::Key>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("authorization", &"[REDACTED]")
            .field("signing", &self.signing_key.is_some())
            .finish()
    }
}

impl Credentials {
    pub fn from_config(config: &VeryfiConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            authorization: Zeroizing::new(format!(
                "apikey {}:{}",
                config.username,
                config.api_key.as_str()
            )),
            signing_key: config
                .client_secret
                .as_ref()
                .map(|secret| hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes())),
        }
    }

    /// Whether requests are signed.
    pub fn signs_requests(&self) -> bool {
        self.signing_key.is_some()
    }

    /// Build the header set for one request, stamped with the current time.
    pub fn headers(&self, payload: Option<&Map<String, Value>>) -> Result<HeaderMap, VeryfiError> {
        self.headers_at(now_millis(), payload)
    }

    /// Build the header set for one request at a fixed timestamp.
    pub fn headers_at(
        &self,
        timestamp_ms: u64,
        payload: Option<&Map<String, Value>>,
    ) -> Result<HeaderMap, VeryfiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("client-id"),
            HeaderValue::from_str(&self.client_id)
                .map_err(|_| VeryfiError::InvalidHeader(CLIENT_ID_HEADER))?,
        );
        let mut authorization = HeaderValue::from_str(&self.authorization)
            .map_err(|_| VeryfiError::InvalidHeader("AUTHORIZATION"))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        if let Some(signature) = self.sign(timestamp_ms, payload) {
            headers.insert(
                HeaderName::from_static("x-veryfi-request-timestamp"),
                HeaderValue::from(timestamp_ms),
            );
            headers.insert(
                HeaderName::from_static("x-veryfi-request-signature"),
                HeaderValue::from_str(&signature)
                    .map_err(|_| VeryfiError::InvalidHeader(SIGNATURE_HEADER))?,
            );
        }

        Ok(headers)
    }

    /// Compute the request signature, or `None` when no secret is configured.
    pub fn sign(&self, timestamp_ms: u64, payload: Option<&Map<String, Value>>) -> Option<String> {
        let key = self.signing_key.as_ref()?;
        let message = signing_message(timestamp_ms, payload);
        let tag = hmac::sign(key, message.as_bytes());
        Some(base64::engine::general_purpose::STANDARD.encode(tag.as_ref()))
    }
}

/// The string that is fed to HMAC for a request.
pub fn signing_message(timestamp_ms: u64, payload: Option<&Map<String, Value>>) -> String {
    let mut message = format!("timestamp:{timestamp_ms}");
    for (key, value) in payload.into_iter().flatten() {
        message.push(',');
        message.push_str(key);
        message.push(':');
        match value {
            Value::String(s) => message.push_str(s),
            other => message.push_str(&other.to_string()),
        }
    }
    message
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials(secret: Option<&str>) -> Credentials {
        let mut cfg = VeryfiConfig::new("client-123", "jane", "key-456").unwrap();
        if let Some(secret) = secret {
            cfg = cfg.with_client_secret(secret);
        }
        Credentials::from_config(&cfg)
    }

    fn as_map(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn static_headers_are_always_present() {
        let headers = credentials(None).headers_at(1, None).unwrap();
        assert_eq!(headers["client-id"], "client-123");
        assert_eq!(headers[AUTHORIZATION], "apikey jane:key-456");
        assert_eq!(headers[ACCEPT], "application/json");
        assert!(headers[USER_AGENT]
            .to_str()
            .unwrap()
            .starts_with("Rust Veryfi-Rust/"));
    }

    #[test]
    fn unsigned_client_omits_signature_headers() {
        let creds = credentials(None);
        assert!(!creds.signs_requests());
        let headers = creds.headers_at(1_700_000_000_000, None).unwrap();
        assert!(headers.get(TIMESTAMP_HEADER).is_none());
        assert!(headers.get(SIGNATURE_HEADER).is_none());
    }

    #[test]
    fn signing_message_renders_strings_raw_and_other_values_as_json() {
        let payload = as_map(json!({
            "file_url": "https://cdn.example.com/receipt.jpg",
            "categories": ["Fuel", "Meals"],
            "auto_delete": true,
        }));
        assert_eq!(
            signing_message(1_700_000_000_000, Some(&payload)),
            "timestamp:1700000000000,auto_delete:true,categories:[\"Fuel\",\"Meals\"],file_url:https://cdn.example.com/receipt.jpg"
        );
    }

    #[test]
    fn signature_matches_reference_hmac_for_empty_payload() {
        let creds = credentials(Some("test-secret"));
        assert_eq!(
            creds.sign(1_700_000_000_000, None).as_deref(),
            Some("QCEsYwihN88QnaqNskxgkU1vUdCL7ikpRoc8B42hDhM=")
        );
    }

    #[test]
    fn signature_matches_reference_hmac_for_payload() {
        let creds = credentials(Some("test-secret"));
        let payload = as_map(json!({
            "file_url": "https://cdn.example.com/receipt.jpg",
            "categories": ["Fuel", "Meals"],
            "auto_delete": true,
        }));
        let headers = creds.headers_at(1_700_000_000_000, Some(&payload)).unwrap();
        assert_eq!(headers[TIMESTAMP_HEADER], "1700000000000");
        assert_eq!(
            headers[SIGNATURE_HEADER],
            "eakArpAUjxX8h6DYkaWNvfrH5OlfE1tJ3Afv3V3t4n0="
        );
    }

    #[test]
    fn signature_changes_with_timestamp() {
        let creds = credentials(Some("test-secret"));
        assert_ne!(creds.sign(1, None), creds.sign(2, None));
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let rendered = format!("{:?}", credentials(Some("s")));
        assert!(!rendered.contains("key-456"));
    }

    #[test]
    fn non_ascii_client_id_is_rejected() {
        let cfg = VeryfiConfig::new("client\n123", "jane", "key").unwrap();
        let err = Credentials::from_config(&cfg).headers_at(1, None).unwrap_err();
        assert!(matches!(err, VeryfiError::InvalidHeader(CLIENT_ID_HEADER)));
    }
}
