//! Shared async HTTP transport.
//!
//! Every service goes through [`Transport`]: it resolves the endpoint URL,
//! attaches the credential headers for the request, sends it, and hands back
//! the response body as text. A response that arrives is returned whatever
//! its status; only a failed exchange is an error.
//!
//! With `max_retries` set, GET, PUT and DELETE are retried on transport
//! failure. POST never is.

use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::config::VeryfiConfig;
use crate::credentials::Credentials;
use crate::error::VeryfiError;
use crate::params::{query_pairs, FileUpload};

#[derive(Debug, Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    config: VeryfiConfig,
    credentials: Credentials,
}

enum Payload<'a> {
    Empty,
    Query(&'a Map<String, Value>),
    Json(&'a Map<String, Value>),
    Multipart {
        file: &'a FileUpload,
        fields: &'a Map<String, Value>,
    },
}

impl Payload<'_> {
    fn signed_params(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Empty => None,
            Payload::Query(params) | Payload::Json(params) => Some(*params),
            Payload::Multipart { fields, .. } => Some(*fields),
        }
    }
}

impl Transport {
    pub fn new(config: VeryfiConfig) -> Result<Self, VeryfiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VeryfiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        let credentials = Credentials::from_config(&config);

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                credentials,
            }),
        })
    }

    pub fn config(&self) -> &VeryfiConfig {
        &self.inner.config
    }

    pub async fn get(&self, path: &str, query: &Map<String, Value>) -> Result<String, VeryfiError> {
        let payload = if query.is_empty() {
            Payload::Empty
        } else {
            Payload::Query(query)
        };
        self.execute(Method::GET, path, payload).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &Map<String, Value>,
    ) -> Result<String, VeryfiError> {
        self.execute(Method::POST, path, Payload::Json(body)).await
    }

    pub async fn put_json(
        &self,
        path: &str,
        body: &Map<String, Value>,
    ) -> Result<String, VeryfiError> {
        self.execute(Method::PUT, path, Payload::Json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<String, VeryfiError> {
        self.execute(Method::DELETE, path, Payload::Empty).await
    }

    /// Upload a file as `multipart/form-data`, with `fields` as text parts.
    pub async fn post_multipart(
        &self,
        path: &str,
        file: &FileUpload,
        fields: &Map<String, Value>,
    ) -> Result<String, VeryfiError> {
        self.execute(Method::POST, path, Payload::Multipart { file, fields })
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Payload<'_>,
    ) -> Result<String, VeryfiError> {
        let endpoint = format!("{method} {path}");
        let url = self.inner.config.endpoint_url(path);
        let headers = self.inner.credentials.headers(payload.signed_params())?;
        let retries = if method == Method::POST {
            0
        } else {
            self.inner.config.max_retries
        };

        tracing::debug!(%endpoint, signed = self.inner.credentials.signs_requests(), "sending Veryfi request");

        let resp = crate::retry::retry_send(retries, || {
            let builder = self
                .inner
                .http
                .request(method.clone(), &url)
                .headers(headers.clone());
            let builder = match &payload {
                Payload::Empty => builder,
                Payload::Query(params) => builder.query(&query_pairs(params)),
                Payload::Json(body) => builder.json(body),
                Payload::Multipart { file, fields } => builder.multipart(multipart_form(file, fields)),
            };
            builder.send()
        })
        .await
        .map_err(|e| VeryfiError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(%endpoint, status = status.as_u16(), "Veryfi response");
        } else {
            tracing::warn!(%endpoint, status = status.as_u16(), "Veryfi returned an error status");
        }

        resp.text()
            .await
            .map_err(|e| VeryfiError::Http { endpoint, source: e })
    }
}

fn multipart_form(file: &FileUpload, fields: &Map<String, Value>) -> Form {
    let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
    query_pairs(fields)
        .into_iter()
        .fold(Form::new().part("file", part), |form, (k, v)| form.text(k, v))
}
