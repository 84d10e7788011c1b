//! HTTP transport for the IremboPay API.
//!
//! Every call follows the same pipeline: build the URL, attach the default
//! headers (caller headers override them), send with the configured timeout
//! while racing the cancellation token, read the whole body, then classify.
//!
//! # Response classification
//!
//! - Non-2xx: `IremboPayError::Api`, with the message taken from the body's
//!   non-empty `error` field, else non-empty `message`, else the raw body text.
//! - 2xx: the `{success, message, data}` envelope is decoded; `success:
//!   false` becomes `IremboPayError::Unsuccessful` and `data` is decoded into
//!   the caller's type.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tokio_util::sync::CancellationToken;

use super::credentials::{Credentials, API_VERSION_HEADER, SECRET_KEY_HEADER};
use crate::domain::{ApiError, IdempotencyKey, IremboPayError, IDEMPOTENCY_KEY_HEADER};

/// Description of a single API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,

    /// Path beginning with `/`, already percent-encoded.
    pub path: String,

    pub body: Option<serde_json::Value>,

    /// Extra headers; these replace defaults with the same name.
    pub headers: Vec<(String, String)>,

    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, IremboPayError> {
        let value =
            serde_json::to_value(body).map_err(|e| IremboPayError::Serialization(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds the `Idempotency-Key` header when a key is given.
    pub fn with_idempotency_key(self, key: Option<&IdempotencyKey>) -> Self {
        match key {
            Some(key) => self.with_header(IDEMPOTENCY_KEY_HEADER, key.as_str()),
            None => self,
        }
    }
}

/// Standard response wrapper returned on 2xx.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    data: Option<Box<RawValue>>,
}

/// Body shape of non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

/// Executes API requests against one host with one set of credentials.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    credentials: Arc<Credentials>,
    client: Client,
    timeout: Duration,
}

impl ApiTransport {
    /// Creates a transport with a fixed per-request timeout.
    pub fn new(credentials: Arc<Credentials>, timeout: Duration) -> Result<Self, IremboPayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IremboPayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            client,
            timeout,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Full URL for `request`, with query parameters percent-encoded.
    ///
    /// The path must start with `/` and the result must stay on the
    /// configured host; the secret key header is only ever sent there.
    pub fn build_url(&self, request: &ApiRequest) -> Result<Url, IremboPayError> {
        if !request.path.starts_with('/') {
            return Err(IremboPayError::InvalidRequest(format!(
                "path must start with '/': {}",
                request.path
            )));
        }

        let base_url = self.credentials.base_url();
        let base = Url::parse(&base_url).map_err(|e| {
            IremboPayError::InvalidRequest(format!("invalid base URL {}: {}", base_url, e))
        })?;
        let raw = format!("{}{}", base_url, request.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| IremboPayError::InvalidRequest(format!("invalid URL {}: {}", raw, e)))?;

        if url.host_str() != base.host_str()
            || url.port_or_known_default() != base.port_or_known_default()
        {
            return Err(IremboPayError::InvalidRequest(format!(
                "path {} leaves the configured host {}",
                request.path,
                self.credentials.host()
            )));
        }

        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &request.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Sends `request` and decodes the envelope's `data` into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T, IremboPayError> {
        let body = self.round_trip(request, cancel).await?;
        decode_envelope(&body)
    }

    /// Sends `request` and checks only the status code.
    pub async fn dispatch(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<(), IremboPayError> {
        self.round_trip(request, cancel).await.map(|_| ())
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn round_trip(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, IremboPayError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(method = %request.method, path = %request.path, "Request cancelled");
                Err(IremboPayError::Cancelled)
            }
            result = self.send(&request) => result,
        }
    }

    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>, IremboPayError> {
        let url = self.build_url(request)?;
        let headers = self.headers_for(request)?;

        tracing::debug!(method = %request.method, path = %request.path, "Sending IremboPay request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            let bytes =
                serde_json::to_vec(body).map_err(|e| IremboPayError::Serialization(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| self.map_reqwest_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_reqwest_error(e))?
            .to_vec();

        if !(200..300).contains(&status) {
            let err = api_error(status, &body);
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status,
                message = %err.message,
                "IremboPay API error"
            );
            return Err(IremboPayError::Api(err));
        }

        Ok(body)
    }

    /// Default headers first, then caller headers replacing any with the same name.
    fn headers_for(&self, request: &ApiRequest) -> Result<HeaderMap, IremboPayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut secret = header_value(self.credentials.secret_key())?;
        secret.set_sensitive(true);
        headers.insert(header_name(SECRET_KEY_HEADER)?, secret);
        headers.insert(
            header_name(API_VERSION_HEADER)?,
            header_value(self.credentials.api_version())?,
        );

        for (name, value) in &request.headers {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        Ok(headers)
    }

    fn map_reqwest_error(&self, e: reqwest::Error) -> IremboPayError {
        if e.is_timeout() {
            IremboPayError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            IremboPayError::Transport(format!("Connection failed: {}", e))
        } else {
            IremboPayError::Transport(e.to_string())
        }
    }
}

fn header_name(name: &str) -> Result<HeaderName, IremboPayError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| IremboPayError::InvalidRequest(format!("header {}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue, IremboPayError> {
    HeaderValue::from_str(value)
        .map_err(|e| IremboPayError::InvalidRequest(format!("invalid header value: {}", e)))
}

/// Builds the error for a non-2xx response.
fn api_error(status: u16, body: &[u8]) -> ApiError {
    let text = String::from_utf8_lossy(body).into_owned();

    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .error
            .filter(|e| !e.is_empty())
            .or(parsed.message.filter(|m| !m.is_empty()))
            .unwrap_or_else(|| text.clone()),
        Err(_) => text.clone(),
    };

    ApiError::new(status, message, text)
}

/// Decodes a 2xx body's envelope and its `data` payload.
fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, IremboPayError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| IremboPayError::Decode(format!("invalid response envelope: {}", e)))?;

    if !envelope.success.unwrap_or_default() {
        let message = envelope.message.unwrap_or_default();
        tracing::warn!(message = %message, "IremboPay request unsuccessful");
        return Err(IremboPayError::Unsuccessful { message });
    }

    let data = envelope.data.as_deref().map(RawValue::get).unwrap_or("null");
    serde_json::from_str(data)
        .map_err(|e| IremboPayError::Decode(format!("invalid response data: {}", e)))
}
