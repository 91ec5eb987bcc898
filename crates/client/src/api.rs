//! HTTP transport for the record endpoints.
//!
//! Wraps `POST /api/v1/internal/record` using [`reqwest`] and decodes the
//! server's response envelopes into [`CreatedRecord`] or [`ClientError`].

use std::sync::Arc;

use async_trait::async_trait;
use dataflow_core::record::{CreateRecord, CreatedRecord};
use dataflow_core::validation::{summarize, FieldViolation};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ClientConfig;

/// Path of the create endpoint, relative to the server origin.
pub const RECORD_PATH: &str = "/api/v1/internal/record";

/// Label the server puts on shape and validation failures.
const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Errors from the record API layer, one per kind of server answer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server rejected the payload field by field.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),

    /// The server refused the record for a domain reason.
    #[error("{0}")]
    BusinessRule(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx answer.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Anything that can carry a create-record request to the server.
#[async_trait]
pub trait RecordTransport: Send + Sync {
    async fn create_record(&self, input: &CreateRecord) -> Result<CreatedRecord, ClientError>;
}

#[async_trait]
impl<T: RecordTransport + ?Sized> RecordTransport for Arc<T> {
    async fn create_record(&self, input: &CreateRecord) -> Result<CreatedRecord, ClientError> {
        (**self).create_record(input).await
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Vec<FieldViolation>,
}

/// HTTP client for a single DataFlow server.
#[derive(Debug, Clone)]
pub struct RecordApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RecordApi {
    /// Create a client for the server at `base_url`, e.g. `http://host:3000`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }

    /// Build a client from [`ClientConfig`], applying its request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.token.clone(),
        ))
    }

    // ---- private helpers ----

    /// Map a non-2xx response to the matching [`ClientError`].
    async fn error_from_response(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(&body) else {
            return ClientError::Server {
                status: status.as_u16(),
                message: body,
            };
        };

        match status {
            StatusCode::BAD_REQUEST if error.code.as_deref() == Some(VALIDATION_ERROR) => {
                ClientError::Validation(error.details)
            }
            StatusCode::BAD_REQUEST => ClientError::BusinessRule(error.message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(error.message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message: error.message,
            },
        }
    }
}

#[async_trait]
impl RecordTransport for RecordApi {
    /// Sends `POST /api/v1/internal/record` with the caller's bearer token.
    async fn create_record(&self, input: &CreateRecord) -> Result<CreatedRecord, ClientError> {
        let mut request = self
            .client
            .post(format!("{}{RECORD_PATH}", self.base_url))
            .json(input);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let envelope = response.json::<DataEnvelope<CreatedRecord>>().await?;
        Ok(envelope.data)
    }
}
