//! Restaurant signup forwarding.
//!
//! Restaurants apply through the storefront; the approval API owns the
//! review. The storefront only checks that the body is JSON and relays it
//! byte-for-byte.
//!
//! Callers see one of two envelopes:
//!
//! ```text
//! 200 {"success": true}
//! 500 {"error": "Failed to submit form"}
//! ```
//!
//! The cause of a failure (bad body, unreachable API, rejected submission)
//! is kept in [`SignupError`] for logs and error tracking only.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::IgnoredAny;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Message returned to callers for every failed submission.
pub const FAILURE_MESSAGE: &str = "Failed to submit form";

/// Why a signup submission failed.
#[derive(Debug, Error)]
pub enum SignupError {
    /// The inbound body could not be read, for example because it is too large.
    #[error("unreadable signup body: {0}")]
    Body(#[source] BytesRejection),

    /// The inbound body is not JSON.
    #[error("invalid signup body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The approval API could not be reached.
    #[error("approval API unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The approval API answered with a non-success status.
    #[error("approval API rejected signup with status {0}")]
    Downstream(StatusCode),
}

impl SignupError {
    /// Short label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Body(_) => "body",
            Self::Parse(_) => "parse",
            Self::Network(_) => "network",
            Self::Downstream(_) => "downstream",
        }
    }
}

/// A signup body that passed the edge check.
///
/// Holds the original bytes so the forwarded body is exactly what the
/// browser sent.
#[derive(Debug, Clone)]
pub struct SignupRequest {
    body: Bytes,
}

impl SignupRequest {
    /// Check that `body` is a single well-formed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::Parse` for empty or malformed bodies.
    pub fn parse(body: Bytes) -> Result<Self, SignupError> {
        serde_json::from_slice::<IgnoredAny>(&body).map_err(SignupError::Parse)?;
        Ok(Self { body })
    }

    /// The original body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }
}

/// Response envelope for the signup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SignupEnvelope {
    Success { success: bool },
    Failure { error: String },
}

impl SignupEnvelope {
    #[must_use]
    pub const fn success() -> Self {
        Self::Success { success: true }
    }

    #[must_use]
    pub fn failure() -> Self {
        Self::Failure {
            error: FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Relays signup bodies to the approval API.
///
/// No retries and no explicit timeout: a submission runs until the approval
/// API answers or the connection fails.
#[derive(Clone)]
pub struct SignupForwarder {
    client: reqwest::Client,
    endpoint: Url,
}

impl SignupForwarder {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Check and forward an inbound body.
    ///
    /// # Errors
    ///
    /// Returns the cause of the failure; see [`SignupError`].
    pub async fn submit(&self, body: Bytes) -> Result<(), SignupError> {
        let request = SignupRequest::parse(body)?;
        self.forward(&request).await
    }

    /// Forward a checked body unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Network` if the request fails and `Downstream` for any
    /// non-2xx status.
    #[instrument(skip_all, fields(bytes = request.as_bytes().len()))]
    pub async fn forward(&self, request: &SignupRequest) -> Result<(), SignupError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SignupError::Downstream(status))
        }
    }
}
