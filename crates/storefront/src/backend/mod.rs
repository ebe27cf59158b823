//! Backend data API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for restaurants, branches, menus,
//!   pharmacies, carts, and profiles - NO local copies
//! - Every call carries the headers built by [`BackendHeaders`]
//! - Public listings are cached in memory via `moka` (5 minute TTL);
//!   per-user calls are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use dashdrop_storefront::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend)?;
//!
//! let restaurants = client.list_restaurants().await?;
//! let branch = client.get_branch(&branch_id).await?;
//! ```

mod cache;
mod client;
pub mod headers;
pub mod types;

pub use client::BackendClient;
pub use headers::{BackendHeaders, CLIENT_AUTHORIZATION};
pub use types::*;

use thiserror::Error;

/// Maximum number of response body characters kept in error messages.
const ERROR_BODY_PREVIEW: usize = 200;

/// Errors that can occur when calling the backend data API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection refused, DNS, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The configured token is not a valid header value.
    #[error("Invalid auth token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

impl BackendError {
    /// Whether the backend rejected the caller's credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

/// Truncate a response body for logging and error messages.
fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW).collect()
}
