//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Page and API handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;
use crate::services::{SignupEnvelope, SignupError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend data API call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Backend(err) if err.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::Backend(BackendError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Whether this error is our fault (or the backend's) and worth reporting.
    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(err) if err.is_unauthorized() => "Unauthorized".to_string(),
            Self::Backend(BackendError::NotFound(_)) => "Not found".to_string(),
            Self::Backend(_) => "External service error".to_string(),
        };

        (status, message).into_response()
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        match &self {
            Self::Body(_) | Self::Parse(_) => {
                tracing::warn!(kind = self.kind(), error = %self, "Rejected restaurant signup");
            }
            Self::Network(_) | Self::Downstream(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    kind = self.kind(),
                    error = %self,
                    sentry_event_id = %event_id,
                    "Restaurant signup forward failed"
                );
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SignupEnvelope::failure()),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for visitor navigation.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of pages
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing;

    fn api_error(status: u16) -> AppError {
        AppError::Backend(BackendError::Api {
            status,
            message: "secret upstream detail".to_string(),
        })
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(BackendError::NotFound("branch 12".to_string()));
        assert!(err.to_string().starts_with("Backend error: "));
        assert!(err.to_string().contains("branch 12"));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(api_error(401)), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(api_error(403)), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(api_error(500)), StatusCode::BAD_GATEWAY);
        assert_eq!(
            get_status(AppError::Backend(BackendError::NotFound("cart".to_string()))),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_backend_details_are_hidden() {
        let body = testing::body_string(api_error(502).into_response()).await;

        assert_eq!(body, "External service error");
        assert!(!body.contains("secret"));
    }

    #[tokio::test]
    async fn test_signup_error_collapses_to_envelope() {
        let err = SignupError::Downstream(reqwest::StatusCode::UNPROCESSABLE_ENTITY);
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = testing::body_string(response).await;
        assert_eq!(body, r#"{"error":"Failed to submit form"}"#);
    }
}
