//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::StorefrontConfig;
use crate::services::SignupForwarder;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: BackendClient,
    signup: SignupForwarder,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built from `config`.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        let signup = SignupForwarder::new(config.approval_api.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                signup,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend data API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the restaurant signup forwarder.
    #[must_use]
    pub fn signup(&self) -> &SignupForwarder {
        &self.inner.signup
    }
}
