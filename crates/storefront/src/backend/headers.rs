//! Outbound header derivation for backend calls.
//!
//! Every backend call authenticates with the storefront's static token. Calls
//! made on behalf of a signed-in visitor also carry the visitor's own
//! credentials under a separate header so the backend can tell the two apart.

use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue,
};

use crate::config::BackendConfig;

/// Header carrying the visitor's inbound `Authorization` value.
pub const CLIENT_AUTHORIZATION: HeaderName = HeaderName::from_static("client-authorization");

/// Builds header maps for backend requests.
///
/// Holds the pre-validated `Authorization` value, so deriving headers never
/// fails once the storefront has started.
#[derive(Clone)]
pub struct BackendHeaders {
    authorization: HeaderValue,
}

impl std::fmt::Debug for BackendHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHeaders")
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

impl BackendHeaders {
    /// Build from backend configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value.
    pub fn new(config: &BackendConfig) -> Result<Self, InvalidHeaderValue> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token()))?;
        authorization.set_sensitive(true);
        Ok(Self { authorization })
    }

    /// Headers for calls made on the storefront's own behalf.
    ///
    /// `Authorization: Bearer <token>` and `Content-Type: application/json`.
    #[must_use]
    pub fn base(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Headers for calls made on behalf of an inbound request.
    ///
    /// Same as [`base`](Self::base), plus the inbound `Authorization` value
    /// copied verbatim under `Client-Authorization`. Without an inbound
    /// `Authorization` header, `Client-Authorization` is left out entirely.
    #[must_use]
    pub fn for_request(&self, inbound: &HeaderMap) -> HeaderMap {
        let mut headers = self.base();
        if let Some(client_auth) = inbound.get(AUTHORIZATION) {
            headers.insert(CLIENT_AUTHORIZATION, client_auth.clone());
        }
        headers
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    fn headers() -> BackendHeaders {
        BackendHeaders::new(&BackendConfig {
            base_url: Url::parse("https://api.example.test").unwrap(),
            auth_token: SecretString::from("tok_9fK2xLq7Pz4WvR8mN3bT"),
        })
        .unwrap()
    }

    #[test]
    fn test_base_headers() {
        let derived = headers().base();

        assert_eq!(
            derived.get(AUTHORIZATION).unwrap(),
            "Bearer tok_9fK2xLq7Pz4WvR8mN3bT"
        );
        assert_eq!(derived.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(derived.get(AUTHORIZATION).unwrap().is_sensitive());
        assert!(!derived.contains_key(CLIENT_AUTHORIZATION));
    }

    #[test]
    fn test_forwards_inbound_authorization() {
        let mut inbound = HeaderMap::new();
        inbound.insert(AUTHORIZATION, HeaderValue::from_static("Bearer visitor-jwt"));

        let derived = headers().for_request(&inbound);

        assert_eq!(
            derived.get(AUTHORIZATION).unwrap(),
            "Bearer tok_9fK2xLq7Pz4WvR8mN3bT"
        );
        assert_eq!(
            derived.get("Client-Authorization").unwrap(),
            "Bearer visitor-jwt"
        );
    }

    #[test]
    fn test_omits_client_authorization_without_inbound() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-request-id", HeaderValue::from_static("abc"));

        let derived = headers().for_request(&inbound);

        assert!(derived.get(CLIENT_AUTHORIZATION).is_none());
        assert_eq!(derived.len(), 2);
    }

    #[test]
    fn test_debug_redacts_token() {
        let output = format!("{:?}", headers());
        assert!(!output.contains("tok_9fK2xLq7Pz4WvR8mN3bT"));
    }
}
