//! Test helpers: fake upstream servers and canned configuration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::to_bytes;
use axum::response::Response;
use secrecy::SecretString;
use tokio::net::TcpListener;
use url::Url;

use crate::config::{BackendConfig, StorefrontConfig};

/// Backend token used across tests.
pub const TOKEN: &str = "eyJhbGciOiJBMjU2S1ciLCJlbmMiOiJBMjU2Q0JDLUhTNTEyIn0.q7Zt";

/// Serve `router` on an ephemeral local port.
#[allow(clippy::unwrap_used)]
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A URL nothing listens on.
#[allow(clippy::unwrap_used)]
pub fn unreachable_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/signup")).unwrap()
}

#[allow(clippy::unwrap_used)]
pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: Url::parse(base_url).unwrap(),
        auth_token: SecretString::from(TOKEN.to_string()),
    }
}

#[allow(clippy::unwrap_used)]
pub fn config(backend_url: &str, approval_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        backend: backend_config(backend_url),
        approval_api: Url::parse(approval_url).unwrap(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Collect a response body into a string.
#[allow(clippy::unwrap_used)]
pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Counts requests reaching a fake upstream.
#[derive(Debug, Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

impl HitCounter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
