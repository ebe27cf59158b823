//! Store (pharmacy) page handlers.
//!
//! Store pages take their identifier from the path only; there is no last
//! viewed fallback.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashdrop_core::StoreId;
use tracing::instrument;

use super::branch::{ProductCard, ProductsFragment};
use super::listings::local_href;
use super::not_found;
use crate::backend::{BackendError, MenuItem, Store};
use crate::components::{
    EmptyState, EmptyStateIcon, LoadingIndicator, PageMeta, SKELETON_CARDS,
};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

const NO_STORE_MESSAGE: &str = "We could not find that store.";

/// Store display data for templates.
#[derive(Debug, Clone)]
pub struct StoreView {
    pub name: String,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub is_open: bool,
}

impl From<&Store> for StoreView {
    fn from(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            address: store.address.clone(),
            logo: store.logo.as_ref().map(|img| img.url().to_string()),
            is_open: store.is_open,
        }
    }
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store.html")]
pub struct StoreTemplate {
    pub meta: PageMeta,
    pub store: StoreView,
    pub products_url: String,
    pub skeletons: usize,
    pub loading: LoadingIndicator,
}

/// `GET /stores/{store_id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Response> {
    let Some(id) = StoreId::parse(&store_id) else {
        return Ok(not_found(NO_STORE_MESSAGE));
    };

    let store = match state.backend().get_store(&id).await {
        Ok(store) => store,
        Err(BackendError::NotFound(_)) => return Ok(not_found(NO_STORE_MESSAGE)),
        Err(e) => return Err(e.into()),
    };

    Ok(StoreTemplate {
        meta: PageMeta::new(
            format!("{} - DashDrop", store.name),
            format!("Order from {} for delivery.", store.name),
        ),
        store: StoreView::from(store.as_ref()),
        products_url: local_href(&["stores", id.as_str(), "products"], None),
        skeletons: SKELETON_CARDS,
        loading: LoadingIndicator::inline("Loading products"),
    }
    .into_response())
}

/// `GET /stores/{store_id}/products` (HTMX fragment)
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Response> {
    let Some(id) = StoreId::parse(&store_id) else {
        return Ok((StatusCode::NOT_FOUND, products_fragment(&[])).into_response());
    };

    match state.backend().list_store_products(&id).await {
        Ok(items) => Ok(products_fragment(&items).into_response()),
        Err(BackendError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, products_fragment(&[])).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn products_fragment(items: &[MenuItem]) -> ProductsFragment {
    ProductsFragment {
        products: items.iter().map(ProductCard::from).collect(),
        empty: EmptyState::new(
            "No products",
            "This store has no products listed yet.",
            EmptyStateIcon::Store,
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::tests::{get_request, session_cookie, test_app};
    use crate::testing;

    async fn backend() -> String {
        let router = Router::new()
            .route(
                "/api/stores/7",
                get(|| async { Json(json!({"id": 7, "name": "Nahdi Pharmacy", "is_open": true})) }),
            )
            .route("/api/stores/7/products", get(|| async { Json(json!([])) }));
        let addr = testing::spawn(router).await;
        format!("http://{addr}/api")
    }

    #[tokio::test]
    async fn test_store_page() {
        let app = test_app(&backend().await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/stores/7")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_none());
        let body = testing::body_string(response).await;
        assert!(body.contains("Nahdi Pharmacy"));
        assert!(body.contains(r#"hx-get="/stores/7/products""#));
    }

    #[tokio::test]
    async fn test_unknown_store_is_not_found() {
        let app = test_app(&backend().await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/stores/8")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_products_render_empty_state() {
        let app = test_app(&backend().await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/stores/7/products")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = testing::body_string(response).await;
        assert!(body.contains("empty-state"));
        assert!(body.contains("No products"));
    }
}
