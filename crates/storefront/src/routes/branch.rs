//! Branch and restaurant page handlers.
//!
//! Both pages resolve a branch from the `branchId` query parameter, falling
//! back to the visitor's last viewed branch. The page shell renders product
//! skeletons; the menu itself arrives as an HTMX fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashdrop_core::BranchId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::listings::local_href;
use super::not_found;
use crate::backend::{BackendError, Branch, MenuItem};
use crate::components::{
    EmptyState, EmptyStateIcon, LoadingIndicator, PageMeta, SKELETON_CARDS,
};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::services::{BranchResolver, IdSource, Resolution};
use crate::state::AppState;

/// Message shown when no branch could be resolved.
const NO_BRANCH_MESSAGE: &str =
    "We could not find that branch. Pick a restaurant to see its menu.";

/// Branch query parameters.
#[derive(Debug, Deserialize)]
pub struct BranchQuery {
    #[serde(rename = "branchId")]
    pub branch_id: Option<String>,
}

/// Branch display data for templates.
#[derive(Debug, Clone)]
pub struct BranchView {
    pub name: String,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub is_open: bool,
}

impl From<&Branch> for BranchView {
    fn from(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            address: branch.address.clone(),
            logo: branch.logo.as_ref().map(|img| img.url().to_string()),
            is_open: branch.is_open,
        }
    }
}

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub image: Option<String>,
    pub available: bool,
}

impl From<&MenuItem> for ProductCard {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().filter(|d| !d.trim().is_empty()),
            price: item.price.clone(),
            image: item.image.as_ref().map(|img| img.url().to_string()),
            available: item.available,
        }
    }
}

/// Branch page template.
#[derive(Template, WebTemplate)]
#[template(path = "branch.html")]
pub struct BranchTemplate {
    pub meta: PageMeta,
    pub branch: BranchView,
    /// URL of the menu fragment loaded over HTMX.
    pub menu_url: String,
    pub skeletons: usize,
    pub loading: LoadingIndicator,
}

/// Product grid fragment (branch menu, store products).
#[derive(Template, WebTemplate)]
#[template(path = "fragments/products.html")]
pub struct ProductsFragment {
    pub products: Vec<ProductCard>,
    pub empty: EmptyState,
}

/// `GET /branch?branchId=`
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<BranchQuery>,
) -> Result<Response> {
    let meta = PageMeta::new(
        "Restaurant Menu - DashDrop",
        "Browse the menu and order for delivery.",
    );
    render(&state, &session, query.branch_id.as_deref(), meta).await
}

/// `GET /restaurants/{slug}?branchId=`
#[instrument(skip(state, session))]
pub async fn restaurant(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
    Query(query): Query<BranchQuery>,
) -> Result<Response> {
    let meta = PageMeta::for_restaurant_slug(&slug);
    render(&state, &session, query.branch_id.as_deref(), meta).await
}

/// `GET /branch/{branch_id}/menu` (HTMX fragment)
#[instrument(skip(state))]
pub async fn menu(
    State(state): State<AppState>,
    Path(branch_id): Path<String>,
) -> Result<Response> {
    let Some(id) = BranchId::parse(&branch_id) else {
        return Ok((StatusCode::NOT_FOUND, menu_fragment(&[])).into_response());
    };

    match state.backend().list_branch_menu(&id).await {
        Ok(items) => Ok(menu_fragment(&items).into_response()),
        Err(BackendError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, menu_fragment(&[])).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn menu_fragment(items: &[MenuItem]) -> ProductsFragment {
    ProductsFragment {
        products: items.iter().map(ProductCard::from).collect(),
        empty: EmptyState::new(
            "No menu items",
            "This branch has not published a menu yet.",
            EmptyStateIcon::Search,
        ),
    }
}

/// Resolve the branch and render the page shell.
///
/// Unresolved identifiers never reach the backend. The last viewed branch is
/// only written once the backend has returned the branch, so an unknown id in
/// the URL leaves the stored one alone. A stored identifier the backend no
/// longer knows is forgotten.
async fn render(
    state: &AppState,
    session: &Session,
    from_url: Option<&str>,
    meta: PageMeta,
) -> Result<Response> {
    let resolver = BranchResolver::new(session);

    let Resolution::Found { id, source } = resolver.resolve(from_url).await else {
        return Ok(not_found(NO_BRANCH_MESSAGE));
    };

    let branch = match state.backend().get_branch(&id).await {
        Ok(branch) => branch,
        Err(BackendError::NotFound(_)) => {
            tracing::info!(branch_id = %id, ?source, "Branch not found at backend");
            if source == IdSource::Stored {
                resolver.forget().await;
            }
            return Ok(not_found(NO_BRANCH_MESSAGE));
        }
        Err(e) => return Err(AppError::from(e)),
    };

    resolver.remember(&id).await;
    add_breadcrumb(
        "navigation",
        "Viewed branch",
        Some(&[("branch_id", id.as_str())]),
    );

    Ok(BranchTemplate {
        meta,
        branch: BranchView::from(branch.as_ref()),
        menu_url: local_href(&["branch", id.as_str(), "menu"], None),
        skeletons: SKELETON_CARDS,
        loading: LoadingIndicator::inline("Loading menu"),
    }
    .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::middleware::session::SESSION_COOKIE_NAME;
    use crate::models::session_keys;
    use crate::routes::tests::{get_request, session_cookie, test_app, test_app_with_sessions};
    use crate::testing::{self, HitCounter};

    /// Fake backend knowing branch 12 only.
    async fn backend(hits: &HitCounter) -> String {
        let branch_hits = hits.clone();
        let router = Router::new()
            .route(
                "/api/branches/{id}",
                get(move |Path(id): Path<String>| {
                    branch_hits.hit();
                    async move {
                        if id == "12" {
                            Json(json!({"id": 12, "name": "Olaya Branch", "is_open": true}))
                                .into_response()
                        } else {
                            StatusCode::NOT_FOUND.into_response()
                        }
                    }
                }),
            )
            .route(
                "/api/branches/{id}/menu",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Chicken Kabsa", "price": "SAR 32"},
                        {"id": 2, "name": "Mutabbaq", "price": "SAR 12", "available": false}
                    ]))
                }),
            );
        let addr = testing::spawn(router).await;
        format!("http://{addr}/api")
    }

    fn with_cookie(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_no_identifier_renders_not_found_without_fetch() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/branch")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(testing::body_string(response).await.contains("could not find that branch"));
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_blank_identifier_counts_as_missing() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/branch?branchId=%20")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.count(), 0);
    }

    #[tokio::test]
    async fn test_branch_page_renders_skeletons_and_menu_link() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/branch?branchId=12")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_some());
        let body = testing::body_string(response).await;
        assert!(body.contains("Olaya Branch"));
        assert!(body.contains(r#"hx-get="/branch/12/menu""#));
        assert_eq!(body.matches("skeleton-card").count(), SKELETON_CARDS);
    }

    #[tokio::test]
    async fn test_stored_identifier_is_used_on_next_visit() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let first = app
            .clone()
            .oneshot(get_request("/restaurants/olaya-grill?branchId=12"))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let cookie = session_cookie(&first).unwrap();

        let second = app.oneshot(with_cookie("/branch", &cookie)).await.unwrap();

        assert_eq!(second.status(), StatusCode::OK);
        assert!(testing::body_string(second).await.contains("Olaya Branch"));
    }

    #[tokio::test]
    async fn test_restaurant_title_from_slug() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app
            .oneshot(get_request("/restaurants/olaya-grill?branchId=12"))
            .await
            .unwrap();

        let body = testing::body_string(response).await;
        assert!(body.contains("<title>Olaya Grill</title>"));
    }

    #[tokio::test]
    async fn test_unknown_url_branch_stores_nothing() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/branch?branchId=99")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(session_cookie(&response).is_none());
        assert_eq!(hits.count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_url_branch_keeps_last_viewed() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let good = app
            .clone()
            .oneshot(get_request("/branch?branchId=12"))
            .await
            .unwrap();
        assert_eq!(good.status(), StatusCode::OK);
        let cookie = session_cookie(&good).unwrap();

        let bad = app
            .clone()
            .oneshot(with_cookie("/branch?branchId=99", &cookie))
            .await
            .unwrap();
        assert_eq!(bad.status(), StatusCode::NOT_FOUND);

        let bare = app.oneshot(with_cookie("/branch", &cookie)).await.unwrap();
        assert_eq!(bare.status(), StatusCode::OK);
        assert!(testing::body_string(bare).await.contains("Olaya Branch"));
    }

    #[tokio::test]
    async fn test_unknown_stored_branch_is_forgotten() {
        let hits = HitCounter::default();
        let sessions = MemoryStore::default();
        let app = test_app_with_sessions(&backend(&hits).await, sessions.clone());

        let seeded = Session::new(None, Arc::new(sessions), None);
        seeded
            .insert(session_keys::SELECTED_BRANCH_ID, "99")
            .await
            .unwrap();
        seeded.save().await.unwrap();
        let cookie = format!("{SESSION_COOKIE_NAME}={}", seeded.id().unwrap());

        let first = app
            .clone()
            .oneshot(with_cookie("/branch", &cookie))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.count(), 1);

        let second = app.oneshot(with_cookie("/branch", &cookie)).await.unwrap();
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.count(), 1);
    }

    #[tokio::test]
    async fn test_menu_fragment() {
        let hits = HitCounter::default();
        let app = test_app(&backend(&hits).await, "http://127.0.0.1:9/signup");

        let response = app.oneshot(get_request("/branch/12/menu")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = testing::body_string(response).await;
        assert!(body.contains("Chicken Kabsa"));
        assert!(body.contains("Unavailable"));
        assert!(!body.contains("<html"));
    }
}
