//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Listings
//! GET  /                            - Restaurants
//! GET  /pharmacies                  - Pharmacies
//! GET  /search?q=                   - Restaurant search
//!
//! # Vendor pages
//! GET  /branch?branchId=            - Branch page (falls back to last viewed branch)
//! GET  /restaurants/{slug}?branchId= - Restaurant page (falls back to last viewed branch)
//! GET  /branch/{branch_id}/menu     - Branch menu fragment (HTMX)
//! GET  /stores/{store_id}           - Store page
//! GET  /stores/{store_id}/products  - Store products fragment (HTMX)
//!
//! # Restaurant signup
//! GET  /restaurant-signup           - Signup form
//! POST /api/restaurant-signup       - Forward signup to the approval API
//!
//! # Visitor API (forwards the visitor's Authorization header)
//! GET  /api/profile                 - Signed-in visitor's profile
//! GET  /api/cart                    - Signed-in visitor's cart
//! ```

pub mod api;
pub mod branch;
pub mod listings;
pub mod signup;
pub mod stores;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::MemoryStore;

use crate::components::PageMeta;
use crate::filters;
use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub meta: PageMeta,
    pub message: String,
}

/// Render the not-found page with a 404 status.
pub fn not_found(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            meta: PageMeta::new("Not Found", "The page you are looking for does not exist."),
            message: message.into(),
        },
    )
        .into_response()
}

async fn fallback() -> Response {
    not_found("We could not find that page.")
}

/// Create the vendor page routes router.
pub fn vendor_routes() -> Router<AppState> {
    Router::new()
        .route("/branch", get(branch::show))
        .route("/branch/{branch_id}/menu", get(branch::menu))
        .route("/restaurants/{slug}", get(branch::restaurant))
        .route("/stores/{store_id}", get(stores::show))
        .route("/stores/{store_id}/products", get(stores::products))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurant-signup", post(signup::submit))
        .route("/profile", get(api::profile))
        .route("/cart", get(api::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listings
        .route("/", get(listings::home))
        .route("/pharmacies", get(listings::pharmacies))
        .route("/search", get(listings::search))
        // Vendor pages
        .merge(vendor_routes())
        // Restaurant signup page
        .route("/restaurant-signup", get(signup::page))
        // JSON API
        .nest("/api", api_routes())
}

/// Build the full application: routes, static files, and middleware.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    app_with_session_store(state, MemoryStore::default())
}

/// Build the full application with sessions kept in `store`.
pub fn app_with_session_store(state: AppState, store: MemoryStore) -> Router {
    let session_layer = create_session_layer(state.config(), store);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(fallback)
        .layer(session_layer)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
