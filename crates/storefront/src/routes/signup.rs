//! Restaurant signup page and forwarding endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use tracing::instrument;

use crate::components::{LoadingIndicator, PageMeta};
use crate::filters;
use crate::services::{SignupEnvelope, SignupError};
use crate::state::AppState;

/// Restaurant signup form template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub meta: PageMeta,
    pub loading: LoadingIndicator,
}

/// `GET /restaurant-signup`
pub async fn page() -> SignupTemplate {
    SignupTemplate {
        meta: PageMeta::new(
            "Partner with DashDrop",
            "List your restaurant on DashDrop and reach new customers.",
        ),
        loading: LoadingIndicator::full_screen("Submitting your application"),
    }
}

/// `POST /api/restaurant-signup`
///
/// Relays the raw body to the approval API. Every failure, including a body
/// over the request size limit, collapses into the same
/// `500 {"error": "Failed to submit form"}` response.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<SignupEnvelope>, SignupError> {
    let body = body.map_err(SignupError::Body)?;
    state.signup().submit(body).await?;
    tracing::info!("Restaurant signup forwarded");
    Ok(Json(SignupEnvelope::success()))
}
