//! Visitor-scoped JSON endpoints.
//!
//! These forward the visitor's `Authorization` header to the backend as
//! `Client-Authorization`; the storefront itself never inspects it.

use axum::{Json, extract::State, http::HeaderMap};
use dashdrop_core::{CartItem, UserProfile};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// `GET /api/profile`
#[instrument(skip_all)]
pub async fn profile(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<UserProfile>> {
    let profile = state.backend().get_profile(&headers).await?;
    Ok(Json(profile))
}

/// `GET /api/cart`
#[instrument(skip_all)]
pub async fn cart(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<CartItem>>> {
    let cart = state.backend().get_cart(&headers).await?;
    Ok(Json(cart))
}
