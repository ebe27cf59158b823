//! Backend data API client implementation.
//!
//! Uses `reqwest` for HTTP. Caches listings and entity lookups using `moka`
//! (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use dashdrop_core::{BranchId, CartItem, StoreId, UserProfile};
use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::headers::BackendHeaders;
use super::types::{Branch, MenuItem, Restaurant, Store};
use super::{BackendError, preview};
use crate::config::BackendConfig;

/// Client for the backend data API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    headers: BackendHeaders,
    cache: Cache<CacheKey, CacheValue>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured token is not a valid header value.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                headers: BackendHeaders::new(config)?,
                cache,
            }),
        })
    }

    // =========================================================================
    // Public listings (cached)
    // =========================================================================

    /// List all restaurants.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_restaurants(&self) -> Result<Arc<Vec<Restaurant>>, BackendError> {
        if let Some(CacheValue::Restaurants(restaurants)) =
            self.inner.cache.get(&CacheKey::Restaurants).await
        {
            debug!("Cache hit for restaurants");
            return Ok(restaurants);
        }

        let restaurants: Arc<Vec<Restaurant>> = Arc::new(
            self.get_json(&["restaurants"], self.inner.headers.base())
                .await?,
        );

        self.inner
            .cache
            .insert(
                CacheKey::Restaurants,
                CacheValue::Restaurants(Arc::clone(&restaurants)),
            )
            .await;

        Ok(restaurants)
    }

    /// List all pharmacies.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_pharmacies(&self) -> Result<Arc<Vec<Store>>, BackendError> {
        if let Some(CacheValue::Pharmacies(pharmacies)) =
            self.inner.cache.get(&CacheKey::Pharmacies).await
        {
            debug!("Cache hit for pharmacies");
            return Ok(pharmacies);
        }

        let pharmacies: Arc<Vec<Store>> =
            Arc::new(self.get_json(&["pharmacies"], self.inner.headers.base()).await?);

        self.inner
            .cache
            .insert(
                CacheKey::Pharmacies,
                CacheValue::Pharmacies(Arc::clone(&pharmacies)),
            )
            .await;

        Ok(pharmacies)
    }

    /// Get a branch by ID.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the backend does not know the branch.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn get_branch(&self, id: &BranchId) -> Result<Arc<Branch>, BackendError> {
        let key = CacheKey::Branch(id.clone());
        if let Some(CacheValue::Branch(branch)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for branch");
            return Ok(branch);
        }

        let branch: Arc<Branch> = Arc::new(
            self.get_json(&["branches", id.as_str()], self.inner.headers.base())
                .await?,
        );

        self.inner
            .cache
            .insert(key, CacheValue::Branch(Arc::clone(&branch)))
            .await;

        Ok(branch)
    }

    /// List the menu of a branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(branch_id = %id))]
    pub async fn list_branch_menu(&self, id: &BranchId) -> Result<Arc<Vec<MenuItem>>, BackendError> {
        let key = CacheKey::BranchMenu(id.clone());
        if let Some(CacheValue::BranchMenu(menu)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for branch menu");
            return Ok(menu);
        }

        let menu: Arc<Vec<MenuItem>> = Arc::new(
            self.get_json(&["branches", id.as_str(), "menu"], self.inner.headers.base())
                .await?,
        );

        self.inner
            .cache
            .insert(key, CacheValue::BranchMenu(Arc::clone(&menu)))
            .await;

        Ok(menu)
    }

    /// Get a store (pharmacy) by ID.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the backend does not know the store.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn get_store(&self, id: &StoreId) -> Result<Arc<Store>, BackendError> {
        let key = CacheKey::Store(id.clone());
        if let Some(CacheValue::Store(store)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for store");
            return Ok(store);
        }

        let store: Arc<Store> = Arc::new(
            self.get_json(&["stores", id.as_str()], self.inner.headers.base())
                .await?,
        );

        self.inner
            .cache
            .insert(key, CacheValue::Store(Arc::clone(&store)))
            .await;

        Ok(store)
    }

    /// List the products sold by a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn list_store_products(&self, id: &StoreId) -> Result<Arc<Vec<MenuItem>>, BackendError> {
        let key = CacheKey::StoreProducts(id.clone());
        if let Some(CacheValue::StoreProducts(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for store products");
            return Ok(products);
        }

        let products: Arc<Vec<MenuItem>> = Arc::new(
            self.get_json(&["stores", id.as_str(), "products"], self.inner.headers.base())
                .await?,
        );

        self.inner
            .cache
            .insert(key, CacheValue::StoreProducts(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Visitor-scoped calls (never cached)
    // =========================================================================

    /// Get the profile of the visitor who sent `inbound`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the visitor is not signed in.
    #[instrument(skip_all)]
    pub async fn get_profile(&self, inbound: &HeaderMap) -> Result<UserProfile, BackendError> {
        self.get_json(&["auth", "me"], self.inner.headers.for_request(inbound))
            .await
    }

    /// Get the cart of the visitor who sent `inbound`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the visitor is not signed in.
    #[instrument(skip_all)]
    pub async fn get_cart(&self, inbound: &HeaderMap) -> Result<Vec<CartItem>, BackendError> {
        self.get_json(&["cart"], self.inner.headers.for_request(inbound))
            .await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Build an endpoint URL from path segments.
    ///
    /// Segments are percent-encoded, so an ID can never escape its path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        if segments.iter().any(|s| s.is_empty() || matches!(*s, "." | "..")) {
            return Err(BackendError::InvalidUrl(segments.join("/")));
        }

        let mut url = self.inner.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| BackendError::InvalidUrl(self.inner.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        headers: HeaderMap,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(segments)?;

        let response = self.inner.client.get(url).headers(headers).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(segments.join("/")));
        }

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %preview(&body),
                "Backend returned non-success status"
            );
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&body),
                "Failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }
}
