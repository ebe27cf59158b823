//! Listing page handlers: restaurants, pharmacies, and search.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::backend::{Restaurant, Store};
use crate::components::{EmptyState, EmptyStateIcon, PageMeta, SKELETON_CARDS};
use crate::filters;
use crate::state::AppState;

/// Vendor card display data for templates.
#[derive(Debug, Clone)]
pub struct VendorCard {
    pub href: String,
    pub name: String,
    pub subtitle: Option<String>,
    pub logo: Option<String>,
    pub is_open: bool,
}

impl From<&Restaurant> for VendorCard {
    fn from(restaurant: &Restaurant) -> Self {
        let branch = restaurant
            .main_branch_id
            .as_ref()
            .map(|id| ("branchId", id.as_str()));
        let href = match restaurant.slug.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(slug) => local_href(&["restaurants", slug], branch),
            None => local_href(&["branch"], branch),
        };

        Self {
            href,
            name: restaurant.name.clone(),
            subtitle: restaurant.cuisine.clone(),
            logo: restaurant.logo.as_ref().map(|img| img.url().to_string()),
            is_open: restaurant.is_open,
        }
    }
}

impl From<&Store> for VendorCard {
    fn from(store: &Store) -> Self {
        Self {
            href: local_href(&["stores", store.id.as_str()], None),
            name: store.name.clone(),
            subtitle: store.address.clone(),
            logo: store.logo.as_ref().map(|img| img.url().to_string()),
            is_open: store.is_open,
        }
    }
}

/// Build a same-site link with percent-encoded path segments.
pub(crate) fn local_href(segments: &[&str], query: Option<(&str, &str)>) -> String {
    // Only used as a builder; the origin is stripped below
    let Ok(mut url) = Url::parse("http://storefront.invalid/") else {
        return "/".to_string();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    if let Some((key, value)) = query {
        url.query_pairs_mut().append_pair(key, value);
    }
    url[url::Position::BeforePath..].to_string()
}

/// Listing page template (home, pharmacies, search).
#[derive(Template, WebTemplate)]
#[template(path = "listing.html")]
pub struct ListingTemplate {
    pub meta: PageMeta,
    pub heading: String,
    pub vendors: Vec<VendorCard>,
    pub empty: EmptyState,
    /// The backend could not be reached; show a notice instead of results.
    pub load_failed: bool,
    /// Current search text, when the page has a search box.
    pub search: Option<String>,
    /// Vendor skeletons shown while a live search is in flight.
    pub skeletons: usize,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Restaurants listing (home page).
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> ListingTemplate {
    let (vendors, load_failed) = match state.backend().list_restaurants().await {
        Ok(restaurants) => (restaurants.iter().map(VendorCard::from).collect(), false),
        Err(e) => {
            tracing::error!("Failed to fetch restaurants: {e}");
            (Vec::new(), true)
        }
    };

    ListingTemplate {
        meta: PageMeta::new(
            "DashDrop - Food Delivery",
            "Order from the best restaurants near you.",
        ),
        heading: "Restaurants near you".to_string(),
        vendors,
        empty: EmptyState::new(
            "No restaurants yet",
            "There are no restaurants delivering to your area right now.",
            EmptyStateIcon::Store,
        ),
        load_failed,
        search: Some(String::new()),
        skeletons: SKELETON_CARDS,
    }
}

/// Pharmacies listing.
#[instrument(skip(state))]
pub async fn pharmacies(State(state): State<AppState>) -> ListingTemplate {
    let (vendors, load_failed) = match state.backend().list_pharmacies().await {
        Ok(stores) => (stores.iter().map(VendorCard::from).collect(), false),
        Err(e) => {
            tracing::error!("Failed to fetch pharmacies: {e}");
            (Vec::new(), true)
        }
    };

    ListingTemplate {
        meta: PageMeta::new(
            "Pharmacies - DashDrop",
            "Medicine and essentials delivered from pharmacies near you.",
        ),
        heading: "Pharmacies".to_string(),
        vendors,
        empty: EmptyState::new(
            "No pharmacies available",
            "Check back soon for pharmacies delivering to your area.",
            EmptyStateIcon::Store,
        ),
        load_failed,
        search: None,
        skeletons: SKELETON_CARDS,
    }
}

/// Restaurant search by name (case-insensitive).
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ListingTemplate {
    let text = query.q.unwrap_or_default().trim().to_string();

    let (vendors, load_failed) = match state.backend().list_restaurants().await {
        Ok(restaurants) => (
            filter_by_name(&restaurants, &text)
                .map(VendorCard::from)
                .collect(),
            false,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch restaurants for search: {e}");
            (Vec::new(), true)
        }
    };

    let (heading, empty) = if text.is_empty() {
        (
            "Search restaurants".to_string(),
            EmptyState::new(
                "No restaurants yet",
                "There are no restaurants to search right now.",
                EmptyStateIcon::Search,
            ),
        )
    } else {
        (
            format!("Results for \"{text}\""),
            EmptyState::new(
                "No results found",
                format!("No restaurants match \"{text}\". Try a different name."),
                EmptyStateIcon::Search,
            ),
        )
    };

    ListingTemplate {
        meta: PageMeta::new("Search - DashDrop", "Find a restaurant by name."),
        heading,
        vendors,
        empty,
        load_failed,
        search: Some(text),
        skeletons: SKELETON_CARDS,
    }
}

/// Restaurants whose name contains `text`, ignoring case. Empty text matches all.
fn filter_by_name<'a>(
    restaurants: &'a [Restaurant],
    text: &str,
) -> impl Iterator<Item = &'a Restaurant> {
    let needle = text.to_lowercase();
    restaurants
        .iter()
        .filter(move |r| r.name.to_lowercase().contains(&needle))
}
