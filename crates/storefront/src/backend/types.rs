//! Listing shapes returned by the backend data API.
//!
//! The backend is loose about optional fields, so nearly everything besides
//! `id` and `name` defaults when absent.

use dashdrop_core::{BranchId, ProductId, RestaurantId, StoreId, optional_text};
use serde::{Deserialize, Serialize};

/// An image reference.
///
/// The backend sends either a bare URL or an attachment object with a `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Attachment { url: String },
}

impl ImageRef {
    /// Get the image URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Attachment { url } => url,
        }
    }
}

/// A restaurant (vendor) in the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub logo: Option<ImageRef>,
    #[serde(default)]
    pub is_open: bool,
    /// Branch shown when a visitor opens the restaurant from a listing.
    #[serde(default)]
    pub main_branch_id: Option<BranchId>,
}

/// A physical or logical storefront location of a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<ImageRef>,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default, alias = "lat", deserialize_with = "optional_text")]
    pub latitude: Option<String>,
    #[serde(default, alias = "lng", deserialize_with = "optional_text")]
    pub longitude: Option<String>,
}

/// A product on a branch menu or in a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display price, formatted by the backend.
    pub price: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// A pharmacy or convenience store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo: Option<ImageRef>,
    #[serde(default)]
    pub is_open: bool,
}

const fn default_available() -> bool {
    true
}
