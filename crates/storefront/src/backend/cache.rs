//! Cache types for backend API responses.

use std::sync::Arc;

use dashdrop_core::{BranchId, StoreId};

use super::types::{Branch, MenuItem, Restaurant, Store};

/// Cache key for public listings and entity lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Restaurants,
    Pharmacies,
    Branch(BranchId),
    BranchMenu(BranchId),
    Store(StoreId),
    StoreProducts(StoreId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Restaurants(Arc<Vec<Restaurant>>),
    Pharmacies(Arc<Vec<Store>>),
    Branch(Arc<Branch>),
    BranchMenu(Arc<Vec<MenuItem>>),
    Store(Arc<Store>),
    StoreProducts(Arc<Vec<MenuItem>>),
}
