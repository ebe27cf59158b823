//! DashDrop Core - Shared data contracts.
//!
//! The backend data service owns every entity the storefront displays. This
//! crate describes the shapes the storefront receives from it and passes
//! through to browsers:
//!
//! - [`CartItem`] / [`CartExtra`] - a cart line and its add-ons
//! - [`UserProfile`] / [`CustomerRecord`] - the signed-in user's profile
//! - Opaque entity IDs (`BranchId`, `RestaurantId`, ...)
//! - [`ViewMode`] - which kind of storefront page was last viewed
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! validation beyond what deserialization needs. Lifecycle and invariants of
//! these records belong to the backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
