//! Storefront-side models.

pub mod session_keys;
