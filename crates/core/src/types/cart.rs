//! Cart line items as returned by the backend data API.

use serde::{Deserialize, Serialize};

use super::id::{ExtraId, ProductId};

/// A single line in a customer's cart.
///
/// `price` is display text: currency formatting is owned by the backend.
/// `quantity` is unsigned, so a negative quantity fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Add-ons, in the order the customer picked them.
    #[serde(default)]
    pub extras: Vec<CartExtra>,
}

/// An add-on attached to a cart line (extra cheese, a side, ...).
///
/// Extras have their own identity; nothing ties an extra's ID to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartExtra {
    pub id: ExtraId,
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

const fn default_available() -> bool {
    true
}
