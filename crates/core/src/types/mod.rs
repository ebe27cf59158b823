//! Data contracts shared between the storefront and the backend data API.

pub mod cart;
pub mod id;
pub mod profile;
pub mod view;

pub use cart::{CartExtra, CartItem};
pub use id::*;
pub use profile::{CustomerRecord, FavoriteRestaurant, UserProfile, optional_text};
pub use view::ViewMode;
