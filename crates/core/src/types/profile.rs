//! The signed-in user's profile as returned by the backend data API.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{BranchId, CustomerId, RestaurantId, UserId};

/// A user profile.
///
/// The storefront never mutates profiles; it relays them to the browser.
/// Coordinates stay textual because the backend stores them as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    /// Current one-time passcode, if a login is in progress.
    #[serde(default, deserialize_with = "optional_text")]
    pub otp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Role tag (`customer`, `driver`, `restaurant`, ...).
    #[serde(default)]
    pub role: String,
    /// Whether the account is active.
    #[serde(default)]
    pub status: bool,
    /// Whether a driver is currently out on a delivery.
    #[serde(default)]
    pub on_trip: bool,
    #[serde(default, alias = "lat", deserialize_with = "optional_text")]
    pub latitude: Option<String>,
    #[serde(default, alias = "lng", deserialize_with = "optional_text")]
    pub longitude: Option<String>,
    #[serde(default)]
    pub branch_id: Option<BranchId>,
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,
    #[serde(default, alias = "_customer")]
    pub customer: Vec<CustomerRecord>,
}

/// Customer data attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: CustomerId,
    #[serde(default)]
    pub delivery_address: Option<String>,
    #[serde(default)]
    pub favorite_restaurants: Vec<FavoriteRestaurant>,
}

/// A reference to a restaurant the customer marked as favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRestaurant {
    pub restaurant_id: RestaurantId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Wire form of a free-form text field: text, an integer, or a decimal.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Signed(i64),
    Unsigned(u64),
    Decimal(f64),
    Text(String),
}

/// Accept `null`, a string, or a number for free-form text fields.
///
/// # Errors
///
/// Fails for objects, arrays, and booleans.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?.map(|raw| match raw {
        RawText::Signed(n) => n.to_string(),
        RawText::Unsigned(n) => n.to_string(),
        RawText::Decimal(n) => n.to_string(),
        RawText::Text(s) => s,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_profile() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "id": 7,
                "otp": 4821,
                "locale": "ar",
                "address": "King Fahd Rd",
                "city": "Riyadh",
                "role": "customer",
                "status": true,
                "on_trip": false,
                "lat": "24.7136",
                "lng": "46.6753",
                "branch_id": null,
                "restaurant_id": null,
                "_customer": [{
                    "id": 3,
                    "delivery_address": "Building 4",
                    "favorite_restaurants": [{"restaurant_id": 11}, {"restaurant_id": 2, "name": "Shawarma House"}]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(profile.id.as_str(), "7");
        assert_eq!(profile.otp.as_deref(), Some("4821"));
        assert_eq!(profile.latitude.as_deref(), Some("24.7136"));
        assert!(profile.status);
        assert!(profile.branch_id.is_none());
        assert_eq!(profile.customer.len(), 1);
        let favorites = &profile.customer[0].favorite_restaurants;
        assert_eq!(favorites[0].restaurant_id.as_str(), "11");
        assert_eq!(favorites[1].name.as_deref(), Some("Shawarma House"));
    }

    #[test]
    fn test_sparse_profile_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();

        assert!(profile.otp.is_none());
        assert!(!profile.on_trip);
        assert!(profile.customer.is_empty());
        assert_eq!(profile.role, "");
    }

    #[test]
    fn test_numeric_coordinates() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": 7, "lat": 24.7136, "lng": 46.6753, "otp": 4821}"#)
                .unwrap();

        assert_eq!(profile.latitude.as_deref(), Some("24.7136"));
        assert_eq!(profile.longitude.as_deref(), Some("46.6753"));
        assert_eq!(profile.otp.as_deref(), Some("4821"));
    }

    #[test]
    fn test_restaurant_staff_association() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 1, "role": "restaurant", "branch_id": 5, "restaurant_id": "9"}"#,
        )
        .unwrap();

        assert_eq!(profile.branch_id.unwrap().as_str(), "5");
        assert_eq!(profile.restaurant_id.unwrap().as_str(), "9");
    }
}
