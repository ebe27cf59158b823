//! Newtype IDs for entities owned by the backend data API.
//!
//! The backend emits numeric primary keys, while route parameters and session
//! values arrive as text. Every ID is therefore stored as an opaque string and
//! deserializes from either a JSON number or a JSON string.

use serde::Deserialize;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` with `#[serde(transparent)]`
/// - `Deserialize` accepting a JSON number or string
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` for untrusted route input, `as_str()` for access
///
/// # Example
///
/// ```rust
/// # use dashdrop_core::define_id;
/// define_id!(BranchId);
/// define_id!(StoreId);
///
/// let branch = BranchId::parse(" 42 ").unwrap();
/// assert_eq!(branch.as_str(), "42");
/// assert!(StoreId::parse("   ").is_none());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an ID from untrusted input.
            ///
            /// Surrounding whitespace is trimmed; blank input yields `None`.
            #[must_use]
            pub fn parse(raw: &str) -> Option<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_owned()))
                }
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <$crate::types::id::RawId as ::serde::Deserialize>::deserialize(deserializer)
                    .map(|raw| Self(raw.into_string()))
            }
        }
    };
}

/// Wire form of an identifier: the backend may send either a number or text.
#[doc(hidden)]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl RawId {
    /// Normalize to the string form used by the ID newtypes.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

define_id!(BranchId);
define_id!(RestaurantId);
define_id!(StoreId);
define_id!(ProductId);
define_id!(ExtraId);
define_id!(UserId);
define_id!(CustomerId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = BranchId::parse("  17 ").unwrap();
        assert_eq!(id.as_str(), "17");
        assert_eq!(id.to_string(), "17");
    }

    #[test]
    fn test_parse_blank_is_absent() {
        assert!(BranchId::parse("").is_none());
        assert!(BranchId::parse(" \t ").is_none());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: RestaurantId = serde_json::from_str("42").unwrap();
        let from_text: RestaurantId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = StoreId::parse("9").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"9\"");
    }

    #[test]
    fn test_rejects_non_scalar() {
        let result: Result<BranchId, _> = serde_json::from_str("{\"id\": 1}");
        assert!(result.is_err());
    }
}
