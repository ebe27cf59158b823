//! Storefront view modes.

use serde::{Deserialize, Serialize};

/// The kind of storefront page a visitor last viewed.
///
/// Stored alongside the last viewed identifier so pages that only know
/// "the last thing the visitor looked at" can tell a branch from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Branch,
    Store,
}

impl ViewMode {
    /// Get the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Store => "store",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "branch" => Some(Self::Branch),
            "store" => Some(Self::Store),
            _ => None,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_string_form() {
        assert_eq!(ViewMode::Branch.as_str(), "branch");
        assert_eq!(
            serde_json::to_string(&ViewMode::Branch).unwrap(),
            "\"branch\""
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(ViewMode::parse("store"), Some(ViewMode::Store));
        assert_eq!(ViewMode::parse("Branch"), None);
    }
}
