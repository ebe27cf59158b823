//! Session keys for visitor-scoped state.
//!
//! The names match the keys older storefront builds kept in browser storage,
//! so both read the same values.

/// Key for the last viewed branch identifier.
pub const SELECTED_BRANCH_ID: &str = "selectedBranchId";

/// Key for the last viewed page mode (`branch`, `store`).
pub const CURRENT_VIEW: &str = "currentView";
