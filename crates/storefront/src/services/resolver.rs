//! Branch resolution for storefront pages.
//!
//! A branch page needs one identifier. It comes from the URL when present,
//! otherwise from the visitor's last viewed branch. When neither yields an
//! identifier the page renders its not-found state without touching the
//! backend.

use dashdrop_core::{BranchId, ViewMode};
use tracing::{debug, warn};

use super::last_viewed::LastViewedStore;

/// Where a resolved identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// Path or query parameter.
    Url,
    /// The visitor's last viewed branch.
    Stored,
}

/// Outcome of resolving a branch identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found { id: BranchId, source: IdSource },
    NotFound,
}

/// Resolves branch identifiers against a [`LastViewedStore`].
pub struct BranchResolver<'a, S> {
    store: &'a S,
}

impl<'a, S: LastViewedStore> BranchResolver<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Pick the branch to render.
    ///
    /// Nothing is written here; call [`Self::remember`] once the backend has
    /// confirmed the branch exists. Store failures are logged and never fail
    /// the page.
    pub async fn resolve(&self, from_url: Option<&str>) -> Resolution {
        let resolved = match from_url.and_then(BranchId::parse) {
            Some(id) => Some((id, IdSource::Url)),
            None => match self.store.selected_branch().await {
                Ok(stored) => stored.map(|id| (id, IdSource::Stored)),
                Err(e) => {
                    warn!(error = %e, "Failed to read last viewed branch");
                    None
                }
            },
        };

        match resolved {
            Some((id, source)) => Resolution::Found { id, source },
            None => {
                debug!("No branch identifier in URL or last viewed store");
                Resolution::NotFound
            }
        }
    }

    /// Record a rendered branch and the `branch` view mode.
    ///
    /// Called on every successful render, including ones resolved from the
    /// store itself, so the store always holds the branch the visitor saw last.
    pub async fn remember(&self, id: &BranchId) {
        if let Err(e) = self.store.remember(id, ViewMode::Branch).await {
            warn!(branch_id = %id, error = %e, "Failed to record last viewed branch");
        }
    }

    /// Forget a stored branch the backend no longer knows.
    pub async fn forget(&self) {
        if let Err(e) = self.store.forget_branch().await {
            warn!(error = %e, "Failed to clear last viewed branch");
        }
    }
}
