//! Visitor-scoped memory of the last viewed branch.
//!
//! Pages that arrive without a branch identifier fall back to whatever branch
//! the visitor looked at last. The memory is a cache, not a source of truth:
//! it is overwritten on every successful resolution and only read as a last
//! resort.

use std::future::Future;

use dashdrop_core::{BranchId, ViewMode};
use tower_sessions::Session;

use crate::models::session_keys;

/// Storage for the last viewed branch.
pub trait LastViewedStore {
    /// Error raised by the underlying storage.
    type Error: std::fmt::Display;

    /// Read the last viewed branch, if any.
    fn selected_branch(&self)
    -> impl Future<Output = Result<Option<BranchId>, Self::Error>> + Send;

    /// Record `id` as the last viewed branch, viewed in `view` mode.
    fn remember(
        &self,
        id: &BranchId,
        view: ViewMode,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Forget the last viewed branch and view mode. Other visitor data is kept.
    fn forget_branch(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl LastViewedStore for Session {
    type Error = tower_sessions::session::Error;

    async fn selected_branch(&self) -> Result<Option<BranchId>, Self::Error> {
        let raw: Option<String> = self.get(session_keys::SELECTED_BRANCH_ID).await?;
        Ok(raw.as_deref().and_then(BranchId::parse))
    }

    async fn remember(&self, id: &BranchId, view: ViewMode) -> Result<(), Self::Error> {
        self.insert(session_keys::SELECTED_BRANCH_ID, id.as_str())
            .await?;
        self.insert(session_keys::CURRENT_VIEW, view.as_str()).await
    }

    async fn forget_branch(&self) -> Result<(), Self::Error> {
        self.remove::<String>(session_keys::SELECTED_BRANCH_ID)
            .await?;
        self.remove::<String>(session_keys::CURRENT_VIEW).await?;
        Ok(())
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let session = session();
        let id = BranchId::parse("31").unwrap();

        assert!(session.selected_branch().await.unwrap().is_none());

        session.remember(&id, ViewMode::Branch).await.unwrap();

        assert_eq!(session.selected_branch().await.unwrap(), Some(id));
        let view: Option<String> = session.get(session_keys::CURRENT_VIEW).await.unwrap();
        assert_eq!(view.as_deref(), Some("branch"));
    }

    #[tokio::test]
    async fn test_session_forget_branch_keeps_other_keys() {
        let session = session();
        session.insert("cart_hint", "3 items").await.unwrap();
        session
            .remember(&BranchId::parse("5").unwrap(), ViewMode::Branch)
            .await
            .unwrap();

        session.forget_branch().await.unwrap();

        assert!(session.selected_branch().await.unwrap().is_none());
        let view: Option<String> = session.get(session_keys::CURRENT_VIEW).await.unwrap();
        assert!(view.is_none());
        let other: Option<String> = session.get("cart_hint").await.unwrap();
        assert_eq!(other.as_deref(), Some("3 items"));
    }

    #[tokio::test]
    async fn test_blank_stored_value_is_absent() {
        let session = session();
        session
            .insert(session_keys::SELECTED_BRANCH_ID, "  ")
            .await
            .unwrap();

        assert!(session.selected_branch().await.unwrap().is_none());
    }
}
