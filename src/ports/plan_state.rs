//! Plan State Port - the store contract.
//!
//! Handlers and the rendering host depend on this trait rather than the
//! concrete store so tests can substitute an in-memory fake.

use thiserror::Error;

use crate::domain::foundation::SubscriptionId;
use crate::domain::plan::{PlanDocument, PlanError, PlanUpdate};

use super::ResetConfirmation;

/// Callback invoked with each committed document.
pub type PlanListener = Box<dyn Fn(&PlanDocument) + Send + Sync>;

/// Errors surfaced by store operations.
///
/// Persistence failures are deliberately absent: they degrade to
/// in-memory state and a log line instead of failing the edit.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Port exposing the document with get/update/subscribe semantics.
///
/// Every mutation is synchronous: by the time `update` returns, the new
/// document has been persisted (or the failure logged) and every
/// subscriber has been notified. Listeners must not call back into the
/// store; nothing in the editor needs reentrancy and the store does not
/// promise it.
pub trait PlanState: Send + Sync {
    /// Read-only snapshot of the current document.
    fn document(&self) -> PlanDocument;

    /// Applies a typed update and commits the result.
    ///
    /// On validation failure the document is unchanged, nothing is
    /// persisted, and no subscriber fires.
    fn update(&self, update: PlanUpdate) -> Result<PlanDocument, StoreError>;

    /// Registers a listener for committed documents.
    fn subscribe(&self, listener: PlanListener) -> SubscriptionId;

    /// Removes a listener; returns false for an unknown id.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Restores the seed document after interactive confirmation.
    ///
    /// Returns false (and changes nothing) when the user declines.
    fn reset(&self, confirmation: &dyn ResetConfirmation) -> Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_state_is_object_safe() {
        fn check<T: PlanState + ?Sized>() {}
        check::<dyn PlanState>();
    }

    #[test]
    fn store_error_wraps_plan_errors() {
        let err: StoreError = PlanError::DuplicateStakeholder(
            crate::domain::foundation::StakeholderId::new(),
        )
        .into();
        assert!(err.to_string().contains("already on the plan"));
    }
}
