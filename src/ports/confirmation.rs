//! Reset Confirmation Port.
//!
//! Resetting discards every edit, so the store refuses to do it without
//! an interactive yes from whoever is driving the UI.

/// Port for confirming destructive operations with the user.
pub trait ResetConfirmation: Send + Sync {
    /// Returns true when the user accepts the prompt.
    fn confirm(&self, prompt: &str) -> bool;
}
