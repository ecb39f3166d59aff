//! Confirmation Port - Asks the user to approve a destructive action.

use async_trait::async_trait;

/// Port for yes/no confirmation dialogs.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Shows `message` and returns true when the user accepts.
    async fn confirm(&self, message: &str) -> bool;
}
