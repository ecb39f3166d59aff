//! ClearMemoryHandler - Confirms, clears backend memory, then refreshes.

use std::sync::Arc;

use super::LoadMemoryHandler;
use crate::application::DispatchError;
use crate::ports::{ClearScope, ConfirmationPrompt, Notice, ReviewApi, UserNotifier};

pub const CLEAR_FAILED_NOTICE: &str = "Failed to clear memory";

/// Result of a clear request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The user said no; nothing was sent.
    Declined,
    /// The backend cleared memory and the memory domain was refreshed.
    Cleared { message: Option<String> },
}

#[derive(Clone)]
pub struct ClearMemoryHandler {
    api: Arc<dyn ReviewApi>,
    confirmation: Arc<dyn ConfirmationPrompt>,
    notifier: Arc<dyn UserNotifier>,
    refresh: LoadMemoryHandler,
}

impl ClearMemoryHandler {
    pub fn new(
        api: Arc<dyn ReviewApi>,
        confirmation: Arc<dyn ConfirmationPrompt>,
        notifier: Arc<dyn UserNotifier>,
        refresh: LoadMemoryHandler,
    ) -> Self {
        Self {
            api,
            confirmation,
            notifier,
            refresh,
        }
    }

    /// Clears `scope` after the user confirms.
    ///
    /// Never touches the memory domain directly; on success the domain is
    /// refreshed through one `LoadMemoryHandler` call.
    pub async fn handle(&self, scope: ClearScope) -> Result<ClearOutcome, DispatchError> {
        if !self.confirmation.confirm(scope.confirmation_prompt()).await {
            tracing::debug!(scope = scope.as_str(), "clear declined");
            return Ok(ClearOutcome::Declined);
        }

        let receipt = match self.api.clear_memory(scope).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(scope = scope.as_str(), error = %err, "error clearing memory");
                self.notifier.notify(Notice::error(CLEAR_FAILED_NOTICE));
                return Err(err.into());
            }
        };

        tracing::info!(scope = scope.as_str(), "memory cleared");
        if let Some(message) = &receipt.message {
            self.notifier.notify(Notice::success(message.clone()));
        }

        // Refresh failures land in the memory domain's own error slot.
        if let Err(err) = self.refresh.handle().await {
            tracing::debug!(error = %err, "memory refresh after clear did not apply");
        }

        Ok(ClearOutcome::Cleared {
            message: receipt.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        Endpoint, MockCall, MockReviewApi, RecordingNotifier, ScriptedConfirmation,
    };
    use crate::application::store::DomainStore;
    use crate::ports::ApiError;
    use serde_json::json;

    fn handler(
        api: &MockReviewApi,
        confirmation: ScriptedConfirmation,
        notifier: &RecordingNotifier,
    ) -> ClearMemoryHandler {
        let api: Arc<dyn ReviewApi> = Arc::new(api.clone());
        let refresh = LoadMemoryHandler::new(api.clone(), DomainStore::new("memory"));
        ClearMemoryHandler::new(
            api,
            Arc::new(confirmation),
            Arc::new(notifier.clone()),
            refresh,
        )
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let api = MockReviewApi::new();
        let notifier = RecordingNotifier::new();
        let confirmation = ScriptedConfirmation::declining();

        let outcome = handler(&api, confirmation.clone(), &notifier)
            .handle(ClearScope::All)
            .await
            .unwrap();

        assert_eq!(outcome, ClearOutcome::Declined);
        assert_eq!(api.total_calls(), 0);
        assert_eq!(
            confirmation.prompts(),
            vec!["Are you sure you want to clear ALL memory? This cannot be undone."]
        );
    }

    #[tokio::test]
    async fn accepted_clear_refreshes_memory_exactly_once() {
        let api = MockReviewApi::new()
            .with_json(Endpoint::ClearMemory, json!({"message": "All memory cleared"}))
            .with_json(Endpoint::MemoryStats, json!({}));
        let notifier = RecordingNotifier::new();

        let outcome = handler(&api, ScriptedConfirmation::accepting(), &notifier)
            .handle(ClearScope::All)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ClearOutcome::Cleared {
                message: Some("All memory cleared".to_string())
            }
        );
        assert_eq!(
            api.calls(),
            vec![MockCall::ClearMemory(ClearScope::All), MockCall::MemoryStats]
        );
        assert_eq!(notifier.messages(), vec!["All memory cleared"]);
    }

    #[tokio::test]
    async fn failed_clear_notifies_and_skips_refresh() {
        let api = MockReviewApi::new()
            .with_error(Endpoint::ClearMemory, ApiError::Network("refused".to_string()));
        let notifier = RecordingNotifier::new();

        let result = handler(&api, ScriptedConfirmation::accepting(), &notifier)
            .handle(ClearScope::Session)
            .await;

        assert!(matches!(result, Err(DispatchError::Api(_))));
        assert_eq!(api.call_count(Endpoint::MemoryStats), 0);
        assert_eq!(notifier.messages(), vec![CLEAR_FAILED_NOTICE]);
    }
}
