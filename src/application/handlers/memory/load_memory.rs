//! LoadMemoryHandler - Refreshes the memory analytics domain.

use std::sync::Arc;

use crate::application::store::{ensure_applied, DomainStore};
use crate::application::DispatchError;
use crate::domain::fetch::{Retention, Settlement};
use crate::domain::memory::MemorySnapshot;
use crate::ports::{ApiError, ReviewApi};

#[derive(Clone)]
pub struct LoadMemoryHandler {
    api: Arc<dyn ReviewApi>,
    state: DomainStore<MemorySnapshot>,
}

impl LoadMemoryHandler {
    pub fn new(api: Arc<dyn ReviewApi>, state: DomainStore<MemorySnapshot>) -> Self {
        Self { api, state }
    }

    /// Fetches memory stats.
    ///
    /// A non-OK status stores the explicit empty snapshot next to the
    /// error, so the view can tell "fetched but empty" from "never
    /// fetched". Transport and decode failures keep whatever was shown.
    pub async fn handle(&self) -> Result<MemorySnapshot, DispatchError> {
        let ticket = self.state.begin(Retention::Keep).await?;

        match self.api.memory_stats().await {
            Ok(raw) => {
                let snapshot = MemorySnapshot::from(raw);
                tracing::info!(
                    request_id = %ticket.request_id(),
                    total_queries = snapshot.total_queries,
                    "memory data loaded"
                );
                let outcome = self
                    .state
                    .settle(&ticket, Settlement::Succeeded(snapshot.clone()))
                    .await;
                ensure_applied(outcome)?;
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(
                    request_id = %ticket.request_id(),
                    status = ?err.status(),
                    error = %err,
                    "failed to fetch memory data"
                );
                let settlement = match &err {
                    ApiError::Server { status, .. } => Settlement::failed_with(
                        format!("Failed to load memory: {}", status),
                        MemorySnapshot::empty(),
                    ),
                    other => Settlement::failed(format!("Error: {}", other)),
                };
                let outcome = self.state.settle(&ticket, settlement).await;
                ensure_applied(outcome)?;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{Endpoint, MockReviewApi};
    use crate::domain::fetch::FetchStatus;
    use serde_json::json;

    fn handler(api: &MockReviewApi) -> (LoadMemoryHandler, DomainStore<MemorySnapshot>) {
        let store = DomainStore::new("memory");
        (LoadMemoryHandler::new(Arc::new(api.clone()), store.clone()), store)
    }

    #[tokio::test]
    async fn success_stores_snapshot() {
        let api = MockReviewApi::new().with_json(
            Endpoint::MemoryStats,
            json!({"total_queries": 3, "brands": ["Casio", "Casio"]}),
        );
        let (handler, store) = handler(&api);

        let snapshot = handler.handle().await.unwrap();
        assert_eq!(snapshot.total_queries, 3);
        assert_eq!(snapshot.brands, vec!["Casio"]);

        let state = store.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Success);
        assert!(state.error_message().is_none());
    }

    #[tokio::test]
    async fn server_error_sets_explicit_empty_snapshot() {
        let api = MockReviewApi::new().with_error(
            Endpoint::MemoryStats,
            ApiError::Server {
                status: 500,
                message: "Failed to get memory stats".to_string(),
            },
        );
        let (handler, store) = handler(&api);

        assert!(handler.handle().await.is_err());

        let state = store.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Failure);
        assert_eq!(state.data(), Some(&MemorySnapshot::empty()));
        assert!(state.error_message().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn network_error_keeps_previous_data() {
        let api = MockReviewApi::new()
            .with_json(Endpoint::MemoryStats, json!({"total_queries": 5}))
            .with_error(Endpoint::MemoryStats, ApiError::Network("refused".to_string()));
        let (handler, store) = handler(&api);

        handler.handle().await.unwrap();
        assert!(handler.handle().await.is_err());

        let state = store.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Failure);
        assert_eq!(state.data().map(|s| s.total_queries), Some(5));
        assert_eq!(state.error_message(), Some("Error: network error: refused"));
    }

    #[tokio::test]
    async fn refresh_clears_stale_error() {
        let api = MockReviewApi::new()
            .with_error(Endpoint::MemoryStats, ApiError::Network("refused".to_string()))
            .with_json(Endpoint::MemoryStats, json!({}));
        let (handler, store) = handler(&api);

        assert!(handler.handle().await.is_err());
        handler.handle().await.unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Success);
        assert!(state.error_message().is_none());
    }
}
