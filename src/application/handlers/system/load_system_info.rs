//! LoadSystemInfoHandler - Fetches backend version and capabilities.
//!
//! System info is decoration. Failures are logged and recorded in the
//! system-info domain, never returned to the caller or shown as notices.

use std::sync::Arc;

use crate::application::store::DomainStore;
use crate::domain::fetch::{Retention, Settlement};
use crate::domain::memory::SystemInfo;
use crate::ports::ReviewApi;

#[derive(Clone)]
pub struct LoadSystemInfoHandler {
    api: Arc<dyn ReviewApi>,
    state: DomainStore<SystemInfo>,
}

impl LoadSystemInfoHandler {
    pub fn new(api: Arc<dyn ReviewApi>, state: DomainStore<SystemInfo>) -> Self {
        Self { api, state }
    }

    /// Returns the info when it was fetched and applied, `None` otherwise.
    pub async fn handle(&self) -> Option<SystemInfo> {
        let ticket = self.state.begin(Retention::Keep).await.ok()?;

        let settlement = match self.api.system_info().await {
            Ok(envelope) => match envelope.into_system_info() {
                Some(info) => Settlement::Succeeded(info),
                None => {
                    tracing::warn!("system info response has no 'system' object");
                    Settlement::failed("System info unavailable")
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch system info");
                Settlement::failed(err.to_string())
            }
        };

        let info = match &settlement {
            Settlement::Succeeded(info) => Some(info.clone()),
            Settlement::Failed { .. } => None,
        };
        if self.state.settle(&ticket, settlement).await.is_applied() {
            info
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{Endpoint, MockReviewApi};
    use crate::domain::fetch::FetchStatus;
    use crate::ports::ApiError;
    use serde_json::json;

    fn handler(api: MockReviewApi) -> (LoadSystemInfoHandler, DomainStore<SystemInfo>) {
        let store = DomainStore::new("system_info");
        (LoadSystemInfoHandler::new(Arc::new(api), store.clone()), store)
    }

    #[tokio::test]
    async fn success_stores_info() {
        let (handler, store) = handler(MockReviewApi::new().with_json(
            Endpoint::SystemInfo,
            json!({"system": {"version": "2.1", "architecture": "RAG", "features": [], "agents": ["A"]}}),
        ));

        let info = handler.handle().await.unwrap();
        assert_eq!(info.version, "2.1");
        assert_eq!(store.snapshot().await.status(), FetchStatus::Success);
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let (handler, store) = handler(
            MockReviewApi::new()
                .with_error(Endpoint::SystemInfo, ApiError::Network("refused".to_string())),
        );

        assert!(handler.handle().await.is_none());
        let state = store.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Failure);
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn missing_envelope_is_a_failure() {
        let (handler, store) = handler(
            MockReviewApi::new().with_json(Endpoint::SystemInfo, json!({"version": "2.1"})),
        );

        assert!(handler.handle().await.is_none());
        assert_eq!(store.snapshot().await.status(), FetchStatus::Failure);
    }
}
