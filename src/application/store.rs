//! Shared async cell holding one domain's fetch state.
//!
//! The dispatcher owns a [`DomainStore`]; everything else gets a
//! [`DomainReader`], which can only look.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::DispatchError;
use crate::domain::fetch::{ApplyOutcome, DispatchTicket, DomainState, Retention, Settlement};

/// Write handle to one domain's state.
#[derive(Debug)]
pub struct DomainStore<T> {
    domain: &'static str,
    state: Arc<RwLock<DomainState<T>>>,
}

impl<T> Clone for DomainStore<T> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain,
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + Sync> DomainStore<T> {
    /// Creates an idle store. `domain` names it in logs.
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            state: Arc::new(RwLock::new(DomainState::new())),
        }
    }

    pub fn domain(&self) -> &'static str {
        self.domain
    }

    pub fn reader(&self) -> DomainReader<T> {
        DomainReader {
            state: Arc::clone(&self.state),
        }
    }

    /// Starts a dispatch. Refused once the store is detached.
    pub async fn begin(&self, retention: Retention) -> Result<DispatchTicket, DispatchError> {
        let mut state = self.state.write().await;
        if state.is_detached() {
            tracing::debug!(domain = self.domain, "dispatch refused after teardown");
            return Err(DispatchError::Discarded(ApplyOutcome::Detached));
        }
        let ticket = state.begin(retention);
        tracing::debug!(
            domain = self.domain,
            request_id = %ticket.request_id(),
            generation = ticket.generation(),
            "dispatch started"
        );
        Ok(ticket)
    }

    /// Applies a settlement, returning whether it took effect.
    pub async fn settle(&self, ticket: &DispatchTicket, settlement: Settlement<T>) -> ApplyOutcome {
        let outcome = self.state.write().await.settle(ticket, settlement);
        match outcome {
            ApplyOutcome::Applied => tracing::debug!(
                domain = self.domain,
                request_id = %ticket.request_id(),
                "dispatch settled"
            ),
            ApplyOutcome::Superseded | ApplyOutcome::Detached => tracing::debug!(
                domain = self.domain,
                request_id = %ticket.request_id(),
                ?outcome,
                "settlement discarded"
            ),
        }
        outcome
    }

    pub async fn reject(&self, message: impl Into<String>) {
        self.state.write().await.reject(message);
    }

    pub async fn detach(&self) {
        self.state.write().await.detach();
    }

    pub async fn snapshot(&self) -> DomainState<T> {
        self.state.read().await.clone()
    }
}

/// Read-only handle to one domain's state.
#[derive(Debug)]
pub struct DomainReader<T> {
    state: Arc<RwLock<DomainState<T>>>,
}

impl<T> Clone for DomainReader<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + Send + Sync> DomainReader<T> {
    pub async fn snapshot(&self) -> DomainState<T> {
        self.state.read().await.clone()
    }

    pub async fn is_pending(&self) -> bool {
        self.state.read().await.is_pending()
    }
}

/// Turns a non-applied outcome into `DispatchError::Discarded`.
pub(crate) fn ensure_applied(outcome: ApplyOutcome) -> Result<(), DispatchError> {
    match outcome {
        ApplyOutcome::Applied => Ok(()),
        other => Err(DispatchError::Discarded(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fetch::FetchStatus;

    #[tokio::test]
    async fn reader_sees_writes() {
        let store: DomainStore<u32> = DomainStore::new("test");
        let reader = store.reader();

        let ticket = store.begin(Retention::Keep).await.unwrap();
        assert!(reader.is_pending().await);

        store.settle(&ticket, Settlement::Succeeded(7)).await;
        let state = reader.snapshot().await;
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.data(), Some(&7));
    }

    #[tokio::test]
    async fn begin_after_detach_is_refused() {
        let store: DomainStore<u32> = DomainStore::new("test");
        store.detach().await;
        assert!(matches!(
            store.begin(Retention::Keep).await,
            Err(DispatchError::Discarded(ApplyOutcome::Detached))
        ));
        assert_eq!(store.snapshot().await.status(), FetchStatus::Idle);
    }

    #[tokio::test]
    async fn stale_ticket_is_discarded() {
        let store: DomainStore<u32> = DomainStore::new("test");
        let first = store.begin(Retention::Keep).await.unwrap();
        let second = store.begin(Retention::Keep).await.unwrap();

        assert_eq!(store.settle(&second, Settlement::Succeeded(2)).await, ApplyOutcome::Applied);
        assert_eq!(
            store.settle(&first, Settlement::Succeeded(1)).await,
            ApplyOutcome::Superseded
        );
        assert_eq!(store.snapshot().await.data(), Some(&2));
    }

    #[test]
    fn ensure_applied_maps_outcomes() {
        assert!(ensure_applied(ApplyOutcome::Applied).is_ok());
        assert!(matches!(
            ensure_applied(ApplyOutcome::Superseded),
            Err(DispatchError::Discarded(ApplyOutcome::Superseded))
        ));
    }
}
