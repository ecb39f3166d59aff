//! Mock Review API for testing.
//!
//! Replies are scripted per endpoint as JSON and decoded through the same
//! wire types the HTTP adapter uses, so tests exercise lenient decoding
//! too.
//!
//! # Features
//!
//! - Scripted replies, consumed in order per endpoint
//! - Per-reply delays for ordering and teardown tests
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let api = MockReviewApi::new()
//!     .with_json(Endpoint::Analyze, json!({"intent": "negative"}))
//!     .with_error(Endpoint::MemoryStats, ApiError::Server { status: 500, message: "boom".into() });
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::memory::{RawMemorySnapshot, RawSystemInfoEnvelope};
use crate::domain::report::wire::RawAnalysis;
use crate::ports::{
    AnalyzePayload, ApiError, ClearReceipt, ClearScope, ExportReceipt, ReviewApi,
};

/// Backend operation a reply is scripted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Analyze,
    MemoryStats,
    ClearMemory,
    ExportMemory,
    SystemInfo,
    StoredAnalysis,
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Analyze(AnalyzePayload),
    MemoryStats,
    ClearMemory(ClearScope),
    ExportMemory,
    SystemInfo,
    StoredAnalysis(String),
}

impl MockCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            MockCall::Analyze(_) => Endpoint::Analyze,
            MockCall::MemoryStats => Endpoint::MemoryStats,
            MockCall::ClearMemory(_) => Endpoint::ClearMemory,
            MockCall::ExportMemory => Endpoint::ExportMemory,
            MockCall::SystemInfo => Endpoint::SystemInfo,
            MockCall::StoredAnalysis(_) => Endpoint::StoredAnalysis,
        }
    }
}

#[derive(Debug, Clone)]
struct MockReply {
    result: Result<Value, ApiError>,
    delay: Duration,
}

/// Scriptable in-process stand-in for the analysis backend.
#[derive(Debug, Clone)]
pub struct MockReviewApi {
    base_url: String,
    replies: Arc<Mutex<HashMap<Endpoint, VecDeque<MockReply>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockReviewApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReviewApi {
    pub fn new() -> Self {
        Self {
            base_url: "http://mock.invalid".to_string(),
            replies: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a JSON body for `endpoint`.
    pub fn with_json(self, endpoint: Endpoint, body: Value) -> Self {
        self.push(endpoint, Ok(body), Duration::ZERO);
        self
    }

    /// Queues a JSON body delivered after `delay`.
    pub fn with_delayed_json(self, endpoint: Endpoint, body: Value, delay: Duration) -> Self {
        self.push(endpoint, Ok(body), delay);
        self
    }

    /// Queues an error for `endpoint`.
    pub fn with_error(self, endpoint: Endpoint, error: ApiError) -> Self {
        self.push(endpoint, Err(error), Duration::ZERO);
        self
    }

    /// Queues an error delivered after `delay`.
    pub fn with_delayed_error(self, endpoint: Endpoint, error: ApiError, delay: Duration) -> Self {
        self.push(endpoint, Err(error), delay);
        self
    }

    /// Queues a reply on an already shared mock.
    pub fn push(&self, endpoint: Endpoint, result: Result<Value, ApiError>, delay: Duration) {
        self.replies
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(MockReply { result, delay });
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn reply<T: DeserializeOwned>(&self, call: MockCall) -> Result<T, ApiError> {
        let endpoint = call.endpoint();
        self.calls.lock().unwrap().push(call);

        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(|queue| queue.pop_front());
        let Some(reply) = next else {
            return Err(ApiError::Network(format!(
                "no scripted reply for {:?}",
                endpoint
            )));
        };

        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }
        let body = reply.result?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ReviewApi for MockReviewApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn analyze(&self, payload: &AnalyzePayload) -> Result<RawAnalysis, ApiError> {
        self.reply(MockCall::Analyze(payload.clone())).await
    }

    async fn memory_stats(&self) -> Result<RawMemorySnapshot, ApiError> {
        self.reply(MockCall::MemoryStats).await
    }

    async fn clear_memory(&self, scope: ClearScope) -> Result<ClearReceipt, ApiError> {
        self.reply(MockCall::ClearMemory(scope)).await
    }

    async fn export_memory(&self) -> Result<ExportReceipt, ApiError> {
        self.reply(MockCall::ExportMemory).await
    }

    async fn system_info(&self) -> Result<RawSystemInfoEnvelope, ApiError> {
        self.reply(MockCall::SystemInfo).await
    }

    async fn stored_analysis(&self, query: &str) -> Result<Option<RawAnalysis>, ApiError> {
        match self
            .reply::<RawAnalysis>(MockCall::StoredAnalysis(query.to_string()))
            .await
        {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_are_consumed_in_order_per_endpoint() {
        let api = MockReviewApi::new()
            .with_json(Endpoint::MemoryStats, json!({"total_queries": 1}))
            .with_json(Endpoint::MemoryStats, json!({"total_queries": 2}));

        let first = api.memory_stats().await.unwrap();
        let second = api.memory_stats().await.unwrap();
        assert_eq!(first.total_queries, Some(1));
        assert_eq!(second.total_queries, Some(2));
        assert_eq!(api.call_count(Endpoint::MemoryStats), 2);
    }

    #[tokio::test]
    async fn unscripted_endpoint_is_a_network_error() {
        let api = MockReviewApi::new();
        assert!(matches!(api.export_memory().await, Err(ApiError::Network(_))));
        assert_eq!(api.calls(), vec![MockCall::ExportMemory]);
    }

    #[tokio::test]
    async fn stored_analysis_not_found_is_none() {
        let api = MockReviewApi::new().with_error(
            Endpoint::StoredAnalysis,
            ApiError::Server {
                status: 404,
                message: "Analysis not found".to_string(),
            },
        );
        assert!(api.stored_analysis("q").await.unwrap().is_none());
    }
}
