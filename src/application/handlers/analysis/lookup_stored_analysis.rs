//! LookupStoredAnalysisHandler - Fetches a past analysis by query text.
//!
//! Result goes back to the caller only; no domain state changes.

use std::sync::Arc;

use crate::application::DispatchError;
use crate::domain::report::{normalize_analysis, AnalysisReport};
use crate::ports::{Notice, ReviewApi, UserNotifier};

pub const NOT_FOUND_NOTICE: &str = "Analysis not found for this query";
pub const LOOKUP_FAILED_NOTICE: &str = "Failed to load analysis details";

#[derive(Clone)]
pub struct LookupStoredAnalysisHandler {
    api: Arc<dyn ReviewApi>,
    notifier: Arc<dyn UserNotifier>,
}

impl LookupStoredAnalysisHandler {
    pub fn new(api: Arc<dyn ReviewApi>, notifier: Arc<dyn UserNotifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn handle(&self, query: &str) -> Result<Option<AnalysisReport>, DispatchError> {
        match self.api.stored_analysis(query).await {
            Ok(Some(raw)) => Ok(Some(normalize_analysis(raw))),
            Ok(None) => {
                tracing::debug!(query, "no stored analysis");
                self.notifier.notify(Notice::error(NOT_FOUND_NOTICE));
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "stored analysis lookup failed");
                self.notifier.notify(Notice::error(LOOKUP_FAILED_NOTICE));
                Err(err.into())
            }
        }
    }
}
