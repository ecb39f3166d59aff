//! RunAnalysisHandler - Submits a query and stores the normalized report.

use std::sync::Arc;

use crate::application::store::{ensure_applied, DomainStore};
use crate::application::DispatchError;
use crate::domain::fetch::{Retention, Settlement};
use crate::domain::foundation::{StarRating, ValidationError};
use crate::domain::report::{normalize_analysis, AnalysisReport};
use crate::ports::{AnalyzePayload, ApiError, ReviewApi};

/// What the user typed into the analysis form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub query: String,
    pub min_star: Option<u8>,
    pub max_star: Option<u8>,
}

impl AnalysisRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_star_range(mut self, min_star: Option<u8>, max_star: Option<u8>) -> Self {
        self.min_star = min_star;
        self.max_star = max_star;
        self
    }

    /// Checks the input and builds the request body.
    ///
    /// The query must contain non-whitespace text. Star bounds, when given,
    /// must be 1..=5 with `min_star <= max_star`.
    pub fn validate(&self) -> Result<AnalyzePayload, ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::empty_field("query"));
        }

        let min = self
            .min_star
            .map(|v| StarRating::try_new("min_star", v))
            .transpose()?;
        let max = self
            .max_star
            .map(|v| StarRating::try_new("max_star", v))
            .transpose()?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ValidationError::out_of_range(
                    "max_star",
                    i32::from(min.value()),
                    i32::from(StarRating::MAX.value()),
                    i32::from(max.value()),
                ));
            }
        }

        Ok(AnalyzePayload::new(self.query.clone()).with_star_range(min, max))
    }
}

/// Message stored in the analysis domain when the call fails.
pub fn analysis_failure_message(base_url: &str, err: &ApiError) -> String {
    format!(
        "Unable to connect to backend. Please ensure:\n\
         1. Backend server is running and reachable\n\
         2. Backend is running on {}\n\
         3. CORS is enabled on the backend\n\
         \n\
         Error: {}",
        base_url,
        err.detail()
    )
}

/// Handler for the analysis dispatch.
#[derive(Clone)]
pub struct RunAnalysisHandler {
    api: Arc<dyn ReviewApi>,
    state: DomainStore<AnalysisReport>,
}

impl RunAnalysisHandler {
    pub fn new(api: Arc<dyn ReviewApi>, state: DomainStore<AnalysisReport>) -> Self {
        Self { api, state }
    }

    pub async fn handle(&self, request: AnalysisRequest) -> Result<AnalysisReport, DispatchError> {
        let payload = match request.validate() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "analysis request rejected");
                self.state.reject(err.user_message()).await;
                return Err(err.into());
            }
        };

        let ticket = self.state.begin(Retention::Clear).await?;
        tracing::info!(
            request_id = %ticket.request_id(),
            query = %payload.query,
            "analyzing query"
        );

        match self.api.analyze(&payload).await {
            Ok(raw) => {
                let report = normalize_analysis(raw);
                tracing::info!(
                    request_id = %ticket.request_id(),
                    intent = %report.intent,
                    recommendations = report.recommendations.len(),
                    "analysis received"
                );
                let outcome = self
                    .state
                    .settle(&ticket, Settlement::Succeeded(report.clone()))
                    .await;
                ensure_applied(outcome)?;
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(
                    request_id = %ticket.request_id(),
                    status = ?err.status(),
                    error = %err,
                    "analysis failed"
                );
                let message = analysis_failure_message(self.api.base_url(), &err);
                let outcome = self.state.settle(&ticket, Settlement::failed(message)).await;
                ensure_applied(outcome)?;
                Err(err.into())
            }
        }
    }
}
