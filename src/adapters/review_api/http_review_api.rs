//! HTTP Review API - Implementation of ReviewApi over reqwest.
//!
//! # Configuration
//!
//! ```ignore
//! let api = HttpReviewApi::from_config(&config.api)?;
//! let raw = api.analyze(&AnalyzePayload::new("battery life")).await?;
//! ```
//!
//! # Errors
//!
//! Transport failures map to `ApiError::Network` or `ApiError::Timeout`.
//! Non-OK statuses map to `ApiError::Server`, carrying the body's `error`
//! field when the backend sent one.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::domain::memory::{RawMemorySnapshot, RawSystemInfoEnvelope};
use crate::domain::report::wire::RawAnalysis;
use crate::ports::{
    AnalyzePayload, ApiError, ClearReceipt, ClearRequest, ClearScope, ExportReceipt, ReviewApi,
};

/// reqwest-backed client for the analysis backend.
#[derive(Debug, Clone)]
pub struct HttpReviewApi {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpReviewApi {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/api/memory/analysis/{query}` with the query escaped as one
    /// path segment.
    fn stored_analysis_url(&self, query: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Network(format!("Invalid base URL: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Network("Base URL cannot carry a path".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["api", "memory", "analysis", query]);
        }
        Ok(url)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ApiError::Network(format!("Connection failed: {}", e))
        } else {
            ApiError::Network(e.to_string())
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    /// Reads the body, turning non-OK statuses into `ApiError::Server`.
    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: server_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// The `error` field of a JSON error body, or a generic description.
fn server_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn analyze(&self, payload: &AnalyzePayload) -> Result<RawAnalysis, ApiError> {
        tracing::debug!(query = %payload.query, "POST /api/analyze");
        let response = self
            .send(self.client.post(self.endpoint("/api/analyze")).json(payload))
            .await?;
        self.read_json(response).await
    }

    async fn memory_stats(&self) -> Result<RawMemorySnapshot, ApiError> {
        tracing::debug!("GET /api/memory/stats");
        let response = self
            .send(self.client.get(self.endpoint("/api/memory/stats")))
            .await?;
        self.read_json(response).await
    }

    async fn clear_memory(&self, scope: ClearScope) -> Result<ClearReceipt, ApiError> {
        tracing::debug!(scope = scope.as_str(), "POST /api/memory/clear");
        let response = self
            .send(
                self.client
                    .post(self.endpoint("/api/memory/clear"))
                    .json(&ClearRequest { scope }),
            )
            .await?;
        self.read_json(response).await
    }

    async fn export_memory(&self) -> Result<ExportReceipt, ApiError> {
        tracing::debug!("POST /api/memory/export");
        let response = self
            .send(self.client.post(self.endpoint("/api/memory/export")))
            .await?;
        self.read_json(response).await
    }

    async fn system_info(&self) -> Result<RawSystemInfoEnvelope, ApiError> {
        tracing::debug!("GET /api/system/info");
        let response = self
            .send(self.client.get(self.endpoint("/api/system/info")))
            .await?;
        self.read_json(response).await
    }

    async fn stored_analysis(&self, query: &str) -> Result<Option<RawAnalysis>, ApiError> {
        let url = self.stored_analysis_url(query)?;
        tracing::debug!(%url, "GET stored analysis");
        let response = self.send(self.client.get(url)).await?;
        match self.read_json(response).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
