//! Review API Port - Interface to the remote analysis backend.
//!
//! The dashboard talks to one HTTP backend that exposes the analysis,
//! memory and system-info endpoints. Implementations return the raw wire
//! shapes; normalization happens in the domain layer.
//!
//! | Operation          | Endpoint                              |
//! |--------------------|---------------------------------------|
//! | `analyze`          | `POST /api/analyze`                   |
//! | `memory_stats`     | `GET /api/memory/stats`               |
//! | `clear_memory`     | `POST /api/memory/clear`              |
//! | `export_memory`    | `POST /api/memory/export`             |
//! | `system_info`      | `GET /api/system/info`                |
//! | `stored_analysis`  | `GET /api/memory/analysis/{query}`    |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::StarRating;
use crate::domain::memory::{RawMemorySnapshot, RawSystemInfoEnvelope};
use crate::domain::report::lenient;
use crate::domain::report::wire::RawAnalysis;

/// Port for the analysis backend.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Base URL requests are sent to. Used in diagnostic messages.
    fn base_url(&self) -> &str;

    /// Submit a query for analysis.
    async fn analyze(&self, payload: &AnalyzePayload) -> Result<RawAnalysis, ApiError>;

    /// Fetch memory and cache statistics.
    async fn memory_stats(&self) -> Result<RawMemorySnapshot, ApiError>;

    /// Clear backend memory for the given scope.
    async fn clear_memory(&self, scope: ClearScope) -> Result<ClearReceipt, ApiError>;

    /// Ask the backend to export its memory to a file.
    async fn export_memory(&self) -> Result<ExportReceipt, ApiError>;

    /// Fetch the backend's version and capability description.
    async fn system_info(&self) -> Result<RawSystemInfoEnvelope, ApiError>;

    /// Fetch a stored analysis by its query text.
    ///
    /// Returns `Ok(None)` when the backend has no record for `query`.
    async fn stored_analysis(&self, query: &str) -> Result<Option<RawAnalysis>, ApiError>;
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzePayload {
    pub query: String,
    /// Always sent as `null`; the dashboard has no brand filter.
    pub brand: Option<String>,
    pub min_star: Option<StarRating>,
    pub max_star: Option<StarRating>,
}

impl AnalyzePayload {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            brand: None,
            min_star: None,
            max_star: None,
        }
    }

    pub fn with_star_range(mut self, min: Option<StarRating>, max: Option<StarRating>) -> Self {
        self.min_star = min;
        self.max_star = max;
        self
    }
}

/// Which memory tier to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearScope {
    /// Current session only.
    #[serde(rename = "short_term")]
    Session,
    #[serde(rename = "all")]
    All,
}

impl ClearScope {
    /// Wire value for the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearScope::Session => "short_term",
            ClearScope::All => "all",
        }
    }

    /// Question put to the user before clearing.
    pub fn confirmation_prompt(&self) -> &'static str {
        match self {
            ClearScope::Session => "Clear short-term memory (current session only)?",
            ClearScope::All => "Are you sure you want to clear ALL memory? This cannot be undone.",
        }
    }
}

/// Body of `POST /api/memory/clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearRequest {
    #[serde(rename = "type")]
    pub scope: ClearScope,
}

/// Response of `POST /api/memory/clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClearReceipt {
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

/// Response of `POST /api/memory/export`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExportReceipt {
    #[serde(default, deserialize_with = "lenient::text")]
    pub file_path: Option<String>,
}

/// Errors from the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, DNS, CORS).
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Non-OK status. `message` is the body's `error` field when present.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The body was not valid JSON for the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Short description for the user: the backend's own message for
    /// server errors, the full description otherwise.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
