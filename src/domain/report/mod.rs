//! Analysis report: wire shapes, canonical types and normalization.
//!
//! - `wire` / `lenient` - what the backend sends, decoded without failing
//! - `items` / `metrics` / `intent` - the canonical, render-safe types
//! - `normalizer` - the only place that converts one into the other

pub mod lenient;
pub mod wire;

mod intent;
mod items;
mod metrics;
mod normalizer;

pub use intent::{Intent, UnknownIntent};
pub use items::{
    ComplaintItem, FeatureStat, MarketingItem, PraiseItem, Priority, RecommendationItem,
    SentimentCounts, MAX_SAMPLE_QUOTES,
};
pub use metrics::{PerformanceMetrics, Phase, ReviewStats};
pub use normalizer::{
    normalize_analysis, normalize_complaint, normalize_feature, normalize_marketing,
    normalize_praise, normalize_recommendation, DualSlot, SlotSource,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A normalized analysis, ready for the presentation rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Query echoed back by the backend.
    pub query: Option<String>,
    pub intent: Intent,
    /// Empty when the backend sent no summary.
    pub summary_text: String,
    pub top_complaints: Vec<ComplaintItem>,
    pub top_praises: Vec<PraiseItem>,
    pub feature_analysis: BTreeMap<String, FeatureStat>,
    pub recommendations: Vec<RecommendationItem>,
    pub marketing_suggestions: Vec<MarketingItem>,
    pub competitive_advantages: Vec<String>,
    pub risk_areas: Vec<String>,
    pub review_stats: ReviewStats,
    /// Per-stage latencies reported under `metrics.latency_breakdown`.
    pub latency_breakdown: BTreeMap<String, f64>,
    pub metrics: PerformanceMetrics,
}
