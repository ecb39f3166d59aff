//! Performance and review statistics attached to a report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Score;

/// Timed sub-phase of the backend pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    FeatureExtraction,
    Retrieval,
    FeatureAnalysis,
    Summarization,
    FaithfulnessCheck,
    Advisory,
    Evaluation,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::FeatureExtraction,
        Phase::Retrieval,
        Phase::FeatureAnalysis,
        Phase::Summarization,
        Phase::FaithfulnessCheck,
        Phase::Advisory,
        Phase::Evaluation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::FeatureExtraction => "Feature Extraction",
            Phase::Retrieval => "Retrieval",
            Phase::FeatureAnalysis => "Feature Analysis",
            Phase::Summarization => "Summarization",
            Phase::FaithfulnessCheck => "Faithfulness Check",
            Phase::Advisory => "Advisor Agent",
            Phase::Evaluation => "Evaluation",
        }
    }
}

/// Pipeline metrics. Every field is optional and shown only if present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_latency_seconds: Option<f64>,
    pub retrieval_count: Option<u64>,
    pub retrieval_precision: Option<Score>,
    pub rating_accuracy: Option<Score>,
    pub faithfulness_score: Option<Score>,
    pub suggestions_generated: Option<u64>,
    pub phase_durations: BTreeMap<Phase, f64>,
}

impl PerformanceMetrics {
    /// Returns true when the backend sent no metric at all.
    pub fn is_empty(&self) -> bool {
        self.total_latency_seconds.is_none()
            && self.retrieval_count.is_none()
            && self.retrieval_precision.is_none()
            && self.rating_accuracy.is_none()
            && self.faithfulness_score.is_none()
            && self.suggestions_generated.is_none()
            && self.phase_durations.is_empty()
    }

    pub fn phase(&self, phase: Phase) -> Option<f64> {
        self.phase_durations.get(&phase).copied()
    }
}

/// Headline numbers about the retrieved reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub reviews_retrieved: Option<u64>,
    pub avg_rating: Option<f64>,
    pub faithfulness: Option<Score>,
}
