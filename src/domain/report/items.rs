//! Canonical report items.
//!
//! Optional attributes are `None` when the backend did not send them. They
//! are never filled with placeholder values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Most sample quotes shown per feature.
pub const MAX_SAMPLE_QUOTES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintItem {
    pub issue_text: String,
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PraiseItem {
    pub feature_text: String,
    pub frequency: Option<String>,
}

/// Urgency attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub area: Option<String>,
    pub suggestion: String,
    pub priority: Option<Priority>,
    pub impact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingItem {
    pub strategy: Option<String>,
    pub suggestion: String,
    pub target_audience: Option<String>,
    pub expected_outcome: Option<String>,
}

/// Sentiment split of the reviews mentioning a feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: Option<u64>,
    pub neutral: Option<u64>,
    pub negative: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStat {
    pub mention_count: Option<u64>,
    pub avg_rating: Option<f64>,
    pub sentiment_counts: Option<SentimentCounts>,
    pub summary: Option<String>,
    pub sample_quotes: Option<Vec<String>>,
}

impl FeatureStat {
    /// Sample quotes to display, capped at [`MAX_SAMPLE_QUOTES`].
    pub fn quotes_to_render(&self) -> &[String] {
        match &self.sample_quotes {
            Some(quotes) => &quotes[..quotes.len().min(MAX_SAMPLE_QUOTES)],
            None => &[],
        }
    }
}
