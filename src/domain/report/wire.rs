//! Raw shapes of the analysis payload as the backend sends them.
//!
//! Every field is optional and decoded leniently; the normalizer turns
//! these into the canonical report types. Nothing outside the normalizer
//! should look at these structs.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

use super::lenient;

/// A report item that is either a bare string or a structured record.
#[derive(Debug, Clone, PartialEq)]
pub enum WireItem<T> {
    Text(String),
    Structured(T),
}

impl<'de, T> Deserialize<'de> for WireItem<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(WireItem::Structured)
                .map_err(de::Error::custom),
            scalar => lenient::value_to_text(&scalar)
                .map(WireItem::Text)
                .ok_or_else(|| de::Error::custom("expected a string or an object")),
        }
    }
}

/// Root of the `POST /api/analyze` response (and of stored analyses).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysis {
    #[serde(default, deserialize_with = "lenient::text")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "lenient_summary")]
    pub summary: Option<WireItem<RawSummary>>,
    #[serde(default, deserialize_with = "lenient::record_map")]
    pub feature_analysis: BTreeMap<String, RawFeatureStat>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub recommendations: Vec<WireItem<RawRecommendation>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub marketing_suggestions: Vec<WireItem<RawMarketing>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub competitive_advantages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub risk_areas: Vec<String>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub advisor: Option<RawAdvisor>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub metrics: Option<RawMetrics>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub performance_metrics: Option<RawPerformanceMetrics>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub faithfulness: Option<RawFaithfulness>,
}

fn lenient_summary<'de, D>(deserializer: D) -> Result<Option<WireItem<RawSummary>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSummary {
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub top_complaints: Vec<WireItem<RawComplaint>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub top_praises: Vec<WireItem<RawPraise>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawComplaint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub issue: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPraise {
    #[serde(default, deserialize_with = "lenient::text")]
    pub feature: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecommendation {
    #[serde(default, deserialize_with = "lenient::text")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub suggestion: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub estimated_impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMarketing {
    #[serde(default, deserialize_with = "lenient::text")]
    pub strategy: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub suggestion: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub target_audience: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub expected_outcome: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatureStat {
    #[serde(default, deserialize_with = "lenient::count")]
    pub mention_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub sentiment: Option<RawSentiment>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_samples")]
    pub samples: Option<Vec<String>>,
}

fn lenient_samples<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => {
            Some(items.iter().filter_map(lenient::value_to_text).collect())
        }
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSentiment {
    #[serde(default, deserialize_with = "lenient::count")]
    pub positive: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub neutral: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub negative: Option<u64>,
}

/// The `advisor` block, the fallback location for advisory lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAdvisor {
    #[serde(default, deserialize_with = "lenient::list")]
    pub product_improvements: Vec<WireItem<RawRecommendation>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub marketing_suggestions: Vec<WireItem<RawMarketing>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub competitive_advantages: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub risk_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetrics {
    #[serde(default, deserialize_with = "lenient::count")]
    pub reviews_retrieved: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_latency: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub retrieval_precision: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number_map")]
    pub latency_breakdown: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPerformanceMetrics {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_latency: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub retrieval_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub retrieval_precision: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub rating_accuracy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub faithfulness_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub suggestions_generated: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub feature_extraction_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub retrieval_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub feature_analysis_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub summary_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub faithfulness_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub advisor_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub evaluation_time: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFaithfulness {
    #[serde(default, deserialize_with = "lenient::number")]
    pub improved_faithfulness: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_item_reads_bare_string() {
        let item: WireItem<RawComplaint> = serde_json::from_value(json!("battery")).unwrap();
        assert_eq!(item, WireItem::Text("battery".to_string()));
    }

    #[test]
    fn wire_item_reads_number_as_text() {
        let item: WireItem<RawComplaint> = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(item, WireItem::Text("7".to_string()));
    }

    #[test]
    fn wire_item_reads_object() {
        let item: WireItem<RawComplaint> =
            serde_json::from_value(json!({"issue": "strap", "frequency": "high"})).unwrap();
        assert_eq!(
            item,
            WireItem::Structured(RawComplaint {
                issue: Some("strap".to_string()),
                frequency: Some("high".to_string()),
            })
        );
    }

    #[test]
    fn wire_item_rejects_null_and_arrays() {
        assert!(serde_json::from_value::<WireItem<RawComplaint>>(json!(null)).is_err());
        assert!(serde_json::from_value::<WireItem<RawComplaint>>(json!([1])).is_err());
    }

    #[test]
    fn recommendation_reads_both_impact_spellings() {
        let rec: RawRecommendation = serde_json::from_value(
            json!({"suggestion": "x", "impact": "small", "estimated_impact": "big"}),
        )
        .unwrap();
        assert_eq!(rec.impact.as_deref(), Some("small"));
        assert_eq!(rec.estimated_impact.as_deref(), Some("big"));
    }

    #[test]
    fn analysis_survives_wrongly_typed_sections() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "intent": "negative",
            "summary": 42,
            "feature_analysis": [],
            "recommendations": "none",
            "advisor": "n/a",
            "metrics": {"reviews_retrieved": "12", "avg_rating": "bad"}
        }))
        .unwrap();

        assert_eq!(raw.intent.as_deref(), Some("negative"));
        assert_eq!(raw.summary, Some(WireItem::Text("42".to_string())));
        assert!(raw.feature_analysis.is_empty());
        assert!(raw.recommendations.is_empty());
        assert!(raw.advisor.is_none());
        let metrics = raw.metrics.unwrap();
        assert_eq!(metrics.reviews_retrieved, Some(12));
        assert!(metrics.avg_rating.is_none());
    }

    #[test]
    fn malformed_items_are_dropped_individually() {
        let raw: RawAnalysis = serde_json::from_value(json!({
            "recommendations": ["keep me", null, {"suggestion": "and me"}]
        }))
        .unwrap();
        assert_eq!(raw.recommendations.len(), 2);
    }
}
