//! Payload normalizer.
//!
//! Collapses the loosely typed wire payload into [`AnalysisReport`]. Bare
//! strings and structured records become the same canonical item; fields the
//! backend did not send stay `None`. Nothing here fails: a malformed shape
//! degrades to whatever text can be extracted.

use std::collections::BTreeMap;

use super::items::{
    ComplaintItem, FeatureStat, MarketingItem, PraiseItem, RecommendationItem, SentimentCounts,
};
use super::metrics::{PerformanceMetrics, Phase, ReviewStats};
use super::wire::{
    RawAnalysis, RawComplaint, RawFeatureStat, RawMarketing, RawMetrics, RawPerformanceMetrics,
    RawPraise, RawRecommendation, RawSummary, WireItem,
};
use super::{AnalysisReport, Intent};
use crate::domain::foundation::Score;

/// Where a dual-location list was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    Primary,
    Advisor,
    Neither,
}

/// A list the backend may send at the top level or under `advisor`.
///
/// The top-level slot wins whenever it is non-empty; the advisor slot is
/// used only otherwise. The two are never merged.
#[derive(Debug, Clone)]
pub struct DualSlot<T> {
    pub primary: Vec<T>,
    pub advisor: Vec<T>,
}

impl<T> DualSlot<T> {
    pub fn new(primary: Vec<T>, advisor: Vec<T>) -> Self {
        Self { primary, advisor }
    }

    pub fn resolve(self) -> (Vec<T>, SlotSource) {
        if !self.primary.is_empty() {
            (self.primary, SlotSource::Primary)
        } else if !self.advisor.is_empty() {
            (self.advisor, SlotSource::Advisor)
        } else {
            (Vec::new(), SlotSource::Neither)
        }
    }
}

/// Normalizes a full analysis payload.
pub fn normalize_analysis(raw: RawAnalysis) -> AnalysisReport {
    let RawAnalysis {
        query,
        intent,
        summary,
        feature_analysis,
        recommendations,
        marketing_suggestions,
        competitive_advantages,
        risk_areas,
        advisor,
        metrics,
        performance_metrics,
        faithfulness,
    } = raw;

    let advisor = advisor.unwrap_or_default();
    let (summary_text, top_complaints, top_praises) = normalize_summary(summary);

    let (recommendations, rec_source) =
        DualSlot::new(recommendations, advisor.product_improvements).resolve();
    let (marketing, marketing_source) =
        DualSlot::new(marketing_suggestions, advisor.marketing_suggestions).resolve();
    let (competitive_advantages, _) =
        DualSlot::new(competitive_advantages, advisor.competitive_advantages).resolve();
    let (risk_areas, _) = DualSlot::new(risk_areas, advisor.risk_areas).resolve();

    tracing::debug!(
        recommendations = recommendations.len(),
        recommendations_from = ?rec_source,
        marketing = marketing.len(),
        marketing_from = ?marketing_source,
        "Normalized advisory lists"
    );

    let metrics = metrics.unwrap_or_default();
    let review_stats = ReviewStats {
        reviews_retrieved: metrics.reviews_retrieved,
        avg_rating: metrics.avg_rating,
        faithfulness: score(
            "improved_faithfulness",
            faithfulness.and_then(|f| f.improved_faithfulness),
        ),
    };
    let performance = normalize_performance(performance_metrics.unwrap_or_default(), &metrics);

    AnalysisReport {
        query,
        intent: Intent::resolve(intent.as_deref()),
        summary_text,
        top_complaints,
        top_praises,
        feature_analysis: feature_analysis
            .into_iter()
            .map(|(name, stat)| (name, normalize_feature(stat)))
            .collect(),
        recommendations: recommendations.into_iter().map(normalize_recommendation).collect(),
        marketing_suggestions: marketing.into_iter().map(normalize_marketing).collect(),
        competitive_advantages,
        risk_areas,
        review_stats,
        latency_breakdown: metrics.latency_breakdown,
        metrics: performance,
    }
}

fn normalize_summary(
    summary: Option<WireItem<RawSummary>>,
) -> (String, Vec<ComplaintItem>, Vec<PraiseItem>) {
    match summary {
        None => (String::new(), Vec::new(), Vec::new()),
        Some(WireItem::Text(text)) => (text, Vec::new(), Vec::new()),
        Some(WireItem::Structured(summary)) => (
            summary.summary_text.unwrap_or_default(),
            summary.top_complaints.into_iter().map(normalize_complaint).collect(),
            summary.top_praises.into_iter().map(normalize_praise).collect(),
        ),
    }
}

pub fn normalize_complaint(item: WireItem<RawComplaint>) -> ComplaintItem {
    match item {
        WireItem::Text(issue_text) => ComplaintItem {
            issue_text,
            frequency: None,
        },
        WireItem::Structured(raw) => ComplaintItem {
            issue_text: primary_text(raw.issue, "complaint", "issue"),
            frequency: raw.frequency,
        },
    }
}

pub fn normalize_praise(item: WireItem<RawPraise>) -> PraiseItem {
    match item {
        WireItem::Text(feature_text) => PraiseItem {
            feature_text,
            frequency: None,
        },
        WireItem::Structured(raw) => PraiseItem {
            feature_text: primary_text(raw.feature, "praise", "feature"),
            frequency: raw.frequency,
        },
    }
}

pub fn normalize_recommendation(item: WireItem<RawRecommendation>) -> RecommendationItem {
    match item {
        WireItem::Text(suggestion) => RecommendationItem {
            area: None,
            suggestion,
            priority: None,
            impact: None,
        },
        WireItem::Structured(raw) => RecommendationItem {
            area: raw.area,
            suggestion: primary_text(raw.suggestion, "recommendation", "suggestion"),
            priority: raw.priority.and_then(|p| match p.parse() {
                Ok(priority) => Some(priority),
                Err(err) => {
                    tracing::warn!("Ignoring recommendation priority: {}", err);
                    None
                }
            }),
            impact: raw.impact.or(raw.estimated_impact),
        },
    }
}

pub fn normalize_marketing(item: WireItem<RawMarketing>) -> MarketingItem {
    match item {
        WireItem::Text(suggestion) => MarketingItem {
            strategy: None,
            suggestion,
            target_audience: None,
            expected_outcome: None,
        },
        WireItem::Structured(raw) => MarketingItem {
            strategy: raw.strategy,
            suggestion: primary_text(raw.suggestion, "marketing suggestion", "suggestion"),
            target_audience: raw.target_audience,
            expected_outcome: raw.expected_outcome,
        },
    }
}

pub fn normalize_feature(raw: RawFeatureStat) -> FeatureStat {
    FeatureStat {
        mention_count: raw.mention_count,
        avg_rating: raw.avg_rating,
        sentiment_counts: raw.sentiment.map(|s| SentimentCounts {
            positive: s.positive,
            neutral: s.neutral,
            negative: s.negative,
        }),
        summary: raw.summary,
        sample_quotes: raw.samples,
    }
}

/// Merges the `performance_metrics` block with the older `metrics` block,
/// preferring the former field by field.
fn normalize_performance(raw: RawPerformanceMetrics, fallback: &RawMetrics) -> PerformanceMetrics {
    let phase_durations: BTreeMap<Phase, f64> = [
        (Phase::FeatureExtraction, raw.feature_extraction_time),
        (Phase::Retrieval, raw.retrieval_time),
        (Phase::FeatureAnalysis, raw.feature_analysis_time),
        (Phase::Summarization, raw.summary_time),
        (Phase::FaithfulnessCheck, raw.faithfulness_time),
        (Phase::Advisory, raw.advisor_time),
        (Phase::Evaluation, raw.evaluation_time),
    ]
    .into_iter()
    .filter_map(|(phase, seconds)| seconds.map(|s| (phase, s)))
    .collect();

    PerformanceMetrics {
        total_latency_seconds: raw.total_latency.or(fallback.total_latency),
        retrieval_count: raw.retrieval_count.or(fallback.reviews_retrieved),
        retrieval_precision: score(
            "retrieval_precision",
            raw.retrieval_precision.or(fallback.retrieval_precision),
        ),
        rating_accuracy: score(
            "rating_accuracy",
            raw.rating_accuracy.or(fallback.rating_accuracy),
        ),
        faithfulness_score: score("faithfulness_score", raw.faithfulness_score),
        suggestions_generated: raw.suggestions_generated,
        phase_durations,
    }
}

/// Converts a reported fraction, dropping values outside 0..=1.
fn score(field: &'static str, value: Option<f64>) -> Option<Score> {
    let value = value?;
    let score = Score::new(value);
    if score.is_none() {
        tracing::warn!(field, value, "Metric outside 0..=1 discarded");
    }
    score
}

fn primary_text(value: Option<String>, kind: &'static str, field: &'static str) -> String {
    match value {
        Some(text) => text,
        None => {
            tracing::warn!(kind, field, "Structured item has no primary text");
            String::new()
        }
    }
}
