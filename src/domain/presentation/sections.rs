//! Intent-conditional section selection.

use serde::Serialize;

use super::copy::IntentCopy;
use crate::domain::report::{AnalysisReport, Intent};

/// Report sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Complaints,
    Praises,
    FeatureAnalysis,
    ReviewStats,
    Recommendations,
    MarketingSuggestions,
    CompetitiveAdvantages,
    RiskAreas,
    LatencyBreakdown,
    PerformanceMetrics,
}

/// One section to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    pub kind: SectionKind,
    pub heading: &'static str,
    /// The section is what the detected intent asked about.
    pub focus: bool,
}

impl SectionDescriptor {
    fn plain(kind: SectionKind, heading: &'static str) -> Self {
        Self {
            kind,
            heading,
            focus: false,
        }
    }
}

/// Chooses which sections to show, in order, for `intent`.
///
/// A section whose data is empty is skipped. Complaints are hidden for a
/// positive intent, praises for a negative one, and risk areas for a
/// positive one. `None` behaves exactly like `Some(Intent::Overall)`.
pub fn select_sections(intent: Option<Intent>, report: &AnalysisReport) -> Vec<SectionDescriptor> {
    let intent = intent.unwrap_or_default();
    let copy = IntentCopy::for_intent(Some(intent));
    let mut sections = vec![SectionDescriptor::plain(SectionKind::Summary, "Analysis Summary")];

    if intent != Intent::Positive && !report.top_complaints.is_empty() {
        sections.push(SectionDescriptor {
            kind: SectionKind::Complaints,
            heading: copy.complaints_heading,
            focus: intent == Intent::Negative,
        });
    }

    if intent != Intent::Negative && !report.top_praises.is_empty() {
        sections.push(SectionDescriptor {
            kind: SectionKind::Praises,
            heading: copy.praises_heading,
            focus: intent == Intent::Positive,
        });
    }

    if !report.feature_analysis.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::FeatureAnalysis,
            "Feature-Based Analysis",
        ));
    }

    sections.push(SectionDescriptor::plain(SectionKind::ReviewStats, "Review Statistics"));

    if !report.recommendations.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::Recommendations,
            copy.recommendations_heading,
        ));
    }

    if !report.marketing_suggestions.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::MarketingSuggestions,
            "Marketing Strategies",
        ));
    }

    if !report.competitive_advantages.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::CompetitiveAdvantages,
            "Competitive Advantages",
        ));
    }

    if intent != Intent::Positive && !report.risk_areas.is_empty() {
        sections.push(SectionDescriptor {
            kind: SectionKind::RiskAreas,
            heading: copy.risk_heading,
            focus: intent == Intent::Negative,
        });
    }

    if !report.latency_breakdown.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::LatencyBreakdown,
            "Performance Breakdown",
        ));
    }

    if !report.metrics.is_empty() {
        sections.push(SectionDescriptor::plain(
            SectionKind::PerformanceMetrics,
            "System Performance Metrics",
        ));
    }

    sections
}

/// Sections for the intent the report itself carries.
pub fn sections_for(report: &AnalysisReport) -> Vec<SectionDescriptor> {
    select_sections(Some(report.intent), report)
}
