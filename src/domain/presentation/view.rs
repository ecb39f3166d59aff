//! View Composer: turns domain state into renderable text blocks.
//!
//! No styling is produced here. Each view is plain data plus a `Display`
//! impl, so any front end (terminal, HTML template, test) can render it.

use serde::Serialize;
use std::fmt;

use super::copy::{Banner, IntentCopy};
use super::sections::{select_sections, SectionDescriptor, SectionKind};
use crate::domain::fetch::DomainState;
use crate::domain::memory::{MemorySnapshot, SystemInfo};
use crate::domain::report::{AnalysisReport, FeatureStat, Phase};

/// Most query history rows shown in the memory view.
pub const MAX_HISTORY_ROWS: usize = 20;

/// Average rating with one decimal, or "N/A".
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.1}", r),
        None => "N/A".to_string(),
    }
}

/// Seconds with the given number of decimals.
pub fn format_seconds(seconds: f64, decimals: usize) -> String {
    format!("{:.*}s", decimals, seconds)
}

/// Feature keys arrive snake_cased.
pub fn feature_label(name: &str) -> String {
    name.replace('_', " ")
}

/// One rendered section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBlock {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub focus: bool,
    pub lines: Vec<String>,
}

/// A composed analysis report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub badge: &'static str,
    pub banner: Banner,
    pub blocks: Vec<ViewBlock>,
}

impl ReportView {
    pub fn compose(report: &AnalysisReport) -> Self {
        let copy = IntentCopy::for_intent(Some(report.intent));
        let blocks = select_sections(Some(report.intent), report)
            .into_iter()
            .map(|section| compose_block(section, report))
            .collect();

        Self {
            badge: copy.badge,
            banner: copy.banner,
            blocks,
        }
    }

    pub fn block(&self, kind: SectionKind) -> Option<&ViewBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }
}

fn compose_block(section: SectionDescriptor, report: &AnalysisReport) -> ViewBlock {
    let lines = match section.kind {
        SectionKind::Summary => summary_lines(report),
        SectionKind::Complaints => report
            .top_complaints
            .iter()
            .map(|c| bullet_with_frequency(&c.issue_text, c.frequency.as_deref()))
            .collect(),
        SectionKind::Praises => report
            .top_praises
            .iter()
            .map(|p| bullet_with_frequency(&p.feature_text, p.frequency.as_deref()))
            .collect(),
        SectionKind::FeatureAnalysis => report
            .feature_analysis
            .iter()
            .flat_map(|(name, stat)| feature_lines(name, stat))
            .collect(),
        SectionKind::ReviewStats => review_stat_lines(report),
        SectionKind::Recommendations => recommendation_lines(report),
        SectionKind::MarketingSuggestions => marketing_lines(report),
        SectionKind::CompetitiveAdvantages => bullets(&report.competitive_advantages),
        SectionKind::RiskAreas => bullets(&report.risk_areas),
        SectionKind::LatencyBreakdown => report
            .latency_breakdown
            .iter()
            .map(|(stage, seconds)| format!("{}: {}", feature_label(stage), format_seconds(*seconds, 3)))
            .collect(),
        SectionKind::PerformanceMetrics => metric_lines(report),
    };

    ViewBlock {
        kind: section.kind,
        heading: section.heading,
        focus: section.focus,
        lines,
    }
}

fn summary_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(query) = &report.query {
        lines.push(format!("Query: {}", query));
    }
    if report.summary_text.is_empty() {
        lines.push("No summary available".to_string());
    } else {
        lines.push(report.summary_text.clone());
    }
    lines
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|item| format!("• {}", item)).collect()
}

fn bullet_with_frequency(text: &str, frequency: Option<&str>) -> String {
    match frequency {
        Some(f) => format!("• {} ({})", text, f),
        None => format!("• {}", text),
    }
}

fn feature_lines(name: &str, stat: &FeatureStat) -> Vec<String> {
    let mut lines = vec![feature_label(name)];
    if let Some(count) = stat.mention_count {
        lines.push(format!("  Mentions: {}", count));
    }
    if let Some(rating) = stat.avg_rating {
        lines.push(format!("  Avg Rating: {} ⭐", format_rating(Some(rating))));
    }
    if let Some(sentiment) = stat.sentiment_counts {
        let counts: Vec<String> = [
            ('+', sentiment.positive),
            ('~', sentiment.neutral),
            ('-', sentiment.negative),
        ]
        .into_iter()
        .filter_map(|(sign, count)| count.map(|n| format!("{}{}", sign, n)))
        .collect();
        if !counts.is_empty() {
            lines.push(format!("  Sentiment: {}", counts.join(" ")));
        }
    }
    if let Some(summary) = &stat.summary {
        lines.push(format!("  {}", summary));
    }
    lines.extend(stat.quotes_to_render().iter().map(|q| format!("  \"{}\"", q)));
    lines
}

fn review_stat_lines(report: &AnalysisReport) -> Vec<String> {
    let stats = &report.review_stats;
    let mut lines = vec![
        format!(
            "Reviews Analyzed: {}",
            stats
                .reviews_retrieved
                .map(|n| n.to_string())
                .unwrap_or_else(|| "N/A".to_string())
        ),
        format!("Avg Rating: {} ⭐", format_rating(stats.avg_rating)),
    ];
    if let Some(faithfulness) = stats.faithfulness {
        lines.push(format!("Faithfulness: {}", faithfulness.percent_label(1)));
    }
    if let Some(total) = report.metrics.total_latency_seconds {
        lines.push(format!("Response Time: {}", format_seconds(total, 2)));
    }
    lines
}

fn recommendation_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, rec) in report.recommendations.iter().enumerate() {
        match &rec.area {
            Some(area) => lines.push(format!("{}. [{}] {}", idx + 1, area, rec.suggestion)),
            None => lines.push(format!("{}. {}", idx + 1, rec.suggestion)),
        }

        let mut detail = Vec::new();
        if let Some(priority) = rec.priority {
            detail.push(format!("Priority: {}", priority));
        }
        if let Some(impact) = &rec.impact {
            detail.push(format!("Impact: {}", impact));
        }
        if !detail.is_empty() {
            lines.push(format!("   {}", detail.join(" | ")));
        }
    }
    lines
}

fn marketing_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = Vec::new();
    for item in &report.marketing_suggestions {
        match &item.strategy {
            Some(strategy) => lines.push(format!("• {}: {}", strategy, item.suggestion)),
            None => lines.push(format!("• {}", item.suggestion)),
        }
        if let Some(audience) = &item.target_audience {
            lines.push(format!("   🎯 Target: {}", audience));
        }
        if let Some(outcome) = &item.expected_outcome {
            lines.push(format!("   📈 Expected: {}", outcome));
        }
    }
    lines
}

fn metric_lines(report: &AnalysisReport) -> Vec<String> {
    let m = &report.metrics;
    let mut lines = Vec::new();
    if let Some(total) = m.total_latency_seconds {
        lines.push(format!("Total Latency: {}", format_seconds(total, 2)));
    }
    if let Some(count) = m.retrieval_count {
        lines.push(format!("Reviews Retrieved: {}", count));
    }
    if let Some(precision) = m.retrieval_precision {
        lines.push(format!("Retrieval Precision: {}", precision.percent_label(0)));
    }
    if let Some(accuracy) = m.rating_accuracy {
        lines.push(format!("Rating Accuracy: {}", accuracy.percent_label(1)));
    }
    if let Some(faithfulness) = m.faithfulness_score {
        lines.push(format!("Faithfulness Score: {}", faithfulness.percent_label(0)));
    }
    if let Some(count) = m.suggestions_generated {
        lines.push(format!("Suggestions Generated: {}", count));
    }
    for phase in Phase::ALL {
        if let Some(seconds) = m.phase(phase) {
            lines.push(format!("{}: {}", phase.label(), format_seconds(seconds, 3)));
        }
    }
    lines
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.badge)?;
        writeln!(f, "{} {}", self.banner.icon, self.banner.title)?;
        writeln!(f, "{}", self.banner.body)?;
        for block in &self.blocks {
            writeln!(f)?;
            writeln!(f, "## {}", block.heading)?;
            for line in &block.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// What the memory panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "snapshot", rename_all = "snake_case")]
pub enum MemoryPanel {
    /// Nothing was ever fetched.
    NeverFetched,
    /// First fetch in flight.
    Loading,
    /// Fetched, and the backend has nothing (or failed with an empty fallback).
    Empty,
    Loaded(MemorySnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryView {
    pub panel: MemoryPanel,
    /// A refresh is in flight while older data is shown.
    pub refreshing: bool,
    pub error_message: Option<String>,
}

impl MemoryView {
    pub fn compose(state: &DomainState<MemorySnapshot>) -> Self {
        let panel = match state.data() {
            Some(snapshot) if snapshot.is_empty() => MemoryPanel::Empty,
            Some(snapshot) => MemoryPanel::Loaded(snapshot.clone()),
            None if state.is_pending() => MemoryPanel::Loading,
            None => MemoryPanel::NeverFetched,
        };
        let refreshing = state.is_pending() && state.data().is_some();

        Self {
            panel,
            refreshing,
            error_message: state.error_message().map(str::to_string),
        }
    }
}

impl fmt::Display for MemoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error_message {
            writeln!(f, "⚠️ {}", error)?;
        }
        if self.refreshing {
            writeln!(f, "Refreshing...")?;
        }

        let snapshot = match &self.panel {
            MemoryPanel::NeverFetched => return writeln!(f, "Memory data has not been loaded yet"),
            MemoryPanel::Loading => return writeln!(f, "Loading memory data..."),
            MemoryPanel::Empty => {
                writeln!(f, "No Memory Data")?;
                return writeln!(f, "Memory data will appear here once you run your first analysis.");
            }
            MemoryPanel::Loaded(snapshot) => snapshot,
        };

        writeln!(f, "Total Queries: {}", snapshot.total_queries)?;
        writeln!(f, "Brands Tracked: {}", snapshot.brands_tracked)?;
        writeln!(f, "Summaries Stored: {}", snapshot.summaries_stored)?;
        if let Some(seconds) = snapshot
            .performance_summary
            .and_then(|summary| summary.avg_latency_seconds)
        {
            writeln!(f, "Avg Latency: {}", format_seconds(seconds, 2))?;
        }
        if let Some(cached) = snapshot.total_cached {
            writeln!(f, "Cached Queries: {}", cached)?;
        }
        if let Some(rate) = snapshot.cache_hit_rate {
            writeln!(f, "Cache Hit Rate: {:.1}%", rate)?;
        }

        if !snapshot.query_history.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Recent Queries ({})", snapshot.query_history.len())?;
            for entry in snapshot.query_history.iter().take(MAX_HISTORY_ROWS) {
                let marker = if entry.cached == Some(true) { " [cached]" } else { "" };
                writeln!(f, "{} ({}){}", entry.query, entry.timestamp, marker)?;
            }
        }

        if !snapshot.recent_performance.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Recent Performance")?;
            for perf in &snapshot.recent_performance {
                let latency = perf
                    .total_latency_seconds
                    .map(|s| format_seconds(s, 2))
                    .unwrap_or_default();
                let suggestions = perf
                    .suggestions_generated
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                writeln!(
                    f,
                    "{}: ⚡ Latency: {} 💡 Suggestions: {}",
                    perf.query, latency, suggestions
                )?;
            }
        }

        if !snapshot.brands.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Tracked Brands ({})", snapshot.brands.len())?;
            writeln!(f, "{}", snapshot.brands.join(", "))?;
        }
        Ok(())
    }
}

/// Header decoration built from system info. Absent until loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfoView {
    pub version_badge: String,
    pub architecture_line: String,
    pub features: Vec<String>,
    pub agents: Vec<String>,
}

impl SystemInfoView {
    pub fn compose(state: &DomainState<SystemInfo>) -> Option<Self> {
        state.data().map(|info| Self {
            version_badge: format!("v{}", info.version),
            architecture_line: format!(
                "{} • {} Agents Active",
                info.architecture,
                info.agent_count()
            ),
            features: info.features.clone(),
            agents: info.agents.clone(),
        })
    }
}

impl fmt::Display for SystemInfoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | {}", self.version_badge, self.architecture_line)?;
        for feature in &self.features {
            writeln!(f, "• {}", feature)?;
        }
        writeln!(f, "Active Agents ({})", self.agents.len())?;
        for agent in &self.agents {
            writeln!(f, "• {}", agent)?;
        }
        Ok(())
    }
}
