//! Memory/analytics snapshot returned by `GET /api/memory/stats`.

use serde::{Deserialize, Serialize};

use crate::domain::report::lenient;

/// Stats payload as the backend sends it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMemorySnapshot {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_queries: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub brands_tracked: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub summaries_stored: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_cached: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub cache_hit_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::record")]
    pub performance_summary: Option<RawPerformanceSummary>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub query_history: Vec<RawHistoryEntry>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub recent_performance: Vec<RawRecentPerformance>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub cached_queries: Vec<RawCachedQuery>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPerformanceSummary {
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_latency: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHistoryEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub cached: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecentPerformance {
    #[serde(default, deserialize_with = "lenient::text")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_latency: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub suggestions_generated: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCachedQuery {
    #[serde(default, deserialize_with = "lenient::text")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub filters: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cached_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub access_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub avg_latency_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHistoryEntry {
    pub query: String,
    pub timestamp: String,
    pub cached: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPerformance {
    pub query: String,
    pub total_latency_seconds: Option<f64>,
    pub suggestions_generated: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedQuery {
    pub query: String,
    pub filters: Option<String>,
    pub cached_at: Option<String>,
    pub access_count: Option<u64>,
}

/// Canonical memory snapshot.
///
/// Counters default to zero. `brands` is deduplicated, first occurrence
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub total_queries: u64,
    pub brands_tracked: u64,
    pub summaries_stored: u64,
    pub performance_summary: Option<PerformanceSummary>,
    pub query_history: Vec<QueryHistoryEntry>,
    pub recent_performance: Vec<RecentPerformance>,
    pub brands: Vec<String>,
    pub total_cached: Option<u64>,
    pub cache_hit_rate: Option<f64>,
    pub cached_queries: Vec<CachedQuery>,
}

impl MemorySnapshot {
    /// The explicit "fetched, nothing there" snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when the snapshot carries no data at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl From<RawMemorySnapshot> for MemorySnapshot {
    fn from(raw: RawMemorySnapshot) -> Self {
        let mut brands: Vec<String> = Vec::with_capacity(raw.brands.len());
        for brand in raw.brands {
            if !brands.contains(&brand) {
                brands.push(brand);
            }
        }

        Self {
            total_queries: raw.total_queries.unwrap_or(0),
            brands_tracked: raw.brands_tracked.unwrap_or(0),
            summaries_stored: raw.summaries_stored.unwrap_or(0),
            performance_summary: raw.performance_summary.map(|p| PerformanceSummary {
                avg_latency_seconds: p.avg_latency,
            }),
            query_history: raw
                .query_history
                .into_iter()
                .map(|h| QueryHistoryEntry {
                    query: h.query.unwrap_or_default(),
                    timestamp: h.timestamp.unwrap_or_default(),
                    cached: h.cached,
                })
                .collect(),
            recent_performance: raw
                .recent_performance
                .into_iter()
                .map(|p| RecentPerformance {
                    query: p.query.unwrap_or_default(),
                    total_latency_seconds: p.total_latency,
                    suggestions_generated: p.suggestions_generated,
                })
                .collect(),
            brands,
            total_cached: raw.total_cached,
            cache_hit_rate: raw.cache_hit_rate,
            cached_queries: raw
                .cached_queries
                .into_iter()
                .map(|c| CachedQuery {
                    query: c.query.unwrap_or_default(),
                    filters: c.filters,
                    cached_at: c.cached_at,
                    access_count: c.access_count,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> MemorySnapshot {
        serde_json::from_value::<RawMemorySnapshot>(value)
            .unwrap()
            .into()
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let snapshot = decode(json!({}));
        assert_eq!(snapshot.total_queries, 0);
        assert_eq!(snapshot.brands_tracked, 0);
        assert_eq!(snapshot.summaries_stored, 0);
        assert!(snapshot.performance_summary.is_none());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn brands_are_deduplicated_in_order() {
        let snapshot = decode(json!({"brands": ["Casio", "Seiko", "Casio", "Timex"]}));
        assert_eq!(snapshot.brands, vec!["Casio", "Seiko", "Timex"]);
    }

    #[test]
    fn history_keeps_order_and_cached_flag() {
        let snapshot = decode(json!({
            "total_queries": 2,
            "query_history": [
                {"query": "battery life", "timestamp": "2024-05-01T10:00:00", "cached": true},
                {"query": "strap", "timestamp": "2024-05-01T09:00:00"}
            ]
        }));
        assert_eq!(snapshot.query_history.len(), 2);
        assert_eq!(snapshot.query_history[0].query, "battery life");
        assert_eq!(snapshot.query_history[0].cached, Some(true));
        assert_eq!(snapshot.query_history[1].cached, None);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn performance_summary_and_cache_extras_are_read() {
        let snapshot = decode(json!({
            "performance_summary": {"avg_latency": 3.456},
            "total_cached": 4,
            "cache_hit_rate": 40.0,
            "cached_queries": [{"query": "q", "filters": "1-5 stars", "access_count": 3}],
            "recent_performance": [{"query": "q", "total_latency": 2.5, "suggestions_generated": 6}]
        }));
        assert_eq!(
            snapshot.performance_summary.and_then(|p| p.avg_latency_seconds),
            Some(3.456)
        );
        assert_eq!(snapshot.total_cached, Some(4));
        assert_eq!(snapshot.cache_hit_rate, Some(40.0));
        assert_eq!(snapshot.cached_queries[0].access_count, Some(3));
        assert_eq!(snapshot.recent_performance[0].suggestions_generated, Some(6));
    }

    #[test]
    fn malformed_history_entries_are_dropped() {
        let snapshot = decode(json!({"query_history": ["oops", {"query": "ok"}]}));
        assert_eq!(snapshot.query_history.len(), 1);
        assert_eq!(snapshot.query_history[0].timestamp, "");
    }
}
