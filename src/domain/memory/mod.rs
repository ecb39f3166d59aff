//! Memory analytics and system info payloads.

mod snapshot;
mod system_info;

pub use snapshot::{
    CachedQuery, MemorySnapshot, PerformanceSummary, QueryHistoryEntry, RawCachedQuery,
    RawHistoryEntry, RawMemorySnapshot, RawPerformanceSummary, RawRecentPerformance,
    RecentPerformance,
};
pub use system_info::{RawSystemInfo, RawSystemInfoEnvelope, SystemInfo};
