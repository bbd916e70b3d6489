use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default freshness window for cached star counts (24 hours)
pub const STAR_CACHE_TTL_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Star count persisted by the metadata cache
///
/// Stored as `{"stars": <count>, "timestamp": <epoch millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "stars")]
    pub star_count: u64,
    #[serde(rename = "timestamp")]
    pub fetched_at: i64,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    pub fn now(star_count: u64) -> Self {
        Self {
            star_count,
            fetched_at: Utc::now().timestamp_millis(),
        }
    }

    /// An entry is fresh iff `0 <= now - fetched_at < ttl`
    ///
    /// Timestamps in the future, or so far off that the age overflows, are
    /// stale.
    pub fn is_fresh(&self, now_millis: i64, ttl_millis: i64) -> bool {
        now_millis
            .checked_sub(self.fetched_at)
            .is_some_and(|age| (0..ttl_millis).contains(&age))
    }
}
