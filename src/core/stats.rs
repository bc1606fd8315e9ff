use serde::{Serialize, Deserialize};

/// Session statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    // Dataset
    pub total_games: usize,
    pub indexed: bool,
    pub indexing_progress: usize,

    // Queries
    pub searches: u64,
    pub cached_searches: u64,
    pub busy_rejections: u64,

    pub cache_stats: CacheStats,
}

/// Prefix cache counters. A "level" is one query token applied to a
/// candidate set; levels are either read from the cache or filtered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub nodes: usize,
    pub stored_ids: u64,
    pub max_depth: usize,
    pub levels_from_cache: u64,
    pub levels_filtered: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.levels_from_cache + self.levels_filtered;
        if total == 0 {
            0.0
        } else {
            self.levels_from_cache as f64 / total as f64
        }
    }
}
