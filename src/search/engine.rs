use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;
use parking_lot::Mutex;
use roaring::RoaringBitmap;
use tracing::{debug, warn};
use crate::analysis::normalizer::MoveNormalizer;
use crate::analysis::token::MoveToken;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::stats::CacheStats;
use crate::core::types::RecordId;
use crate::dataset::store::{DatasetStore, IndexedDataset};
use crate::search::prefix_cache::PrefixCache;
use crate::search::results::SearchHits;

/// Hook called while a search filters candidates, once per query level
/// that is not answered from the cache. For cached searches it runs with
/// the cache lock held.
pub trait SearchListener: Send + Sync {
    fn on_level_filtered(&self, depth: usize, candidates: u64);
}

#[derive(Debug, Default)]
pub struct SearchStats {
    pub searches: AtomicU64,
    pub cached_searches: AtomicU64,
    pub busy_rejections: AtomicU64,
    pub levels_from_cache: AtomicU64,
    pub levels_filtered: AtomicU64,
    pub cache_nodes: AtomicUsize,
    pub cached_ids: AtomicU64,
}

/// Answers "which games start with these moves" over an indexed store
pub struct SearchEngine {
    store: Arc<DatasetStore>,
    normalizer: MoveNormalizer,
    max_moves: usize,
    cache_depth: usize,
    use_cache: bool,
    cache: Mutex<PrefixCache>,
    stats: SearchStats,
    listener: Option<Arc<dyn SearchListener>>,
}

impl SearchEngine {
    pub fn new(store: Arc<DatasetStore>, config: &Config) -> Self {
        SearchEngine {
            store,
            normalizer: MoveNormalizer::new(config.max_moves),
            max_moves: config.max_moves,
            cache_depth: config.cache_depth,
            use_cache: config.use_cache,
            cache: Mutex::new(PrefixCache::new(config.cache_depth)),
            stats: SearchStats::default(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SearchListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Search with the configured cache default
    pub fn search_default(&self, query: &[MoveToken]) -> Result<SearchHits> {
        self.search(query, self.use_cache)
    }

    /// Games whose first moves equal `query`, compared without check/mate
    /// markers. Tokens past `max_moves` are ignored.
    ///
    /// With `use_cache` the call holds the cache lock for its whole run and
    /// fails with `Busy` instead of waiting if another search holds it.
    pub fn search(&self, query: &[MoveToken], use_cache: bool) -> Result<SearchHits> {
        let started = Instant::now();
        let dataset = self.store.indexed()?;
        let query = &query[..query.len().min(self.max_moves)];
        self.stats.searches.fetch_add(1, Ordering::Relaxed);

        let (ids, cached_depth) = if use_cache {
            self.search_cached(&dataset, query)?
        } else {
            let mut candidates = all_records(&dataset);
            for (depth, token) in query.iter().enumerate() {
                candidates = self.filter_level(&dataset, &candidates, depth, token);
            }
            (candidates, 0)
        };

        let took_us = started.elapsed().as_micros() as u64;
        debug!(query_len = query.len(), hits = ids.len(), cached_depth, took_us, "Move search");
        Ok(SearchHits::new(dataset, ids, cached_depth, took_us))
    }

    /// Normalize free-form notation ("1. e4 c5 2. Nf3") and search it
    pub fn search_notation(&self, input: &str, use_cache: bool) -> Result<SearchHits> {
        let query = self.normalizer.normalize_query(input);
        self.search(&query, use_cache)
    }

    fn search_cached(&self, dataset: &IndexedDataset, query: &[MoveToken]) -> Result<(RoaringBitmap, usize)> {
        let Some(mut cache) = self.cache.try_lock() else {
            self.stats.busy_rejections.fetch_add(1, Ordering::Relaxed);
            warn!("Search rejected: another search holds the cache");
            return Err(Error::busy("Search"));
        };
        self.stats.cached_searches.fetch_add(1, Ordering::Relaxed);

        let (mut position, cached_depth) = cache.walk(query);
        let mut candidates = match cache.games(position) {
            Some(games) => games.clone(),
            None => all_records(dataset),
        };
        self.stats.levels_from_cache.fetch_add(cached_depth as u64, Ordering::Relaxed);

        let mut caching = true;
        for (depth, token) in query.iter().enumerate().skip(cached_depth) {
            candidates = self.filter_level(dataset, &candidates, depth, token);

            if !caching {
                continue;
            }
            match cache.insert(position, token, candidates.clone()) {
                Some(child) => {
                    position = child;
                    self.stats.cache_nodes.fetch_add(1, Ordering::Relaxed);
                    self.stats.cached_ids.fetch_add(candidates.len(), Ordering::Relaxed);
                    debug!(depth = depth + 1, games = candidates.len(), "Cached move prefix");
                }
                // Depth limit reached or the token cannot key a node
                None => caching = false,
            }
        }

        Ok((candidates, cached_depth))
    }

    fn filter_level(
        &self,
        dataset: &IndexedDataset,
        candidates: &RoaringBitmap,
        depth: usize,
        token: &MoveToken,
    ) -> RoaringBitmap {
        let filtered: RoaringBitmap = candidates
            .iter()
            .filter(|&id| {
                dataset
                    .moves(RecordId(id))
                    .is_some_and(|moves| moves.matches_at(depth, token))
            })
            .collect();

        self.stats.levels_filtered.fetch_add(1, Ordering::Relaxed);
        if let Some(listener) = &self.listener {
            listener.on_level_filtered(depth, filtered.len());
        }
        filtered
    }

    pub fn normalizer(&self) -> &MoveNormalizer {
        &self.normalizer
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            nodes: self.stats.cache_nodes.load(Ordering::Relaxed),
            stored_ids: self.stats.cached_ids.load(Ordering::Relaxed),
            max_depth: self.cache_depth,
            levels_from_cache: self.stats.levels_from_cache.load(Ordering::Relaxed),
            levels_filtered: self.stats.levels_filtered.load(Ordering::Relaxed),
        }
    }
}

fn all_records(dataset: &IndexedDataset) -> RoaringBitmap {
    let mut all = RoaringBitmap::new();
    all.insert_range(0..dataset.len() as u32);
    all
}
