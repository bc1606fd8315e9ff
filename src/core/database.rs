use std::sync::Arc;
use std::sync::atomic::Ordering;
use crate::analysis::token::MoveToken;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::EngineStats;
use crate::core::types::GameRecord;
use crate::dataset::projection::Row;
use crate::dataset::store::DatasetStore;
use crate::search::engine::{SearchEngine, SearchListener};
use crate::search::results::SearchHits;
use crate::writer::batch_indexer::BatchIndexer;

/// One session over a static game collection.
///
/// 1. `load()` the game metadata: projections become available.
/// 2. `index_moves().await` with one move row per game: searches become
///    available once it completes.
/// 3. `search()` as often as needed; the prefix cache grows as it goes.
pub struct GameDatabase {
    config: Config,

    store: Arc<DatasetStore>,
    indexer: BatchIndexer,
    engine: SearchEngine,
}

impl GameDatabase {
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(DatasetStore::new());
        let indexer = BatchIndexer::new(store.clone(), &config);
        let engine = SearchEngine::new(store.clone(), &config);

        Ok(Self {
            config,
            store,
            indexer,
            engine,
        })
    }

    pub fn open_with_listener(config: Config, listener: Arc<dyn SearchListener>) -> Result<Self> {
        let mut db = Self::open(config)?;
        db.engine = SearchEngine::new(db.store.clone(), &db.config).with_listener(listener);
        Ok(db)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn load(&self, records: Vec<GameRecord>) -> Result<()> {
        self.store.load(records)
    }

    pub async fn index_moves<S: AsRef<str>>(&self, rows: &[S]) -> Result<()> {
        self.indexer.index_moves(rows).await
    }

    pub fn project(&self, fields: &[&str]) -> Result<Vec<Row>> {
        self.store.project(fields)
    }

    pub fn project_sample(&self, n: usize, fields: &[&str]) -> Result<Vec<Row>> {
        self.store.project_sample(n, fields)
    }

    /// Search with the configured cache setting
    pub fn search(&self, query: &[MoveToken]) -> Result<SearchHits> {
        self.engine.search_default(query)
    }

    pub fn search_with(&self, query: &[MoveToken], use_cache: bool) -> Result<SearchHits> {
        self.engine.search(query, use_cache)
    }

    pub fn search_notation(&self, input: &str) -> Result<SearchHits> {
        self.engine.search_notation(input, self.config.use_cache)
    }

    pub fn stats(&self) -> EngineStats {
        let counters = self.engine.stats();
        EngineStats {
            total_games: self.store.len(),
            indexed: self.store.is_indexed(),
            indexing_progress: self.indexer.get_progress(),
            searches: counters.searches.load(Ordering::Relaxed),
            cached_searches: counters.cached_searches.load(Ordering::Relaxed),
            busy_rejections: counters.busy_rejections.load(Ordering::Relaxed),
            cache_stats: self.engine.cache_stats(),
        }
    }
}
