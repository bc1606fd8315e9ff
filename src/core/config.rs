use std::time::Duration;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Search engine
    pub max_moves: usize,              // Tokens kept per game and per query
    pub cache_depth: usize,            // Deepest prefix level with a stored index set
    pub use_cache: bool,               // Default for GameDatabase::search

    // Batch indexer
    pub batch_size: usize,             // Rows normalized between two yields
    pub yield_delay_ms: u64,           // Pause between batches
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_moves: 10,
            cache_depth: 4,
            use_cache: true,

            batch_size: 25_000,
            yield_delay_ms: 80,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_cache_depth(mut self, cache_depth: usize) -> Self {
        self.cache_depth = cache_depth;
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_yield_delay(mut self, delay: Duration) -> Self {
        self.yield_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn yield_delay(&self) -> Duration {
        Duration::from_millis(self.yield_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_moves == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "max_moves must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
