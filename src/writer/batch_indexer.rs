use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use crate::analysis::normalizer::MoveNormalizer;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::dataset::store::DatasetStore;

/// Parses game move text in fixed-size batches and attaches the move
/// lists to the store, suspending between batches so other tasks on a
/// single-threaded runtime keep running.
pub struct BatchIndexer {
    pub store: Arc<DatasetStore>,
    pub normalizer: MoveNormalizer,
    pub batch_size: usize,
    pub yield_delay: Duration,
    pub progress: Arc<AtomicUsize>,
    busy: AtomicBool,
}

/// Clears the busy flag on every exit path, including a dropped future
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BatchIndexer {
    pub fn new(store: Arc<DatasetStore>, config: &Config) -> Self {
        BatchIndexer {
            store,
            normalizer: MoveNormalizer::new(config.max_moves),
            batch_size: config.batch_size.max(1),
            yield_delay: config.yield_delay(),
            progress: Arc::new(AtomicUsize::new(0)),
            busy: AtomicBool::new(false),
        }
    }

    /// Rows parsed so far in the current (or last) run
    pub fn get_progress(&self) -> usize {
        self.progress.load(Ordering::Relaxed)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Parse one move row per loaded record. Fails with `Busy` while
    /// another call is running and with `LengthMismatch` before touching
    /// anything when the row count is off.
    pub async fn index_moves<S: AsRef<str>>(&self, rows: &[S]) -> Result<()> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Move indexing requested while a run is in progress");
            return Err(Error::busy("Move indexing"));
        }
        let _guard = BusyGuard(&self.busy);

        let records = self.store.records()?;
        if self.store.is_indexed() {
            return Err(Error::new(
                ErrorKind::InvalidState,
                "Game moves are already loaded".to_string(),
            ));
        }
        if rows.len() != records.len() {
            return Err(Error::length_mismatch(rows.len(), records.len()));
        }

        let total = rows.len();
        info!(games = total, batch_size = self.batch_size, "Parsing moves");
        let started = Instant::now();
        self.progress.store(0, Ordering::Relaxed);

        let mut moves = Vec::with_capacity(total);
        for batch in rows.chunks(self.batch_size) {
            moves.extend(batch.iter().map(|row| self.normalizer.normalize(row.as_ref())));

            let done = moves.len();
            self.progress.store(done, Ordering::Relaxed);
            debug!(done, total, percent = 100.0 * done as f64 / total as f64, "Move parsing progress");

            if done < total {
                self.pause().await;
            }
        }

        self.store.attach_moves(&records, moves)?;
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "Finished parsing moves");
        Ok(())
    }

    async fn pause(&self) {
        if self.yield_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.yield_delay).await;
        }
    }
}
