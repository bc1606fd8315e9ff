use std::sync::Arc;
use parking_lot::RwLock;
use rand::Rng;
use tracing::info;
use crate::analysis::token::MoveList;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{GameRecord, RecordId};
use crate::dataset::projection::{project_all, project_indices, Row};

/// Games together with their move lists, one list per record.
/// Only built by the batch indexer; immutable afterwards.
#[derive(Debug)]
pub struct IndexedDataset {
    records: Arc<Vec<GameRecord>>,
    moves: Vec<MoveList>,
}

impl IndexedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &Arc<Vec<GameRecord>> {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&GameRecord> {
        self.records.get(id.index())
    }

    pub fn moves(&self, id: RecordId) -> Option<&MoveList> {
        self.moves.get(id.index())
    }
}

/// Loading phases. Metadata and move lists arrive separately, and move
/// lists are attached in one step once all of them are parsed.
#[derive(Debug)]
enum Phase {
    Empty,
    Loaded(Arc<Vec<GameRecord>>),
    Indexed(Arc<IndexedDataset>),
}

/// Holds the session's game records
#[derive(Debug)]
pub struct DatasetStore {
    phase: RwLock<Phase>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        DatasetStore::new()
    }
}

impl DatasetStore {
    pub fn new() -> Self {
        DatasetStore {
            phase: RwLock::new(Phase::Empty),
        }
    }

    /// Install the game metadata. Calling it again before indexing
    /// replaces the records; after indexing it is refused.
    pub fn load(&self, records: Vec<GameRecord>) -> Result<()> {
        if records.len() > u32::MAX as usize {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                format!("{} games exceed the addressable record range", records.len()),
            ));
        }

        let mut phase = self.phase.write();
        if let Phase::Indexed(_) = *phase {
            return Err(Error::new(
                ErrorKind::InvalidState,
                "Dataset is already indexed; records cannot be replaced".to_string(),
            ));
        }

        info!(games = records.len(), "Game metadata loaded");
        *phase = Phase::Loaded(Arc::new(records));
        Ok(())
    }

    /// Records as loaded, whether or not move lists are attached yet
    pub fn records(&self) -> Result<Arc<Vec<GameRecord>>> {
        match &*self.phase.read() {
            Phase::Empty => Err(Error::not_loaded()),
            Phase::Loaded(records) => Ok(records.clone()),
            Phase::Indexed(dataset) => Ok(dataset.records.clone()),
        }
    }

    pub fn indexed(&self) -> Result<Arc<IndexedDataset>> {
        match &*self.phase.read() {
            Phase::Indexed(dataset) => Ok(dataset.clone()),
            _ => Err(Error::not_indexed()),
        }
    }

    /// Attach parsed move lists to `records`, which must still be the
    /// loaded record set.
    pub(crate) fn attach_moves(&self, records: &Arc<Vec<GameRecord>>, moves: Vec<MoveList>) -> Result<()> {
        let mut phase = self.phase.write();
        match &*phase {
            Phase::Loaded(current) if Arc::ptr_eq(current, records) => {}
            Phase::Loaded(_) => {
                return Err(Error::new(
                    ErrorKind::InvalidState,
                    "Records were replaced while moves were being parsed".to_string(),
                ));
            }
            Phase::Indexed(_) => {
                return Err(Error::new(
                    ErrorKind::InvalidState,
                    "Game moves are already loaded".to_string(),
                ));
            }
            Phase::Empty => return Err(Error::not_loaded()),
        }

        if moves.len() != records.len() {
            return Err(Error::length_mismatch(moves.len(), records.len()));
        }

        *phase = Phase::Indexed(Arc::new(IndexedDataset {
            records: records.clone(),
            moves,
        }));
        Ok(())
    }

    /// Requested columns of every record, in load order
    pub fn project(&self, fields: &[&str]) -> Result<Vec<Row>> {
        let records = self.records()?;
        Ok(project_all(&records, fields))
    }

    /// Requested columns of `min(n, len)` records drawn without replacement
    pub fn project_sample(&self, n: usize, fields: &[&str]) -> Result<Vec<Row>> {
        self.project_sample_with(&mut rand::thread_rng(), n, fields)
    }

    pub fn project_sample_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
        fields: &[&str],
    ) -> Result<Vec<Row>> {
        let records = self.records()?;
        let amount = n.min(records.len());
        let indices = rand::seq::index::sample(rng, records.len(), amount).into_vec();
        Ok(project_indices(&records, &indices, fields))
    }

    pub fn record_at(&self, index: usize) -> Option<GameRecord> {
        self.records().ok()?.get(index).cloned()
    }

    pub fn moves_at(&self, index: usize) -> Option<MoveList> {
        let dataset = self.indexed().ok()?;
        dataset.moves.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.records().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(*self.phase.read(), Phase::Empty)
    }

    pub fn is_indexed(&self) -> bool {
        matches!(*self.phase.read(), Phase::Indexed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use crate::core::types::{fields, FieldValue};

    fn games(n: u32) -> Vec<GameRecord> {
        (0..n)
            .map(|i| GameRecord::new(1500 + i, 1400 + i, "Normal", 1.0, "C20"))
            .collect()
    }

    #[test]
    fn projection_requires_load() {
        let store = DatasetStore::new();
        assert_eq!(store.project(&[fields::SCORE]).unwrap_err().kind, ErrorKind::NotLoaded);
        assert_eq!(store.project_sample(5, &[fields::SCORE]).unwrap_err().kind, ErrorKind::NotLoaded);
        assert_eq!(store.len(), 0);
        assert!(store.record_at(0).is_none());
    }

    #[test]
    fn projection_keeps_only_requested_fields_in_order() {
        let store = DatasetStore::new();
        store.load(games(4)).unwrap();

        let rows = store.project(&[fields::WHITE_ELO, fields::TERMINATION]).unwrap();
        assert_eq!(rows.len(), 4);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 2);
            assert_eq!(row.number(fields::WHITE_ELO), Some(1500.0 + i as f64));
            assert_eq!(row.text(fields::TERMINATION), Some("Normal"));
            assert!(row.get(fields::BLACK_ELO).is_none());
        }
    }

    #[test]
    fn unknown_and_extra_fields() {
        let store = DatasetStore::new();
        let record = GameRecord::new(2000, 1990, "Time forfeit", 0.5, "B01")
            .with_field("Event", FieldValue::Text("Rated Blitz game".to_string()));
        store.load(vec![record]).unwrap();

        let rows = store.project(&["Event", "Site"]).unwrap();
        assert_eq!(rows[0].text("Event"), Some("Rated Blitz game"));
        assert_eq!(rows[0].get("Site"), Some(&FieldValue::Null));
    }

    #[test]
    fn sample_is_capped_and_distinct() {
        let store = DatasetStore::new();
        store.load(games(20)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let rows = store.project_sample_with(&mut rng, 8, &[fields::WHITE_ELO]).unwrap();
        assert_eq!(rows.len(), 8);
        let mut elos: Vec<i64> = rows.iter().map(|r| r.number(fields::WHITE_ELO).unwrap() as i64).collect();
        elos.sort();
        elos.dedup();
        assert_eq!(elos.len(), 8);

        let all = store.project_sample_with(&mut rng, 500, &[fields::WHITE_ELO]).unwrap();
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn attach_checks_length_and_phase() {
        let store = DatasetStore::new();
        store.load(games(2)).unwrap();
        let records = store.records().unwrap();

        let err = store.attach_moves(&records, vec![MoveList::default()]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LengthMismatch);
        assert!(!store.is_indexed());

        store.attach_moves(&records, vec![MoveList::default(), MoveList::default()]).unwrap();
        assert!(store.is_indexed());
        assert_eq!(store.load(games(1)).unwrap_err().kind, ErrorKind::InvalidState);
    }

    #[test]
    fn attach_rejects_replaced_records() {
        let store = DatasetStore::new();
        store.load(games(1)).unwrap();
        let stale = store.records().unwrap();
        store.load(games(1)).unwrap();

        let err = store.attach_moves(&stale, vec![MoveList::default()]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }
}
