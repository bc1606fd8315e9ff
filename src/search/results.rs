use std::sync::Arc;
use roaring::RoaringBitmap;
use serde::{Serialize, Deserialize};
use crate::core::types::{GameRecord, RecordId};
use crate::dataset::store::IndexedDataset;

/// Games matching a move-sequence query, in dataset order
#[derive(Debug, Clone)]
pub struct SearchHits {
    dataset: Arc<IndexedDataset>,
    ids: RoaringBitmap,
    /// Query levels answered from the prefix cache
    pub cached_depth: usize,
    pub took_us: u64,
}

impl SearchHits {
    pub(crate) fn new(dataset: Arc<IndexedDataset>, ids: RoaringBitmap, cached_depth: usize, took_us: u64) -> Self {
        SearchHits {
            dataset,
            ids,
            cached_depth,
            took_us,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(id.value())
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.ids.iter().map(RecordId)
    }

    pub fn record_ids(&self) -> Vec<RecordId> {
        self.ids().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameRecord> + '_ {
        let records = self.dataset.records();
        self.ids.iter().map(move |id| &records[id as usize])
    }

    pub fn to_records(&self) -> Vec<GameRecord> {
        self.iter().cloned().collect()
    }

    /// Result distribution of the matching games
    pub fn outcomes(&self) -> OutcomeBreakdown {
        OutcomeBreakdown::from_scores(self.iter().map(|g| g.score))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWin,
    Draw,
    BlackWin,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::WhiteWin, Outcome::Draw, Outcome::BlackWin];

    /// 1 → white, 0 → black, anything in between is a draw
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 {
            Outcome::WhiteWin
        } else if score <= 0.0 {
            Outcome::BlackWin
        } else {
            Outcome::Draw
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Outcome::WhiteWin => 1.0,
            Outcome::Draw => 0.5,
            Outcome::BlackWin => 0.0,
        }
    }

    pub fn notation(&self) -> &'static str {
        match self {
            Outcome::WhiteWin => "1-0",
            Outcome::Draw => "1/2-1/2",
            Outcome::BlackWin => "0-1",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeShare {
    pub games: usize,
    /// Share of all hits, 0.0..=1.0
    pub fraction: f64,
}

/// Per-result counts; every outcome is present, zeroed when absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeBreakdown {
    pub white: OutcomeShare,
    pub draw: OutcomeShare,
    pub black: OutcomeShare,
}

impl OutcomeBreakdown {
    pub fn from_scores(scores: impl Iterator<Item = f64>) -> Self {
        let mut breakdown = OutcomeBreakdown::default();
        for score in scores {
            breakdown.share_mut(Outcome::from_score(score)).games += 1;
        }

        let total = breakdown.total();
        if total > 0 {
            for outcome in Outcome::ALL {
                let share = breakdown.share_mut(outcome);
                share.fraction = share.games as f64 / total as f64;
            }
        }
        breakdown
    }

    pub fn get(&self, outcome: Outcome) -> &OutcomeShare {
        match outcome {
            Outcome::WhiteWin => &self.white,
            Outcome::Draw => &self.draw,
            Outcome::BlackWin => &self.black,
        }
    }

    fn share_mut(&mut self, outcome: Outcome) -> &mut OutcomeShare {
        match outcome {
            Outcome::WhiteWin => &mut self.white,
            Outcome::Draw => &mut self.draw,
            Outcome::BlackWin => &mut self.black,
        }
    }

    pub fn total(&self) -> usize {
        self.white.games + self.draw.games + self.black.games
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_counts_and_fractions() {
        let breakdown = OutcomeBreakdown::from_scores([1.0, 1.0, 0.5, 0.0].into_iter());
        assert_eq!(breakdown.white.games, 2);
        assert_eq!(breakdown.draw.games, 1);
        assert_eq!(breakdown.black.games, 1);
        assert!((breakdown.white.fraction - 0.5).abs() < 1e-9);
        assert!((breakdown.black.fraction - 0.25).abs() < 1e-9);
        assert_eq!(breakdown.total(), 4);
    }

    #[test]
    fn empty_breakdown_keeps_every_outcome() {
        let breakdown = OutcomeBreakdown::from_scores(std::iter::empty());
        for outcome in Outcome::ALL {
            assert_eq!(*breakdown.get(outcome), OutcomeShare { games: 0, fraction: 0.0 });
        }
    }

    #[test]
    fn outcome_notation() {
        assert_eq!(Outcome::from_score(1.0).notation(), "1-0");
        assert_eq!(Outcome::from_score(0.5).notation(), "1/2-1/2");
        assert_eq!(Outcome::from_score(0.0), Outcome::BlackWin);
    }
}
