//! Branching move history.
//!
//! History is an append-only log of [`Snapshot`]s. Playing and rewinding both
//! append; rewinding re-publishes an earlier snapshot tagged with the index it
//! came from, so the abandoned future stays visible as a branch trail. Only
//! [`History::reset`] removes entries, by restoring the seed snapshots.

use super::{Grid, Mark, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One recorded game state.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board after the move.
    grid: Grid<Square>,
    /// Player whose turn it is.
    next_player: Mark,
    /// Winner, once somebody has completed a run.
    winner: Option<Mark>,
    /// Index this snapshot was rewound from, if it is a branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch_source: Option<usize>,
}

impl Snapshot {
    /// Creates a snapshot produced by ordinary play.
    pub fn new(grid: Grid<Square>, next_player: Mark, winner: Option<Mark>) -> Self {
        Self {
            grid,
            next_player,
            winner,
            branch_source: None,
        }
    }

    /// Returns a copy marked as rewound from `index`.
    pub fn branched_from(&self, index: usize) -> Self {
        Self {
            branch_source: Some(index),
            ..self.clone()
        }
    }

    /// Returns true if this snapshot was produced by a rewind.
    pub fn is_branch(&self) -> bool {
        self.branch_source.is_some()
    }
}

/// History lookup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    /// Index past the end of history.
    #[display("History index {} is out of range (length {})", index, len)]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Current history length.
        len: usize,
    },

    /// History needs at least one seed snapshot.
    #[display("History requires at least one seed snapshot")]
    NoSeeds,
}

/// Append-only, branching sequence of snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    #[serde(skip)]
    seeds: Vec<Snapshot>,
    entries: Vec<Snapshot>,
}

impl History {
    /// Creates a history seeded with a single starting snapshot.
    #[instrument(skip(seed))]
    pub fn new(seed: Snapshot) -> Self {
        Self {
            seeds: vec![seed.clone()],
            entries: vec![seed],
        }
    }

    /// Creates a history from several seeds; [`History::reset`] restores all of them.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NoSeeds`] for an empty list.
    #[instrument(skip(seeds), fields(count = seeds.len()))]
    pub fn with_seeds(seeds: Vec<Snapshot>) -> Result<Self, HistoryError> {
        if seeds.is_empty() {
            warn!("Refusing to build history without seeds");
            return Err(HistoryError::NoSeeds);
        }
        Ok(Self {
            entries: seeds.clone(),
            seeds,
        })
    }

    /// Appends a snapshot. No legality checks happen here.
    #[instrument(skip(self, snapshot), fields(len = self.entries.len()))]
    pub fn append(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
        debug!(len = self.entries.len(), "Snapshot appended");
    }

    /// Re-publishes `history[index]` at the end of history.
    ///
    /// With `with_branch_marker`, the appended copy records `index` as its
    /// branch source; without it the snapshot is appended verbatim, which is
    /// what replay uses.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfBounds`] if `index >= len()`.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn rewind(&mut self, index: usize, with_branch_marker: bool) -> Result<&Snapshot, HistoryError> {
        let source = self.get(index)?;
        let snapshot = if with_branch_marker {
            source.branched_from(index)
        } else {
            source.clone()
        };

        info!(index, with_branch_marker, "Rewinding history");
        self.entries.push(snapshot);
        Ok(self.current())
    }

    /// Discards everything appended since construction.
    #[instrument(skip(self), fields(len = self.entries.len()))]
    pub fn reset(&mut self) {
        self.entries = self.seeds.clone();
        info!(len = self.entries.len(), "History reset");
    }

    /// The most recent snapshot.
    pub fn current(&self) -> &Snapshot {
        // Seeds are non-empty and reset restores them, so there is always an entry.
        &self.entries[self.entries.len() - 1]
    }

    /// Snapshot at `index`.
    pub fn get(&self, index: usize) -> Result<&Snapshot, HistoryError> {
        self.entries.get(index).ok_or(HistoryError::OutOfBounds {
            index,
            len: self.entries.len(),
        })
    }

    /// Branch source recorded at `index`, if that snapshot came from a rewind.
    pub fn branch_marker_at(&self, index: usize) -> Result<Option<usize>, HistoryError> {
        Ok(self.get(index)?.branch_source)
    }

    /// Number of snapshots, always at least one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: history always holds its seeds.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
