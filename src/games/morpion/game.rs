//! Game controller for morpion.
//!
//! [`Game`] owns the configuration and the branching [`History`]. A move is
//! validated against the current grid, applied copy-on-write, checked for a
//! winning run through the played cell, and appended as a new snapshot.
//! Status is derived from the current snapshot's winner, so rewinding to an
//! earlier state reopens play without any extra bookkeeping.

use super::action::{Coord, GameError};
use super::history::{History, Snapshot};
use super::rules::{RuleError, detect_winner};
use super::types::{GameStatus, Mark, Square};
use super::Grid;
use crate::config::GameConfig;
use tracing::{debug, info, instrument, warn};

/// Morpion game engine.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    history: History,
}

impl Game {
    /// Creates a new game with `X` to move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Grid`] for a zero dimension and
    /// [`GameError::Rule`] for a zero win length.
    #[instrument]
    pub fn new(width: usize, height: usize, win_length: usize) -> Result<Self, GameError> {
        Self::from_config(&GameConfig::new(width, height, win_length))
    }

    /// Creates a new game from a configuration.
    #[instrument]
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        if *config.win_length() == 0 {
            warn!("Rejecting zero win length");
            return Err(RuleError::InvalidWinLength.into());
        }
        let grid = Grid::new(*config.width(), *config.height())?;
        let seed = Snapshot::new(grid, *config.first_player(), None);

        info!(
            width = config.width(),
            height = config.height(),
            win_length = config.win_length(),
            first_player = %config.first_player(),
            "New game"
        );
        Ok(Self {
            config: *config,
            history: History::new(seed),
        })
    }

    /// Replays `moves` from a fresh game, stopping at the first rejected move.
    #[instrument(skip(moves), fields(move_count = moves.len()))]
    pub fn replay(config: &GameConfig, moves: &[Coord]) -> Result<Self, GameError> {
        let mut game = Self::from_config(config)?;
        for coord in moves {
            game.play_move(coord.x, coord.y)?;
        }
        debug!(history_len = game.history_len(), "Replay complete");
        Ok(game)
    }

    /// Returns the game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the full history, branches included.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the current snapshot.
    pub fn current(&self) -> &Snapshot {
        self.history.current()
    }

    /// Returns the current board.
    pub fn current_grid(&self) -> &Grid<Square> {
        self.current().grid()
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Mark {
        *self.current().next_player()
    }

    /// Returns the winner of the current snapshot, if any.
    pub fn current_winner(&self) -> Option<Mark> {
        *self.current().winner()
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        GameStatus::from(self.current_winner())
    }

    /// Returns the number of snapshots in history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the rewind source recorded at `index`.
    #[instrument(skip(self))]
    pub fn branch_marker_at(&self, index: usize) -> Result<Option<usize>, GameError> {
        Ok(self.history.branch_marker_at(index)?)
    }

    /// Returns the empty cells, or nothing once the game is won.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Coord> {
        if self.status().is_over() {
            return Vec::new();
        }
        self.current_grid()
            .cells()
            .filter(|cell| cell.value.is_empty())
            .map(|cell| Coord::new(cell.x, cell.y))
            .collect()
    }

    /// Plays the current player's mark at `(x, y)`.
    ///
    /// A rejected move leaves history untouched.
    ///
    /// # Errors
    ///
    /// - [`GameError::Grid`] if `(x, y)` is off the board
    /// - [`GameError::CellOccupied`] if the cell already holds a mark
    /// - [`GameError::GameOver`] if a player has already won
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn play_move(&mut self, x: usize, y: usize) -> Result<GameStatus, GameError> {
        let current = self.history.current();

        if !current.grid().try_get(x, y)?.is_empty() {
            warn!(x, y, "Cell already occupied");
            return Err(GameError::CellOccupied(Coord::new(x, y)));
        }
        if let Some(winner) = *current.winner() {
            warn!(%winner, "Move rejected, game is over");
            return Err(GameError::GameOver(winner));
        }

        let player = *current.next_player();
        let grid = current.grid().set(x, y, Square::Occupied(player))?;
        let winner = detect_winner(&grid, x, y, *self.config.win_length())?;

        self.history
            .append(Snapshot::new(grid, player.opponent(), winner));

        let status = GameStatus::from(winner);
        match status {
            GameStatus::Won(mark) => info!(%mark, x, y, "Game won"),
            GameStatus::InProgress => debug!(x, y, "Move applied"),
        }
        Ok(status)
    }

    /// Rewinds to the snapshot at `index`, appending a branch-marked copy.
    ///
    /// Play resumes from that state; everything after it stays in history.
    #[instrument(skip(self))]
    pub fn rewind_to(&mut self, index: usize) -> Result<GameStatus, GameError> {
        let snapshot = self.history.rewind(index, true)?;
        let status = GameStatus::from(*snapshot.winner());
        info!(index, %status, "Rewound");
        Ok(status)
    }

    /// Restores the initial empty board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.history.reset();
        info!("Game reset");
    }
}
