//! Core domain types for morpion.

use serde::{Deserialize, Serialize};

/// Player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Player X.
    #[default]
    X,
    /// Player O.
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the morpion grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell. Also what off-board probes read as.
    #[default]
    Empty,
    /// Cell occupied by a player.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark occupying this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    /// Single-character symbol used by the text renderer.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

impl From<Mark> for Square {
    fn from(mark: Mark) -> Self {
        Square::Occupied(mark)
    }
}

/// Current status of the game.
///
/// There is no draw: a full board without a run stays `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GameStatus {
    /// Moves are accepted.
    #[display("In progress")]
    InProgress,
    /// A player completed a run; no further moves until reset or rewind.
    #[display("Player {} wins", _0)]
    Won(Mark),
}

impl GameStatus {
    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(mark) => Some(mark),
        }
    }

    /// Returns true once a player has won.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_))
    }
}

impl From<Option<Mark>> for GameStatus {
    fn from(winner: Option<Mark>) -> Self {
        match winner {
            Some(mark) => GameStatus::Won(mark),
            None => GameStatus::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent().opponent(), Mark::O);
    }

    #[test]
    fn test_mark_parses_case_insensitive() {
        assert_eq!(Mark::from_str("o").unwrap(), Mark::O);
        assert_eq!(Mark::from_str("X").unwrap(), Mark::X);
        assert!(Mark::from_str("Z").is_err());
    }

    #[test]
    fn test_square_default_is_empty() {
        assert!(Square::default().is_empty());
        assert_eq!(Square::from(Mark::O).mark(), Some(Mark::O));
    }

    #[test]
    fn test_status_from_winner() {
        assert_eq!(GameStatus::from(None), GameStatus::InProgress);
        assert_eq!(GameStatus::from(Some(Mark::X)), GameStatus::Won(Mark::X));
        assert_eq!(GameStatus::Won(Mark::O).to_string(), "Player O wins");
        assert_eq!(GameStatus::Won(Mark::O).winner(), Some(Mark::O));
        assert_eq!(GameStatus::InProgress.winner(), None);
    }
}
