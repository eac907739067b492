//! Move coordinates and move errors for morpion.

use super::Mark;
use super::grid::GridError;
use super::history::HistoryError;
use super::rules::RuleError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Board coordinate of a move: `x` is the column, `y` the row.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_new::new,
)]
#[display("({}, {})", x, y)]
pub struct Coord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

/// Input that is not a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Expected coordinates as \"x,y\", got {:?}", input)]
pub struct ParseCoordError {
    /// Rejected input.
    pub input: String,
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parses `"x,y"` or `"x y"`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseCoordError {
            input: s.to_string(),
        };
        let mut parts = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let x = parts.next().ok_or_else(error)?;
        let y = parts.next().ok_or_else(error)?;
        if parts.next().is_some() {
            return Err(error());
        }

        Ok(Coord::new(
            x.parse().map_err(|_| error())?,
            y.parse().map_err(|_| error())?,
        ))
    }
}

/// Error raised by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),

    /// A player has already won.
    #[display("Game is already over: player {} won", _0)]
    GameOver(Mark),

    /// Coordinate or dimension problem.
    #[display("{}", _0)]
    #[from]
    Grid(GridError),

    /// Invalid rule parameter.
    #[display("{}", _0)]
    #[from]
    Rule(RuleError),

    /// History index problem.
    #[display("{}", _0)]
    #[from]
    History(HistoryError),
}

impl GameError {
    /// Returns true for rejections of a legal-looking move: occupied cell or
    /// finished game.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::CellOccupied(_) | GameError::GameOver(_))
    }

    /// Returns true for out-of-range coordinates or history indices.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            GameError::Grid(GridError::OutOfBounds { .. } | GridError::IndexOutOfBounds { .. })
                | GameError::History(HistoryError::OutOfBounds { .. })
        )
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Grid(e) => Some(e),
            GameError::Rule(e) => Some(e),
            GameError::History(e) => Some(e),
            GameError::CellOccupied(_) | GameError::GameOver(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!("3,4".parse::<Coord>(), Ok(Coord::new(3, 4)));
        assert_eq!(" 0 7 ".parse::<Coord>(), Ok(Coord::new(0, 7)));
        assert_eq!("2, 5".parse::<Coord>(), Ok(Coord::new(2, 5)));
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
        assert!("1,2,3".parse::<Coord>().is_err());
        assert!("-1,2".parse::<Coord>().is_err());
    }

    #[test]
    fn test_error_classification() {
        let occupied = GameError::CellOccupied(Coord::new(1, 1));
        assert!(occupied.is_illegal_move());
        assert_eq!(occupied.to_string(), "Cell (1, 1) is already occupied");

        let off_board: GameError = GridError::OutOfBounds {
            x: 9,
            y: 0,
            width: 3,
            height: 3,
        }
        .into();
        assert!(off_board.is_out_of_bounds());
        assert!(!off_board.is_illegal_move());
        assert!(std::error::Error::source(&off_board).is_some());
    }
}
