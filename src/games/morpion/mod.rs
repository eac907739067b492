//! N-in-a-row on a rectangular board.

mod action;
mod game;
mod grid;
mod history;
mod types;

pub mod rules;

pub use action::{Coord, GameError, ParseCoordError};
pub use game::Game;
pub use grid::{CellRef, Cells, Grid, GridBuilder, GridError};
pub use history::{History, HistoryError, Snapshot};
pub use rules::{Orientation, RuleError, detect_winner, winning_orientation};
pub use types::{GameStatus, Mark, Square};
