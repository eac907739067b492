//! Strictly Morpion library - N-in-a-row game engine
//!
//! Generalized tic-tac-toe on a rectangular board of any size, where a player
//! wins by lining up `win_length` marks horizontally, vertically or
//! diagonally.
//!
//! # Architecture
//!
//! - **Grid**: immutable 2D container with copy-on-write updates
//! - **Rules**: win detection through the last played cell
//! - **History**: append-only snapshots with branching rewind
//! - **Game**: controller tying the three together
//! - **Session**: serialized shared access to named games
//!
//! # Example
//!
//! ```
//! use strictly_morpion::{Game, GameStatus, Mark};
//!
//! # fn example() -> Result<(), strictly_morpion::GameError> {
//! let mut game = Game::new(3, 3, 3)?;
//! for (x, y) in [(0, 0), (1, 1), (1, 0), (2, 2)] {
//!     game.play_move(x, y)?;
//! }
//! assert_eq!(game.play_move(2, 0)?, GameStatus::Won(Mark::X));
//!
//! // Rewinding keeps the abandoned line in history.
//! game.rewind_to(2)?;
//! assert_eq!(game.history_len(), 7);
//! assert_eq!(game.branch_marker_at(6)?, Some(2));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError, SessionId, SessionManager};

// Crate-level exports - Game types (morpion)
pub use games::morpion::{
    CellRef, Cells, Coord, Game, GameError, GameStatus, Grid, GridBuilder, GridError, History,
    HistoryError, Mark, Orientation, ParseCoordError, RuleError, Snapshot, Square,
    detect_winner, winning_orientation,
};
