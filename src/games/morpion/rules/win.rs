//! Win detection logic for morpion.
//!
//! After a move at `(x, y)`, each of the four line orientations through that
//! cell is sampled over `2 * win_length` offsets, from `-win_length` up to
//! `win_length - 1`. The window is wider than any run that could include the
//! played cell, and probes falling off the board read as empty.

use super::super::{Grid, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Rule evaluation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RuleError {
    /// Win length of zero.
    #[display("Win length must be positive")]
    InvalidWinLength,
}

/// Line orientation through a cell, in evaluation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Orientation {
    /// Varying x, fixed y.
    #[strum(to_string = "horizontal")]
    Horizontal,
    /// Varying y, fixed x.
    #[strum(to_string = "vertical")]
    Vertical,
    /// x and y increase together.
    #[strum(to_string = "diagonal (up-left to down-right)")]
    DiagonalUpLeft,
    /// x increases while y decreases.
    #[strum(to_string = "diagonal (down-left to up-right)")]
    DiagonalDownLeft,
}

impl Orientation {
    /// Unit step `(dx, dy)` along this line.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
            Orientation::DiagonalUpLeft => (1, 1),
            Orientation::DiagonalDownLeft => (1, -1),
        }
    }

    /// Coordinates sampled around `(x, y)` for a given reach.
    pub fn probes(self, x: isize, y: isize, reach: isize) -> impl Iterator<Item = (isize, isize)> {
        let (dx, dy) = self.step();
        (-reach..reach).map(move |k| (x + k * dx, y + k * dy))
    }
}

/// Folds a probe sequence into a consecutive-match counter.
///
/// The counter restarts from zero on every mismatch; the line wins if it
/// reaches `win_length` at any point.
fn line_wins<I>(grid: &Grid<Square>, player: Square, probes: I, win_length: usize) -> bool
where
    I: Iterator<Item = (isize, isize)>,
{
    probes
        .scan(0usize, |run, (px, py)| {
            *run = if grid.get(px, py) == player { *run + 1 } else { 0 };
            Some(*run)
        })
        .any(|run| run >= win_length)
}

/// Returns the first orientation through `(x, y)` holding a winning run for
/// the mark on that cell.
///
/// # Errors
///
/// Returns [`RuleError::InvalidWinLength`] when `win_length` is zero.
///
/// A `win_length` longer than both board sides can never be reached and
/// yields `Ok(None)` without scanning.
#[instrument(skip(grid), fields(width = grid.width(), height = grid.height()))]
pub fn winning_orientation(
    grid: &Grid<Square>,
    x: usize,
    y: usize,
    win_length: usize,
) -> Result<Option<Orientation>, RuleError> {
    if win_length == 0 {
        return Err(RuleError::InvalidWinLength);
    }
    if win_length > grid.width().max(grid.height()) {
        debug!(win_length, "Win length exceeds the board");
        return Ok(None);
    }
    let reach = isize::try_from(win_length).map_err(|_| RuleError::InvalidWinLength)?;
    let (Ok(x), Ok(y)) = (isize::try_from(x), isize::try_from(y)) else {
        return Ok(None);
    };

    let player = grid.get(x, y);
    if player.is_empty() {
        debug!("Played cell is empty, nothing to detect");
        return Ok(None);
    }

    let found = <Orientation as strum::IntoEnumIterator>::iter()
        .find(|orientation| line_wins(grid, player, orientation.probes(x, y, reach), win_length));

    if let Some(orientation) = found {
        info!(%orientation, ?player, "Winning run found");
    }
    Ok(found)
}

/// Returns the mark on `(x, y)` if it now has a run of `win_length`.
///
/// No draw detection: a full board without a run yields `None`.
#[instrument(skip(grid))]
pub fn detect_winner(
    grid: &Grid<Square>,
    x: usize,
    y: usize,
    win_length: usize,
) -> Result<Option<Mark>, RuleError> {
    let orientation = winning_orientation(grid, x, y, win_length)?;
    Ok(orientation.and_then(|_| grid.try_get(x, y).ok().and_then(|square| square.mark())))
}
