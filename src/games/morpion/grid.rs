//! Immutable two-dimensional grid.
//!
//! Cells are stored in one flat vector indexed by `x + width * y`, where `x`
//! selects the column and `y` the row:
//!
//! ```text
//!      x0 x1 x2
//!  y0   0  1  2
//!  y1   3  4  5
//!  y2   6  7  8
//! ```
//!
//! A published [`Grid`] is never mutated. [`Grid::set`] returns a fresh grid,
//! and the only in-place writer is [`GridBuilder`], which owns its grid until
//! [`GridBuilder::build`] hands it out.

use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use tracing::{debug, instrument};

/// Error raised by grid construction and strict accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// Coordinate outside `[0, width) x [0, height)`.
    #[display("Coordinate ({}, {}) is outside the {}x{} grid", x, y, width, height)]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Linear index past the last cell.
    #[display("Linear index {} is outside a grid of {} cells", index, area)]
    IndexOutOfBounds {
        /// Requested linear index.
        index: usize,
        /// Number of cells in the grid.
        area: usize,
    },

    /// Zero width or height.
    #[display("Grid dimensions must be positive, got {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Cell vector length does not match `width * height`.
    #[display("Expected {} cells, got {}", expected, actual)]
    CellCount {
        /// `width * height`.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
}

/// Fixed-size rectangular container of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridParts<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Unvalidated wire form of a grid.
#[derive(Deserialize)]
struct GridParts<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<GridParts<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(parts: GridParts<T>) -> Result<Self, Self::Error> {
        Grid::from_cells(parts.width, parts.height, parts.cells)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<usize, GridError> {
    match width.checked_mul(height) {
        Some(area) if area > 0 => Ok(area),
        _ => Err(GridError::InvalidDimensions { width, height }),
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a grid with every cell set to `T::default()`.
    #[instrument]
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::filled(width, height, T::default())
    }

    /// Reads a cell, treating anything off the board as `T::default()`.
    ///
    /// Win scanning probes past the edges without clamping, so this accessor
    /// is total over signed coordinates.
    pub fn get(&self, x: isize, y: isize) -> T {
        self.cell(x, y).cloned().unwrap_or_default()
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[instrument(skip(value))]
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, GridError> {
        let area = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![value; area],
        })
    }

    /// Returns a new grid equal to this one except at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates off the board. Unlike
    /// [`Grid::get`], writes are always bounds-checked.
    #[instrument(skip(self, value), fields(width = self.width, height = self.height))]
    pub fn set(&self, x: usize, y: usize, value: T) -> Result<Self, GridError> {
        let mut builder = GridBuilder::from(self.clone());
        builder.set(x, y, value)?;
        Ok(builder.build())
    }

    /// Extracts the inclusive box `(x0, y0)..=(x1, y1)` in row-major order.
    ///
    /// The box is intersected with the board, so parts hanging off the edge
    /// contribute nothing and an inverted box yields an empty vector.
    #[instrument(skip(self))]
    pub fn sub_region(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Vec<T> {
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            debug!("Region does not intersect the grid");
            return Vec::new();
        }

        let mut region = Vec::with_capacity((x1 - x0 + 1) * (y1 - y0 + 1));
        for y in y0..=y1 {
            let start = x0 + self.width * y;
            let end = x1 + self.width * y;
            region.extend_from_slice(&self.cells[start..=end]);
        }
        region
    }

    /// All cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Result<Vec<T>, GridError> {
        self.linear_index(0, y)?;
        Ok(self.sub_region(0, y, self.width - 1, y))
    }

    /// All cells of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> Result<Vec<T>, GridError> {
        self.linear_index(x, 0)?;
        Ok(self.sub_region(x, 0, x, self.height - 1))
    }
}

impl<T> Grid<T> {
    /// Wraps an existing cell vector laid out by linear index.
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        let area = check_dimensions(width, height)?;
        if cells.len() != area {
            return Err(GridError::CellCount {
                expected: area,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Cells in linear-index order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Returns true if the signed coordinate lies on the board.
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Maps `(x, y)` to its linear index `x + width * y`.
    pub fn linear_index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + self.width * y)
    }

    /// Inverse of [`Grid::linear_index`].
    pub fn coordinates_of(&self, index: usize) -> Result<(usize, usize), GridError> {
        if index >= self.cells.len() {
            return Err(GridError::IndexOutOfBounds {
                index,
                area: self.cells.len(),
            });
        }
        Ok((index % self.width, index / self.width))
    }

    /// Borrowing read over signed coordinates; `None` off the board.
    pub fn cell(&self, x: isize, y: isize) -> Option<&T> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get(x as usize + self.width * y as usize)
    }

    /// Strict read.
    pub fn try_get(&self, x: usize, y: usize) -> Result<&T, GridError> {
        let index = self.linear_index(x, y)?;
        Ok(&self.cells[index])
    }

    /// Enumerates every cell, columns outermost.
    ///
    /// Each call starts a fresh traversal.
    pub fn cells(&self) -> Cells<'_, T> {
        Cells {
            grid: self,
            x: 0,
            y: 0,
        }
    }

    /// Builds a new grid by applying `f(value, linear, x, y)` to every cell.
    #[instrument(skip(self, f), fields(width = self.width, height = self.height))]
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T, usize, usize, usize) -> U,
    {
        let width = self.width;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(linear, value)| f(value, linear, linear % width, linear / width))
            .collect();
        Grid {
            width,
            height: self.height,
            cells,
        }
    }
}

impl Grid<(usize, usize, usize)> {
    /// Grid whose cells hold their own `(x, y, linear)` triple.
    #[instrument]
    pub fn self_describe(width: usize, height: usize) -> Result<Self, GridError> {
        let blank = Grid::filled(width, height, ())?;
        Ok(blank.map(|_, linear, x, y| (x, y, linear)))
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = CellRef<'a, T>;
    type IntoIter = Cells<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells()
    }
}

/// One cell yielded by [`Grid::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a, T> {
    /// Cell contents.
    pub value: &'a T,
    /// Linear index of the cell.
    pub linear: usize,
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

/// Iterator over a grid's cells: outer loop on `x`, inner loop on `y`.
#[derive(Debug, Clone)]
pub struct Cells<'a, T> {
    grid: &'a Grid<T>,
    x: usize,
    y: usize,
}

impl<'a, T> Iterator for Cells<'a, T> {
    type Item = CellRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.grid.width {
            return None;
        }
        let (x, y) = (self.x, self.y);
        let linear = x + self.grid.width * y;

        self.y += 1;
        if self.y == self.grid.height {
            self.y = 0;
            self.x += 1;
        }

        Some(CellRef {
            value: &self.grid.cells[linear],
            linear,
            x,
            y,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.x >= self.grid.width {
            0
        } else {
            (self.grid.width - self.x) * self.grid.height - self.y
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}

impl<T> FusedIterator for Cells<'_, T> {}

/// Private scratch grid for in-place updates.
///
/// The builder owns its grid; nothing else can observe the writes until
/// [`GridBuilder::build`] consumes it.
#[derive(Debug, Clone)]
pub struct GridBuilder<T> {
    grid: Grid<T>,
}

impl<T: Clone + Default> GridBuilder<T> {
    /// Starts from an all-default grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid::new(width, height)?,
        })
    }
}

impl<T> GridBuilder<T> {
    /// Overwrites `(x, y)` in place.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<&mut Self, GridError> {
        let index = self.grid.linear_index(x, y)?;
        self.grid.cells[index] = value;
        Ok(self)
    }

    /// Finishes the builder, publishing its grid.
    pub fn build(self) -> Grid<T> {
        self.grid
    }
}

impl<T> From<Grid<T>> for GridBuilder<T> {
    fn from(grid: Grid<T>) -> Self {
        Self { grid }
    }
}

impl Grid<super::Square> {
    /// Formats the grid as text, one row per line, with column indices on top.
    pub fn display(&self) -> String {
        let label_width = self.height.saturating_sub(1).to_string().len();
        let mut result = String::new();

        result.push_str(&" ".repeat(label_width + 1));
        for x in 0..self.width {
            result.push_str(&(x % 10).to_string());
            if x + 1 < self.width {
                result.push(' ');
            }
        }
        result.push('\n');

        for y in 0..self.height {
            result.push_str(&format!("{:>width$} ", y, width = label_width));
            let row = &self.cells[self.width * y..self.width * (y + 1)];
            let symbols: Vec<String> = row.iter().map(|s| s.symbol().to_string()).collect();
            result.push_str(&symbols.join("|"));
            if y + 1 < self.height {
                result.push('\n');
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::morpion::{Mark, Square};

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid<Square> = Grid::new(4, 3).unwrap();
        assert_eq!(grid.area(), 12);
        assert!(grid.as_slice().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Grid::<Square>::new(0, 3),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::<Square>::new(3, 0).is_err());
    }

    #[test]
    fn test_set_leaves_original_untouched() {
        let grid: Grid<Square> = Grid::new(3, 3).unwrap();
        let next = grid.set(1, 2, Square::Occupied(Mark::X)).unwrap();

        assert_eq!(next.get(1, 2), Square::Occupied(Mark::X));
        assert_eq!(grid.get(1, 2), Square::Empty);
        assert_eq!(next.as_slice()[1 + 3 * 2], Square::Occupied(Mark::X));
    }

    #[test]
    fn test_set_out_of_bounds_fails() {
        let grid: Grid<Square> = Grid::new(3, 2).unwrap();
        assert_eq!(
            grid.set(3, 0, Square::Occupied(Mark::O)),
            Err(GridError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            })
        );
        assert!(grid.set(0, 2, Square::Occupied(Mark::O)).is_err());
    }

    #[test]
    fn test_get_off_board_reads_empty() {
        let grid = Grid::filled(2, 2, Square::Occupied(Mark::X)).unwrap();
        assert_eq!(grid.get(-1, 0), Square::Empty);
        assert_eq!(grid.get(0, -1), Square::Empty);
        assert_eq!(grid.get(2, 0), Square::Empty);
        assert_eq!(grid.get(0, 2), Square::Empty);
        assert_eq!(grid.get(1, 1), Square::Occupied(Mark::X));
    }

    #[test]
    fn test_negative_x_does_not_wrap_into_previous_row() {
        let grid: Grid<Square> = Grid::new(3, 3).unwrap();
        let grid = grid.set(2, 0, Square::Occupied(Mark::O)).unwrap();
        // (-1, 1) would alias linear index 2 without the bounds check.
        assert_eq!(grid.get(-1, 1), Square::Empty);
        assert_eq!(grid.cell(-1, 1), None);
    }

    #[test]
    fn test_try_get_is_strict() {
        let grid: Grid<Square> = Grid::new(2, 2).unwrap();
        assert_eq!(grid.try_get(1, 1), Ok(&Square::Empty));
        assert!(grid.try_get(2, 1).is_err());
    }

    #[test]
    fn test_linear_index_layout() {
        let grid: Grid<Square> = Grid::new(3, 3).unwrap();
        assert_eq!(grid.linear_index(0, 0), Ok(0));
        assert_eq!(grid.linear_index(2, 0), Ok(2));
        assert_eq!(grid.linear_index(0, 1), Ok(3));
        assert_eq!(grid.linear_index(2, 2), Ok(8));
        assert_eq!(grid.coordinates_of(5), Ok((2, 1)));
        assert_eq!(
            grid.coordinates_of(9),
            Err(GridError::IndexOutOfBounds { index: 9, area: 9 })
        );
    }

    #[test]
    fn test_cells_order_columns_outermost() {
        let grid = Grid::self_describe(2, 3).unwrap();
        let order: Vec<(usize, usize, usize)> =
            grid.cells().map(|c| (c.x, c.y, c.linear)).collect();
        assert_eq!(
            order,
            vec![(0, 0, 0), (0, 1, 2), (0, 2, 4), (1, 0, 1), (1, 1, 3), (1, 2, 5)]
        );
        for cell in &grid {
            assert_eq!(*cell.value, (cell.x, cell.y, cell.linear));
        }
    }

    #[test]
    fn test_cells_is_restartable() {
        let grid: Grid<Square> = Grid::new(3, 2).unwrap();
        let first: Vec<usize> = grid.cells().map(|c| c.linear).collect();
        let second: Vec<usize> = grid.cells().map(|c| c.linear).collect();
        assert_eq!(first, second);
        assert_eq!(grid.cells().len(), 6);
    }

    #[test]
    fn test_sub_region_row_major() {
        let grid = Grid::self_describe(4, 3).unwrap();
        let linear: Vec<usize> = grid
            .sub_region(1, 0, 2, 1)
            .into_iter()
            .map(|(_, _, l)| l)
            .collect();
        assert_eq!(linear, vec![1, 2, 5, 6]);
    }

    #[test]
    fn test_sub_region_clipped_and_inverted() {
        let grid = Grid::self_describe(3, 3).unwrap();
        assert_eq!(grid.sub_region(2, 2, 10, 10), vec![(2, 2, 8)]);
        assert!(grid.sub_region(2, 0, 1, 2).is_empty());
        assert!(grid.sub_region(5, 0, 6, 2).is_empty());
    }

    #[test]
    fn test_row_and_column() {
        let grid = Grid::self_describe(3, 2).unwrap();
        let row: Vec<usize> = grid.row(1).unwrap().into_iter().map(|c| c.2).collect();
        let column: Vec<usize> = grid.column(2).unwrap().into_iter().map(|c| c.2).collect();
        assert_eq!(row, vec![3, 4, 5]);
        assert_eq!(column, vec![2, 5]);
        assert!(grid.row(2).is_err());
        assert!(grid.column(3).is_err());
    }

    #[test]
    fn test_builder_mutates_privately() {
        let mut builder = GridBuilder::<Square>::new(3, 3).unwrap();
        builder
            .set(0, 0, Square::Occupied(Mark::X))
            .unwrap()
            .set(2, 2, Square::Occupied(Mark::O))
            .unwrap();
        assert!(builder.set(3, 3, Square::Occupied(Mark::X)).is_err());

        let grid = builder.build();
        assert_eq!(grid.get(0, 0), Square::Occupied(Mark::X));
        assert_eq!(grid.get(2, 2), Square::Occupied(Mark::O));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert_eq!(
            Grid::from_cells(2, 2, vec![Square::Empty; 3]),
            Err(GridError::CellCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Grid<u8> =
            serde_json::from_str(r#"{"width":2,"height":1,"cells":[1,2]}"#).unwrap();
        assert_eq!(ok.as_slice(), &[1, 2]);

        let bad = serde_json::from_str::<Grid<u8>>(r#"{"width":2,"height":2,"cells":[1]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        let grid: Grid<Square> = Grid::new(3, 2).unwrap();
        let grid = grid.set(1, 0, Square::Occupied(Mark::X)).unwrap();
        let grid = grid.set(2, 1, Square::Occupied(Mark::O)).unwrap();
        assert_eq!(grid.display(), "  0 1 2\n0 .|X|.\n1 .|.|O");
    }
}
