//! 2D wall/free grid with 4-connected neighbourhood (N/S/W/E).

use crate::error::SpaceError;
use pathset_core::{Movement, Position};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Contents of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Traversable cell.
    #[default]
    Free,
    /// Obstacle.
    Wall,
}

impl Cell {
    /// Whether the cell blocks movement.
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    fn to_char(self) -> char {
        match self {
            Cell::Free => '.',
            Cell::Wall => '#',
        }
    }
}

/// A two-dimensional grid of [`Cell`]s, stored row-major.
///
/// Each cell has position `(row, col)` where `0 <= row < rows` and
/// `0 <= col < cols`. Neighbours are the four cardinal directions in the
/// canonical movement order (north, south, west, east); cells on the
/// border simply have fewer neighbours.
///
/// Grids are immutable once built: generators assemble a cell buffer and
/// hand it to [`Grid::from_cells`] or [`Grid::from_fn`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Maximum dimension size: positions use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a grid of `rows * cols` free cells.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathset_core::Position;
    /// use pathset_space::Grid;
    ///
    /// let grid = Grid::new(5, 5).unwrap();
    /// assert_eq!(grid.cell_count(), 25);
    ///
    /// // Corner cell (0, 0) has only 2 neighbours.
    /// assert_eq!(grid.neighbours(Position::new(0, 0)).len(), 2);
    /// ```
    pub fn new(rows: u32, cols: u32) -> Result<Self, SpaceError> {
        let n = Self::check_dims(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Free; n],
        })
    }

    /// Build a grid from a row-major cell buffer.
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<Cell>) -> Result<Self, SpaceError> {
        let n = Self::check_dims(rows, cols)?;
        if cells.len() != n {
            return Err(SpaceError::CellCountMismatch {
                expected: n,
                actual: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid by evaluating `f` at every position in row-major order.
    pub fn from_fn(
        rows: u32,
        cols: u32,
        mut f: impl FnMut(Position) -> Cell,
    ) -> Result<Self, SpaceError> {
        let n = Self::check_dims(rows, cols)?;
        let mut cells = Vec::with_capacity(n);
        for r in 0..rows as i32 {
            for c in 0..cols as i32 {
                cells.push(f(Position::new(r, c)));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// Parse an ASCII grid: `#` is a wall, `.` is free.
    ///
    /// Blank lines and surrounding whitespace are ignored; every remaining
    /// line must have the same width.
    ///
    /// ```
    /// use pathset_core::Position;
    /// use pathset_space::Grid;
    ///
    /// let grid = Grid::parse("
    ///     ..#
    ///     #..
    /// ").unwrap();
    /// assert_eq!((grid.rows(), grid.cols()), (2, 3));
    /// assert!(!grid.is_free(Position::new(0, 2)));
    /// ```
    pub fn parse(text: &str) -> Result<Self, SpaceError> {
        let mut cells = Vec::new();
        let mut rows = 0u32;
        let mut cols: Option<usize> = None;
        for (i, line) in text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            let line_no = i + 1;
            let width = line.chars().count();
            match cols {
                None => cols = Some(width),
                Some(w) if w != width => {
                    return Err(SpaceError::Parse {
                        line: line_no,
                        reason: format!("width {width} differs from first line width {w}"),
                    });
                }
                Some(_) => {}
            }
            for ch in line.chars() {
                let cell = match ch {
                    '.' => Cell::Free,
                    '#' => Cell::Wall,
                    other => {
                        return Err(SpaceError::Parse {
                            line: line_no,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                };
                cells.push(cell);
            }
            rows += 1;
        }
        let cols = u32::try_from(cols.unwrap_or(0)).map_err(|_| SpaceError::DimensionTooLarge {
            name: "cols",
            value: u32::MAX,
            max: Self::MAX_DIM,
        })?;
        Self::from_cells(rows, cols, cells)
    }

    fn check_dims(rows: u32, cols: u32) -> Result<usize, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if rows > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        Ok((rows as usize) * (cols as usize))
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell buffer.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as u32) < self.rows && (pos.col as u32) < self.cols
    }

    /// Row-major index of `pos`, or `None` when out of bounds.
    pub fn rank(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(pos.row as usize * self.cols as usize + pos.col as usize)
    }

    /// Position of a row-major index. `rank` must be `< cell_count()`.
    pub fn position_of(&self, rank: usize) -> Position {
        debug_assert!(rank < self.cells.len());
        let cols = self.cols as usize;
        Position::new((rank / cols) as i32, (rank % cols) as i32)
    }

    /// Cell at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.rank(pos).map(|i| self.cells[i])
    }

    /// Whether `pos` is in bounds and not a wall.
    pub fn is_free(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Free)
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_wall()).count()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.position_of(i))
    }

    /// Free positions in row-major order.
    pub fn free_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_wall())
            .map(move |(i, _)| self.position_of(i))
    }

    /// In-bounds 4-connected neighbours of `pos`, in N/S/W/E order.
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        Movement::CANONICAL
            .iter()
            .map(|m| m.apply(pos))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// Neighbours of `pos` that are free, in N/S/W/E order.
    pub fn open_neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        Movement::CANONICAL
            .iter()
            .map(|m| m.apply(pos))
            .filter(|&p| self.is_free(p))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
