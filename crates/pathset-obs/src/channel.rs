//! Single-channel `i8` grids and the cell encoding constants.

use pathset_core::{ObsError, Position};
use pathset_space::Cell;

/// State channel value of a wall cell.
pub const WALL: i8 = 1;
/// State channel value of a free cell.
pub const FREE: i8 = 0;
/// State channel value of a cell outside the visible region.
pub const UNSEEN: i8 = -1;
/// State channel value of the agent's own cell.
pub const AGENT: i8 = 2;
/// Goal channel value of the goal cell.
pub const GOAL: i8 = 10;

/// State channel encoding of a grid cell.
pub fn encode_cell(cell: Cell) -> i8 {
    match cell {
        Cell::Free => FREE,
        Cell::Wall => WALL,
    }
}

/// A `rows x cols` array of `i8`, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Channel {
    rows: u32,
    cols: u32,
    data: Vec<i8>,
}

impl Channel {
    /// A channel with every cell set to `value`.
    pub fn filled(rows: u32, cols: u32, value: i8) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows as usize * cols as usize],
        }
    }

    /// Build a channel from a row-major buffer of length `rows * cols`.
    pub fn from_vec(rows: u32, cols: u32, data: Vec<i8>) -> Result<Self, ObsError> {
        let expected = rows as usize * cols as usize;
        if data.len() != expected {
            return Err(ObsError::BufferLength {
                rows,
                cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Caller guarantees `data.len() == rows * cols`.
    pub(crate) fn from_raw(rows: u32, cols: u32, data: Vec<i8>) -> Self {
        debug_assert_eq!(data.len(), rows as usize * cols as usize);
        Self { rows, cols, data }
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

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 || pos.row as u32 >= self.rows || pos.col as u32 >= self.cols
        {
            return None;
        }
        Some(pos.row as usize * self.cols as usize + pos.col as usize)
    }

    pub(crate) fn out_of_bounds(&self, position: Position) -> ObsError {
        ObsError::OutOfBounds {
            position,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Value at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<i8> {
        self.index(pos).map(|i| self.data[i])
    }

    /// Overwrite the value at `pos`.
    pub fn set(&mut self, pos: Position, value: i8) -> Result<(), ObsError> {
        let i = self.index(pos).ok_or_else(|| self.out_of_bounds(pos))?;
        self.data[i] = value;
        Ok(())
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: i8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Positions holding `value`, in row-major order.
    pub fn positions_of(&self, value: i8) -> Vec<Position> {
        let cols = self.cols as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == value)
            .map(|(i, _)| Position::new((i / cols) as i32, (i % cols) as i32))
            .collect()
    }

    /// Row-major values.
    pub fn as_slice(&self) -> &[i8] {
        &self.data
    }

    /// Consume the channel, returning its buffer.
    pub fn into_vec(self) -> Vec<i8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_set() {
        let mut ch = Channel::filled(2, 3, UNSEEN);
        assert_eq!(ch.count(UNSEEN), 6);
        ch.set(Position::new(1, 2), AGENT).unwrap();
        assert_eq!(ch.get(Position::new(1, 2)), Some(AGENT));
        assert_eq!(ch.positions_of(AGENT), vec![Position::new(1, 2)]);
        assert_eq!(ch.as_slice()[5], AGENT);
    }

    #[test]
    fn set_out_of_bounds_fails() {
        let mut ch = Channel::filled(2, 2, FREE);
        let err = ch.set(Position::new(2, 0), AGENT).unwrap_err();
        assert_eq!(
            err,
            ObsError::OutOfBounds {
                position: Position::new(2, 0),
                rows: 2,
                cols: 2
            }
        );
        assert_eq!(ch.get(Position::new(-1, 0)), None);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Channel::from_vec(2, 2, vec![0; 4]).is_ok());
        assert_eq!(
            Channel::from_vec(2, 2, vec![0; 5]),
            Err(ObsError::BufferLength {
                rows: 2,
                cols: 2,
                actual: 5
            })
        );
    }

    #[test]
    fn cell_encoding() {
        assert_eq!(encode_cell(Cell::Wall), 1);
        assert_eq!(encode_cell(Cell::Free), 0);
    }
}
