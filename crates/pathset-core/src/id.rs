//! Strongly-typed grid positions and action labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate `(row, col)` on a 2D grid.
///
/// Coordinates are signed so that displacements and out-of-bounds probes
/// can be expressed directly. Whether a position is valid is always
/// decided against a concrete grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index, growing downwards.
    pub row: i32,
    /// Column index, growing to the right.
    pub col: i32,
}

impl Position {
    /// Create a position from its row and column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev (L-inf) distance to `other`.
    ///
    /// ```
    /// use pathset_core::Position;
    ///
    /// assert_eq!(Position::new(0, 0).chebyshev(Position::new(2, -3)), 3);
    /// ```
    pub fn chebyshev(self, other: Position) -> u32 {
        let dr = (i64::from(self.row) - i64::from(other.row)).unsigned_abs();
        let dc = (i64::from(self.col) - i64::from(other.col)).unsigned_abs();
        dr.max(dc).min(u64::from(u32::MAX)) as u32
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        let dr = (i64::from(self.row) - i64::from(other.row)).unsigned_abs();
        let dc = (i64::from(self.col) - i64::from(other.col)).unsigned_abs();
        (dr + dc).min(u64::from(u32::MAX)) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// Discrete action label emitted alongside each observation frame.
///
/// Labels `0..=3` correspond 1:1 to the four movements of a
/// [`MovementVocabulary`](crate::MovementVocabulary). [`Action::STAY`] is
/// reserved for episodes whose start cell is already the goal and is
/// never produced by the vocabulary itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(pub u8);

impl Action {
    /// Reserved "stay in place" label, one past the last movement label.
    pub const STAY: Action = Action(4);

    /// The label as an index, e.g. for one-hot encoding.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the reserved [`Action::STAY`] label.
    pub fn is_stay(self) -> bool {
        self == Self::STAY
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Action {
    fn from(v: u8) -> Self {
        Self(v)
    }
}
