//! Error types for grid construction.

use thiserror::Error;

/// Errors arising from grid construction or parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// A dimension does not fit the `i32` coordinate range.
    #[error("{name} = {value} exceeds the maximum of {max}")]
    DimensionTooLarge {
        /// Which dimension (`"rows"` or `"cols"`).
        name: &'static str,
        /// The requested size.
        value: u32,
        /// The largest accepted size.
        max: u32,
    },
    /// The cell buffer does not match `rows * cols`.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// ASCII grid text could not be parsed.
    #[error("grid parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number within the non-empty lines.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}
