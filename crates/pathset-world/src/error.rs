//! Error types for world sampling.

use pathset_space::SpaceError;
use thiserror::Error;

/// Errors from grid generation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The requested grid shape is invalid.
    #[error(transparent)]
    Space(#[from] SpaceError),
    /// The generated grid has fewer than two free cells, so distinct
    /// start and goal cells cannot be chosen.
    #[error("{rows}x{cols} grid has {free} free cells, need at least 2")]
    NotEnoughFreeCells {
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        cols: u32,
        /// Free cells in the generated grid.
        free: usize,
    },
    /// Obstacle density outside `[0, 1]`.
    #[error("invalid obstacle density: {reason}")]
    InvalidDensity {
        /// What went wrong.
        reason: String,
    },
    /// A grid kind name that is not `free`, `obstacle` or `maze`.
    #[error("unknown grid kind {name:?}, expected \"free\", \"obstacle\" or \"maze\"")]
    UnknownGridKind {
        /// The unrecognised name.
        name: String,
    },
}
