//! Error types for the episode synthesis pipeline.
//!
//! Organised by stage: vocabulary lookups, path planning, observation
//! composition, and episode synthesis. Every failure is local and
//! synchronous; none of them leaves a partially built episode behind.

use crate::id::Position;
use thiserror::Error;

/// Errors from [`MovementVocabulary`](crate::MovementVocabulary) lookups
/// and construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VocabularyError {
    /// The displacement is not one of the four unit movements.
    #[error("displacement ({dr}, {dc}) is not a unit movement")]
    InvalidMovement {
        /// Row offset.
        dr: i32,
        /// Column offset.
        dc: i32,
    },
    /// The label has no movement in this vocabulary.
    #[error("action {action} has no movement")]
    InvalidAction {
        /// The offending label.
        action: u8,
    },
    /// A movement appears more than once in a custom order.
    #[error("movement ({dr}, {dc}) listed more than once")]
    DuplicateMovement {
        /// Row offset.
        dr: i32,
        /// Column offset.
        dc: i32,
    },
}

/// Errors from converting a path into an action plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The path contains no positions at all.
    #[error("path is empty")]
    EmptyPath,
    /// A step is not a single 4-connected move, or lands on a wall.
    #[error("malformed path at step {index}: {reason}")]
    MalformedPath {
        /// Index of the position the bad step leaves from.
        index: usize,
        /// What went wrong.
        reason: String,
    },
    /// A path position lies outside the grid.
    #[error("path position {index} at {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Index of the position in the path.
        index: usize,
        /// The offending position.
        position: Position,
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        cols: u32,
    },
}

/// Errors from observation composition and goal encoding.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ObsError {
    /// A position (agent or goal) lies outside the grid.
    #[error("position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        cols: u32,
    },
    /// Two channels that must be stacked have different shapes.
    #[error("channel shape {actual:?} does not match {expected:?}")]
    ShapeMismatch {
        /// Shape of the first channel.
        expected: (u32, u32),
        /// Shape of the mismatching channel.
        actual: (u32, u32),
    },
    /// A row-major buffer does not hold `rows * cols` cells.
    #[error("buffer of {actual} cells does not fit a {rows}x{cols} channel")]
    BufferLength {
        /// Rows of the requested channel.
        rows: u32,
        /// Columns of the requested channel.
        cols: u32,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// An observation policy parameter is out of range.
    #[error("invalid observation policy: {reason}")]
    InvalidPolicy {
        /// What went wrong.
        reason: String,
    },
}

/// Errors from synthesizing a single episode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EpisodeError {
    /// The path could not be converted into an action plan.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// A frame could not be composed.
    #[error("observation failed: {0}")]
    Obs(#[from] ObsError),
    /// The path oracle found no path from start to goal.
    #[error("no path from {start} to {goal}")]
    NoPathFound {
        /// Start cell.
        start: Position,
        /// Goal cell.
        goal: Position,
    },
    /// The optimal trajectory does not fit the configured episode length.
    #[error("action plan of length {plan_len} exceeds episode length {timesteps}")]
    TrajectoryOverflow {
        /// Number of actions in the plan.
        plan_len: usize,
        /// Configured episode length.
        timesteps: usize,
    },
    /// The step iterator ended before producing `timesteps` steps.
    #[error("episode stopped after {produced} of {timesteps} steps")]
    Incomplete {
        /// Steps produced.
        produced: usize,
        /// Configured episode length.
        timesteps: usize,
    },
    /// Start equals goal and the empty-plan policy rejects such samples.
    #[error("start {position} is already the goal")]
    EmptyPlan {
        /// The shared start/goal cell.
        position: Position,
    },
}

impl EpisodeError {
    /// Whether a dataset driver may discard the sample and draw another.
    ///
    /// Only properties of the sampled problem are recoverable; malformed
    /// paths and observation failures indicate a broken collaborator.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoPathFound { .. } | Self::TrajectoryOverflow { .. } | Self::EmptyPlan { .. }
        )
    }
}
