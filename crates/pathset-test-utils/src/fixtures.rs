//! Reusable grids, samples and collaborators.
//!
//! - [`FixedGenerator`]: returns the same sample every call.
//! - [`ScriptedGenerator`]: returns a list of samples in order, then repeats
//!   the last one.
//! - [`NoPathOracle`]: never finds a path.
//! - [`FixedPathOracle`]: returns a stored path regardless of input.

use pathset_core::Position;
use pathset_space::Grid;
use pathset_world::{GridGenerator, PathOracle, Sample, WorldError};
use rand::RngCore;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Parse an ASCII grid (`#` wall, `.` free). Panics on malformed input.
pub fn grid(ascii: &str) -> Grid {
    Grid::parse(ascii).unwrap_or_else(|e| panic!("bad fixture grid: {e}"))
}

/// Build a path from `(row, col)` pairs.
pub fn path(cells: &[(i32, i32)]) -> Vec<Position> {
    cells.iter().copied().map(Position::from).collect()
}

/// A 3x5 sample whose start and goal are split by a wall column.
pub fn disconnected_sample() -> Sample {
    Sample {
        grid: grid(
            "
            ..#..
            ..#..
            ..#..
            ",
        ),
        start: Position::new(0, 0),
        goal: Position::new(2, 4),
    }
}

/// Always returns a clone of one sample, ignoring the requested shape.
#[derive(Clone, Debug)]
pub struct FixedGenerator {
    pub sample: Sample,
}

impl FixedGenerator {
    pub fn new(grid: Grid, start: Position, goal: Position) -> Self {
        Self {
            sample: Sample { grid, start, goal },
        }
    }
}

impl GridGenerator for FixedGenerator {
    fn sample(&self, _rows: u32, _cols: u32, _rng: &mut dyn RngCore) -> Result<Sample, WorldError> {
        Ok(self.sample.clone())
    }
}

/// Returns its samples in order, then keeps returning the last one.
///
/// Call order is shared across threads, so only use it with serial
/// generation.
#[derive(Debug)]
pub struct ScriptedGenerator {
    samples: Vec<Sample>,
    next: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(samples: Vec<Sample>) -> Self {
        assert!(!samples.is_empty(), "script needs at least one sample");
        Self {
            samples,
            next: AtomicUsize::new(0),
        }
    }

    /// Number of samples handed out so far.
    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl GridGenerator for ScriptedGenerator {
    fn sample(&self, _rows: u32, _cols: u32, _rng: &mut dyn RngCore) -> Result<Sample, WorldError> {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(self.samples[i.min(self.samples.len() - 1)].clone())
    }
}

/// An oracle that never finds a path.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPathOracle;

impl PathOracle for NoPathOracle {
    fn shortest_path(&self, _grid: &Grid, _start: Position, _goal: Position) -> Option<Vec<Position>> {
        None
    }
}

/// An oracle that returns the same path for every query.
#[derive(Clone, Debug)]
pub struct FixedPathOracle {
    pub path: Vec<Position>,
}

impl PathOracle for FixedPathOracle {
    fn shortest_path(&self, _grid: &Grid, _start: Position, _goal: Position) -> Option<Vec<Position>> {
        Some(self.path.clone())
    }
}
