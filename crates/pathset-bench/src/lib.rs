//! Benchmark profiles and utilities for pathset.
//!
//! Provides pre-built [`DatasetConfig`] profiles for benchmarking and
//! examples:
//!
//! - [`reference_profile`]: 9x9 obstacle grids, 10 timesteps (the classic
//!   dataset shape)
//! - [`stress_profile`]: 63x63 mazes, 128 timesteps with truncation
//! - [`sample_problem`]: one deterministic grid, path and goal

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pathset_core::Position;
use pathset_episode::{DatasetConfig, EpisodeConfig, OverflowPolicy};
use pathset_space::Grid;
use pathset_world::{AStarOracle, GridGenerator, GridKind, PathOracle, RandomGridGenerator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// 9x9 obstacle grids at density 0.2, default episode settings.
pub fn reference_profile(seed: u64) -> DatasetConfig {
    DatasetConfig {
        rows: 9,
        cols: 9,
        grid_kind: GridKind::Obstacle,
        seed,
        ..DatasetConfig::default()
    }
}

/// 63x63 mazes with 128-step episodes; long paths are truncated.
pub fn stress_profile(seed: u64) -> DatasetConfig {
    DatasetConfig {
        rows: 63,
        cols: 63,
        grid_kind: GridKind::Maze,
        episode: EpisodeConfig {
            timesteps: 128,
            overflow: OverflowPolicy::Truncate,
            ..EpisodeConfig::default()
        },
        seed,
        ..DatasetConfig::default()
    }
}

/// A reachable problem on a `rows x cols` grid of `kind`: the grid, its
/// A* path and the goal.
///
/// Draws from a ChaCha8 stream seeded with `seed` until a connected
/// sample appears.
pub fn sample_problem(kind: GridKind, rows: u32, cols: u32, seed: u64) -> (Grid, Vec<Position>, Position) {
    let generator = RandomGridGenerator::new(kind);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    loop {
        let sample = generator
            .sample(rows, cols, &mut rng)
            .expect("benchmark shapes have room for a start and a goal");
        if let Some(path) = AStarOracle.shortest_path(&sample.grid, sample.start, sample.goal) {
            return (sample.grid, path, sample.goal);
        }
    }
}
