//! World sampling for pathset: where grids, starts and goals come from,
//! and how the optimal route between them is found.
//!
//! Two trait seams decouple the episode pipeline from these concerns:
//!
//! - [`GridGenerator`] draws a [`Sample`] (grid, start, goal) from an RNG;
//!   [`RandomGridGenerator`] is the reference implementation with free,
//!   obstacle and maze layouts.
//! - [`PathOracle`] returns a shortest 4-connected path, or `None` when
//!   the goal is unreachable; [`AStarOracle`] and [`BfsOracle`] are
//!   provided.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod maze;
pub mod oracle;

pub use error::WorldError;
pub use generator::{GridGenerator, GridKind, RandomGridGenerator, RandomGridGeneratorBuilder, Sample};
pub use oracle::{AStarOracle, BfsOracle, PathOracle};
