//! pathset: fixed-length, partially observable navigation episodes built
//! from grid worlds.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all pathset sub-crates. For most users, adding `pathset` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pathset::prelude::*;
//!
//! let config = DatasetConfig::builder()
//!     .shape(9, 9)
//!     .grid_kind(GridKind::Obstacle)
//!     .episode(EpisodeConfig::builder().timesteps(32).build().unwrap())
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let driver = DatasetDriver::from_config(config).unwrap();
//! let dataset = driver.generate(8).unwrap();
//!
//! for episode in &dataset {
//!     assert_eq!(episode.len(), 32);
//!     let (frames, labels) = episode.clone().into_parts();
//!     assert_eq!(frames[0].shape(), [9, 9, 2]);
//!     assert!(labels.iter().all(|a| a.0 <= 4));
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pathset-core` | Positions, actions, movement vocabulary, error types |
//! | [`space`] | `pathset-space` | Grids, viewports and region masks |
//! | [`obs`] | `pathset-obs` | Channels, frames, goal encoding, observation policies |
//! | [`world`] | `pathset-world` | Grid generators and shortest-path oracles |
//! | [`episode`] | `pathset-episode` | Action planning, episode synthesis, dataset driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`pathset-core`).
///
/// [`types::Position`], [`types::Action`], the
/// [`types::MovementVocabulary`] and the per-stage error enums.
pub use pathset_core as types;

/// Grids and visibility (`pathset-space`).
///
/// [`space::Grid`] plus [`space::Viewport`] and [`space::RegionMask`].
pub use pathset_space as space;

/// Observation composition (`pathset-obs`).
///
/// [`obs::observe`], [`obs::encode_goal`], the [`obs::Frame`] tensor and
/// the stateful [`obs::Observer`].
pub use pathset_obs as obs;

/// World sampling (`pathset-world`).
///
/// The [`world::GridGenerator`] and [`world::PathOracle`] seams with their
/// reference implementations.
pub use pathset_world as world;

/// Episode synthesis (`pathset-episode`).
///
/// [`episode::plan`], [`episode::EpisodeSynthesizer`] and
/// [`episode::DatasetDriver`].
pub use pathset_episode as episode;

/// Common imports for typical pathset usage.
///
/// ```rust
/// use pathset::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use pathset_core::{Action, Movement, MovementVocabulary, Position};

    // Errors
    pub use pathset_core::{EpisodeError, ObsError, PlanError, VocabularyError};
    pub use pathset_episode::{ConfigError, DatasetError};
    pub use pathset_world::WorldError;

    // Space
    pub use pathset_space::{Cell, Grid, Neighbourhood, Viewport, Visibility};

    // Observation
    pub use pathset_obs::{Channel, Frame, ObservationPolicy, Observer};

    // World
    pub use pathset_world::{AStarOracle, GridGenerator, GridKind, PathOracle, RandomGridGenerator};

    // Episode
    pub use pathset_episode::{
        Dataset, DatasetConfig, DatasetDriver, DatasetStats, EmptyPlanPolicy, Episode,
        EpisodeConfig, EpisodeSynthesizer, OverflowPolicy, Step,
    };
}
