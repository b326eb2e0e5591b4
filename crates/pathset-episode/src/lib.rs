//! Episode synthesis for pathset.
//!
//! The pipeline turns a sampled navigation problem into a fixed-length
//! training episode:
//!
//! 1. [`plan`] converts a shortest path into an [`ActionPlan`] through the
//!    [`MovementVocabulary`](pathset_core::MovementVocabulary).
//! 2. [`EpisodeSynthesizer`] walks the path, composing one
//!    [`Frame`](pathset_obs::Frame) per timestep, and pads (or rejects)
//!    the trajectory to exactly [`EpisodeConfig::timesteps`] steps.
//! 3. [`DatasetDriver`] repeats this for many sampled problems, with one
//!    seeded RNG per episode so serial and parallel generation agree.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod episode;
pub mod plan;
pub mod synth;

pub use config::{
    ConfigError, DatasetConfig, DatasetConfigBuilder, EmptyPlanPolicy, EpisodeConfig,
    EpisodeConfigBuilder, OverflowPolicy,
};
pub use dataset::{Dataset, DatasetDriver, DatasetError, DatasetStats};
pub use episode::{Episode, Step};
pub use plan::{plan, plan_in, ActionPlan};
pub use synth::{EpisodeSynthesizer, Phase, Steps};
