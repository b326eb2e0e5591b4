//! Episode and dataset configuration.
//!
//! Both configs are plain serde structs with public fields, so they can be
//! loaded from any format an outer layer chooses. [`EpisodeConfig::validate`]
//! and [`DatasetConfig::validate`] check them before any work starts; the
//! builders call `validate` in `build()`.

use pathset_obs::ObservationPolicy;
use pathset_space::{Neighbourhood, Viewport, Visibility};
use pathset_world::{GridKind, RandomGridGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to emit when the start cell is already the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPlanPolicy {
    /// Hold the start frame for every timestep, labelled
    /// [`Action::STAY`](pathset_core::Action::STAY).
    #[default]
    Stay,
    /// Fail with [`EpisodeError::EmptyPlan`](pathset_core::EpisodeError::EmptyPlan).
    Reject,
}

/// What to do when the plan is longer than the episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail with
    /// [`EpisodeError::TrajectoryOverflow`](pathset_core::EpisodeError::TrajectoryOverflow).
    #[default]
    Reject,
    /// Keep the first `timesteps` steps.
    Truncate,
}

/// Errors detected while validating a configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Episodes must have at least one timestep.
    #[error("timesteps must be at least 1")]
    ZeroTimesteps,
    /// The driver must be allowed at least one sampling attempt.
    #[error("max_attempts must be at least 1")]
    ZeroMaxAttempts,
    /// Grid shape with a zero dimension.
    #[error("grid shape {rows}x{cols} has no cells")]
    EmptyShape {
        /// Configured rows.
        rows: u32,
        /// Configured columns.
        cols: u32,
    },
    /// Observation policy or world parameters out of range.
    #[error("invalid policy: {reason}")]
    InvalidPolicy {
        /// What went wrong.
        reason: String,
    },
}

/// Per-episode synthesis settings.
///
/// The defaults reproduce the classic setup: 10 timesteps, a 5x5 window
/// (Chebyshev radius 2) recomputed at every step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Number of steps in every episode.
    pub timesteps: usize,
    /// How far the agent sees.
    pub visibility: Visibility,
    /// Shape of the visible window.
    pub neighbourhood: Neighbourhood,
    /// Which cells are shown at each timestep.
    pub policy: ObservationPolicy,
    /// Handling of start == goal.
    pub empty_plan: EmptyPlanPolicy,
    /// Handling of plans longer than `timesteps`.
    pub overflow: OverflowPolicy,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            timesteps: 10,
            visibility: Visibility::default(),
            neighbourhood: Neighbourhood::default(),
            policy: ObservationPolicy::default(),
            empty_plan: EmptyPlanPolicy::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

impl EpisodeConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> EpisodeConfigBuilder {
        EpisodeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Visibility and neighbourhood as one [`Viewport`].
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.visibility, self.neighbourhood)
    }

    /// Check the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timesteps == 0 {
            return Err(ConfigError::ZeroTimesteps);
        }
        self.policy
            .validate()
            .map_err(|e| ConfigError::InvalidPolicy {
                reason: e.to_string(),
            })
    }
}

/// Builder for [`EpisodeConfig`].
#[derive(Clone, Debug)]
pub struct EpisodeConfigBuilder {
    config: EpisodeConfig,
}

impl EpisodeConfigBuilder {
    /// Episode length (default: 10).
    pub fn timesteps(mut self, timesteps: usize) -> Self {
        self.config.timesteps = timesteps;
        self
    }

    /// Sight radius (default: 2).
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.config.visibility = visibility;
        self
    }

    /// Window shape (default: Chebyshev).
    pub fn neighbourhood(mut self, neighbourhood: Neighbourhood) -> Self {
        self.config.neighbourhood = neighbourhood;
        self
    }

    /// Observation policy (default: local).
    pub fn policy(mut self, policy: ObservationPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Empty-plan policy (default: stay).
    pub fn empty_plan(mut self, empty_plan: EmptyPlanPolicy) -> Self {
        self.config.empty_plan = empty_plan;
        self
    }

    /// Overflow policy (default: reject).
    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.config.overflow = overflow;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<EpisodeConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Dataset generation settings.
///
/// # Examples
///
/// ```
/// use pathset_episode::DatasetConfig;
/// use pathset_world::GridKind;
///
/// let config = DatasetConfig::builder()
///     .shape(5, 5)
///     .grid_kind(GridKind::Maze)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.episode.timesteps, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Layout of the reference generator built by
    /// [`DatasetDriver::from_config`](crate::DatasetDriver::from_config).
    pub grid_kind: GridKind,
    /// Wall probability for [`GridKind::Obstacle`].
    pub obstacle_density: f64,
    /// Per-episode settings.
    pub episode: EpisodeConfig,
    /// Base seed; episode `i` derives its RNG from `(seed, i)`.
    pub seed: u64,
    /// Samples drawn per episode before giving up.
    pub max_attempts: u32,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            cols: 9,
            grid_kind: GridKind::default(),
            obstacle_density: RandomGridGenerator::DEFAULT_DENSITY,
            episode: EpisodeConfig::default(),
            seed: 0,
            max_attempts: 64,
        }
    }
}

impl DatasetConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> DatasetConfigBuilder {
        DatasetConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyShape {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(ConfigError::InvalidPolicy {
                reason: format!(
                    "obstacle_density must be in [0, 1], got {}",
                    self.obstacle_density
                ),
            });
        }
        self.episode.validate()
    }
}

/// Builder for [`DatasetConfig`].
#[derive(Clone, Debug)]
pub struct DatasetConfigBuilder {
    config: DatasetConfig,
}

impl DatasetConfigBuilder {
    /// Grid shape (default: 9x9).
    pub fn shape(mut self, rows: u32, cols: u32) -> Self {
        self.config.rows = rows;
        self.config.cols = cols;
        self
    }

    /// Grid layout (default: free).
    pub fn grid_kind(mut self, kind: GridKind) -> Self {
        self.config.grid_kind = kind;
        self
    }

    /// Obstacle density (default: 0.2).
    pub fn obstacle_density(mut self, density: f64) -> Self {
        self.config.obstacle_density = density;
        self
    }

    /// Per-episode settings.
    pub fn episode(mut self, episode: EpisodeConfig) -> Self {
        self.config.episode = episode;
        self
    }

    /// Base seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Sampling attempts per episode (default: 64).
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<DatasetConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
