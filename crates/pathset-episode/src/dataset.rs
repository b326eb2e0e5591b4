//! Dataset generation: many sampled problems, one episode each.
//!
//! Every episode index owns a ChaCha8 RNG seeded from
//! `(config.seed, index)`. Grid sampling, start/goal selection and any
//! observation randomness all draw from it, so episode `i` is the same
//! whether it is generated alone, serially, or on any worker of
//! [`DatasetDriver::generate_parallel`].
//!
//! Samples that cannot become an episode (no path, plan too long, start
//! already at goal under a rejecting policy) are discarded and redrawn
//! from the same RNG, up to `config.max_attempts` times.

use crate::config::{ConfigError, DatasetConfig};
use crate::episode::Episode;
use crate::synth::EpisodeSynthesizer;
use pathset_core::{EpisodeError, MovementVocabulary};
use pathset_world::{AStarOracle, GridGenerator, PathOracle, RandomGridGenerator, WorldError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors from dataset generation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DatasetError {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The grid generator failed.
    #[error("episode {index}: grid generation failed")]
    World {
        /// Episode index.
        index: usize,
        /// Underlying failure.
        source: WorldError,
    },
    /// Synthesis failed in a way resampling cannot fix.
    #[error("episode {index}: synthesis failed")]
    Episode {
        /// Episode index.
        index: usize,
        /// Underlying failure.
        source: EpisodeError,
    },
    /// Every sample drawn for an episode was rejected.
    #[error("episode {index}: all {attempts} samples rejected")]
    RetriesExhausted {
        /// Episode index.
        index: usize,
        /// Samples drawn.
        attempts: u32,
        /// Reason the final sample was rejected.
        #[source]
        last: EpisodeError,
    },
    /// A parallel worker thread panicked.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Worker number.
        worker: usize,
    },
    /// A parallel run finished without producing an episode.
    #[error("episode {index} was never produced")]
    MissingEpisode {
        /// Episode index.
        index: usize,
    },
}

/// Sampling counters for a generated dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Episodes produced.
    pub episodes: usize,
    /// Samples drawn from the generator, accepted or not.
    pub samples: usize,
    /// Samples rejected because the goal was unreachable.
    pub no_path: usize,
    /// Samples rejected because the plan did not fit the episode.
    pub overflow: usize,
    /// Samples rejected because start equalled goal.
    pub empty_plan: usize,
}

impl DatasetStats {
    /// Total rejected samples.
    pub fn rejected(&self) -> usize {
        self.no_path + self.overflow + self.empty_plan
    }

    /// Add another set of counters into this one.
    pub fn merge(&mut self, other: &DatasetStats) {
        self.episodes += other.episodes;
        self.samples += other.samples;
        self.no_path += other.no_path;
        self.overflow += other.overflow;
        self.empty_plan += other.empty_plan;
    }

    fn record_rejection(&mut self, err: &EpisodeError) {
        match err {
            EpisodeError::NoPathFound { .. } => self.no_path += 1,
            EpisodeError::TrajectoryOverflow { .. } => self.overflow += 1,
            EpisodeError::EmptyPlan { .. } => self.empty_plan += 1,
            _ => {}
        }
    }
}

/// An ordered collection of episodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dataset {
    episodes: Vec<Episode>,
    stats: DatasetStats,
}

impl Dataset {
    /// Episodes, in index order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Sampling counters.
    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }

    /// Number of episodes.
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the dataset has no episodes.
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Iterate over the episodes.
    pub fn iter(&self) -> std::slice::Iter<'_, Episode> {
        self.episodes.iter()
    }

    /// Consume the dataset.
    pub fn into_parts(self) -> (Vec<Episode>, DatasetStats) {
        (self.episodes, self.stats)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Episode;
    type IntoIter = std::slice::Iter<'a, Episode>;

    fn into_iter(self) -> Self::IntoIter {
        self.episodes.iter()
    }
}

/// Generates datasets from a grid generator and a path oracle.
///
/// # Examples
///
/// ```
/// use pathset_episode::{DatasetConfig, DatasetDriver};
///
/// let config = DatasetConfig::builder().shape(5, 5).seed(3).build().unwrap();
/// let driver = DatasetDriver::from_config(config).unwrap();
///
/// let dataset = driver.generate(4).unwrap();
/// assert_eq!(dataset.len(), 4);
/// assert!(dataset.iter().all(|ep| ep.len() == 10));
/// ```
pub struct DatasetDriver {
    vocab: MovementVocabulary,
    config: DatasetConfig,
    generator: Box<dyn GridGenerator>,
    oracle: Box<dyn PathOracle>,
}

impl DatasetDriver {
    /// Create a driver. Fails if `config` does not validate.
    pub fn new(
        vocab: MovementVocabulary,
        config: DatasetConfig,
        generator: impl GridGenerator + 'static,
        oracle: impl PathOracle + 'static,
    ) -> Result<Self, DatasetError> {
        config.validate()?;
        Ok(Self {
            vocab,
            config,
            generator: Box::new(generator),
            oracle: Box::new(oracle),
        })
    }

    /// A driver using the canonical vocabulary, a [`RandomGridGenerator`]
    /// built from `config.grid_kind` and `config.obstacle_density`, and
    /// the [`AStarOracle`].
    pub fn from_config(config: DatasetConfig) -> Result<Self, DatasetError> {
        let generator = RandomGridGenerator::builder()
            .kind(config.grid_kind)
            .obstacle_density(config.obstacle_density)
            .build()
            .map_err(|e| ConfigError::InvalidPolicy {
                reason: e.to_string(),
            })?;
        Self::new(
            MovementVocabulary::canonical(),
            config,
            generator,
            AStarOracle,
        )
    }

    /// The dataset settings.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The movement vocabulary used to label actions.
    pub fn vocabulary(&self) -> &MovementVocabulary {
        &self.vocab
    }

    /// Seed of the RNG owned by episode `index`.
    pub fn episode_seed(&self, index: usize) -> u64 {
        split_mix(self.config.seed, index as u64)
    }

    /// Generate episode `index` on its own.
    ///
    /// Produces the same episode as position `index` of
    /// [`generate`](Self::generate).
    pub fn generate_episode(&self, index: usize) -> Result<Episode, DatasetError> {
        self.run_episode(index).map(|(episode, _)| episode)
    }

    /// Generate `count` episodes on the calling thread.
    ///
    /// Stops at the first episode that fails.
    pub fn generate(&self, count: usize) -> Result<Dataset, DatasetError> {
        let mut episodes = Vec::with_capacity(count);
        let mut stats = DatasetStats::default();
        for index in 0..count {
            let (episode, episode_stats) = self.run_episode(index)?;
            stats.merge(&episode_stats);
            episodes.push(episode);
        }
        info!(
            episodes = stats.episodes,
            samples = stats.samples,
            rejected = stats.rejected(),
            "dataset generated"
        );
        Ok(Dataset { episodes, stats })
    }

    /// Generate `count` episodes on `workers` scoped threads.
    ///
    /// The result is identical to [`generate`](Self::generate): episodes
    /// are ordered by index, and on failure the error of the lowest
    /// failing index is returned. `workers` is clamped to at least one.
    pub fn generate_parallel(&self, count: usize, workers: usize) -> Result<Dataset, DatasetError> {
        let workers = workers.clamp(1, count.max(1));
        let (task_tx, task_rx) = crossbeam_channel::unbounded::<usize>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        for index in 0..count {
            if task_tx.send(index).is_err() {
                break;
            }
        }
        drop(task_tx);

        // Lowest index known to fail; higher tasks are skipped.
        let fail_floor = AtomicUsize::new(usize::MAX);
        let mut slots: Vec<Option<Episode>> = (0..count).map(|_| None).collect();
        let mut stats = DatasetStats::default();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let task_rx = task_rx.clone();
                    let result_tx = result_tx.clone();
                    let fail_floor = &fail_floor;
                    scope.spawn(move || {
                        while let Ok(index) = task_rx.recv() {
                            if index > fail_floor.load(Ordering::Acquire) {
                                continue;
                            }
                            let result = self.run_episode(index);
                            if result.is_err() {
                                fail_floor.fetch_min(index, Ordering::AcqRel);
                            }
                            if result_tx.send((index, result)).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            drop(result_tx);

            let mut first_error: Option<(usize, DatasetError)> = None;
            for (index, result) in result_rx.iter() {
                match result {
                    Ok((episode, episode_stats)) => {
                        stats.merge(&episode_stats);
                        slots[index] = Some(episode);
                    }
                    Err(e) => {
                        if first_error.as_ref().is_none_or(|(i, _)| index < *i) {
                            first_error = Some((index, e));
                        }
                    }
                }
            }

            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    return Err(DatasetError::WorkerPanicked { worker });
                }
            }
            match first_error {
                Some((_, e)) => Err(e),
                None => Ok(()),
            }
        })?;

        let episodes = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(DatasetError::MissingEpisode { index }))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            episodes = stats.episodes,
            samples = stats.samples,
            rejected = stats.rejected(),
            workers,
            "dataset generated"
        );
        Ok(Dataset { episodes, stats })
    }

    /// Sample until an episode is accepted or attempts run out.
    fn run_episode(&self, index: usize) -> Result<(Episode, DatasetStats), DatasetError> {
        let synth = EpisodeSynthesizer::new(&self.vocab, &self.config.episode)?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.episode_seed(index));
        let mut stats = DatasetStats::default();
        let mut last = None;

        for attempt in 1..=self.config.max_attempts {
            stats.samples += 1;
            let sample = self
                .generator
                .sample(self.config.rows, self.config.cols, &mut rng)
                .map_err(|source| DatasetError::World { index, source })?;

            let result = match self.oracle.shortest_path(&sample.grid, sample.start, sample.goal) {
                Some(path) => {
                    let obs_seed = rng.random::<u64>();
                    synth.synthesize(&sample.grid, &path, sample.goal, obs_seed)
                }
                None => Err(EpisodeError::NoPathFound {
                    start: sample.start,
                    goal: sample.goal,
                }),
            };

            match result {
                Ok(episode) => {
                    stats.episodes = 1;
                    trace!(index, attempt, plan_len = episode.plan_len(), "episode accepted");
                    return Ok((episode, stats));
                }
                Err(e) if e.is_recoverable() => {
                    debug!(index, attempt, reason = %e, "sample rejected");
                    stats.record_rejection(&e);
                    last = Some(e);
                }
                Err(source) => return Err(DatasetError::Episode { index, source }),
            }
        }

        match last {
            Some(last) => Err(DatasetError::RetriesExhausted {
                index,
                attempts: self.config.max_attempts,
                last,
            }),
            None => Err(ConfigError::ZeroMaxAttempts.into()),
        }
    }
}

/// SplitMix64 finalizer over `base + (index + 1) * golden`.
fn split_mix(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
