//! Observation policies and the per-episode [`Observer`].

use crate::channel::Channel;
use crate::compose::{check_bounds, masked_state};
use pathset_core::{ObsError, Position};
use pathset_space::{Grid, RegionMask, Viewport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Which cells the agent sees at each timestep of an episode.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObservationPolicy {
    /// The viewport around the current position.
    #[default]
    Local,
    /// The whole grid, regardless of viewport.
    Total,
    /// The viewport around the first observed position, frozen.
    AtStart,
    /// Every cell seen so far in the episode.
    Cumulative,
    /// The viewport around the current position with probability
    /// `visible_probability`, otherwise nothing.
    Flickering {
        /// Chance in `[0, 1]` that a frame shows the viewport.
        visible_probability: f64,
    },
}

impl ObservationPolicy {
    /// Check policy parameters.
    pub fn validate(&self) -> Result<(), ObsError> {
        match *self {
            Self::Flickering {
                visible_probability: p,
            } if !(0.0..=1.0).contains(&p) => Err(ObsError::InvalidPolicy {
                reason: format!("visible_probability must be in [0, 1], got {p}"),
            }),
            _ => Ok(()),
        }
    }
}

/// Stateful observation source for one episode.
///
/// Every policy goes through the same two steps: compute a
/// [`RegionMask`] for the current position, then copy the visible part
/// of the grid. `AtStart` and `Cumulative` keep a mask between calls;
/// `Flickering` draws from a ChaCha8 stream seeded at construction, so
/// an observer rebuilt with the same seed replays the same frames.
///
/// An observer is bound to one grid shape for its whole life; create a
/// new one per episode.
///
/// # Examples
///
/// ```
/// use pathset_core::Position;
/// use pathset_obs::{ObservationPolicy, Observer, UNSEEN};
/// use pathset_space::{Grid, Viewport};
///
/// let grid = Grid::new(9, 9).unwrap();
/// let mut obs = Observer::new(ObservationPolicy::Cumulative, Viewport::default(), 0).unwrap();
///
/// let first = obs.observe(&grid, Position::new(0, 0)).unwrap();
/// let second = obs.observe(&grid, Position::new(0, 5)).unwrap();
/// assert_eq!(first.count(UNSEEN), 81 - 9);
/// assert_eq!(second.count(UNSEEN), 81 - 3 * 8);
/// ```
#[derive(Clone, Debug)]
pub struct Observer {
    policy: ObservationPolicy,
    viewport: Viewport,
    memory: Option<RegionMask>,
    rng: ChaCha8Rng,
}

impl Observer {
    /// Create an observer. Fails if the policy's parameters are invalid.
    pub fn new(policy: ObservationPolicy, viewport: Viewport, seed: u64) -> Result<Self, ObsError> {
        policy.validate()?;
        Ok(Self {
            policy,
            viewport,
            memory: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// The configured policy.
    pub fn policy(&self) -> ObservationPolicy {
        self.policy
    }

    /// The configured viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Observe `grid` from `position`, advancing any per-episode state.
    ///
    /// # Errors
    ///
    /// Returns [`ObsError::OutOfBounds`] if `position` is outside the grid,
    /// or [`ObsError::ShapeMismatch`] if `grid` differs in shape from the
    /// grid of an earlier call.
    pub fn observe(&mut self, grid: &Grid, position: Position) -> Result<Channel, ObsError> {
        check_bounds(grid, position)?;
        if let Some(memory) = &self.memory {
            if memory.shape() != grid.shape() {
                return Err(ObsError::ShapeMismatch {
                    expected: memory.shape(),
                    actual: grid.shape(),
                });
            }
        }
        let mask = self.mask(grid, position);
        Ok(masked_state(grid, &mask))
    }

    fn mask(&mut self, grid: &Grid, position: Position) -> RegionMask {
        let (rows, cols) = grid.shape();
        let viewport = self.viewport;
        match self.policy {
            ObservationPolicy::Local => RegionMask::around(rows, cols, position, &viewport),
            ObservationPolicy::Total => RegionMask::full(rows, cols),
            ObservationPolicy::AtStart => self
                .memory
                .get_or_insert_with(|| RegionMask::around(rows, cols, position, &viewport))
                .clone(),
            ObservationPolicy::Cumulative => {
                let window = RegionMask::around(rows, cols, position, &viewport);
                let seen = self
                    .memory
                    .get_or_insert_with(|| RegionMask::empty(rows, cols));
                seen.union_with(&window);
                seen.clone()
            }
            ObservationPolicy::Flickering {
                visible_probability,
            } => {
                if self.rng.random_bool(visible_probability) {
                    RegionMask::around(rows, cols, position, &viewport)
                } else {
                    RegionMask::empty(rows, cols)
                }
            }
        }
    }
}
