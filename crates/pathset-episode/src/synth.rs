//! Episode synthesis: path in, fixed-length sequence of steps out.
//!
//! [`Steps`] is a finite iterator driven by a three-state [`Phase`]
//! machine:
//!
//! ```text
//!   Running ──(plan exhausted)──▶ Padding ──(t == timesteps)──▶ Done
//!      └──────────────(t == timesteps)──────────────────────────▲
//! ```
//!
//! While running, step `t` observes the grid from `path[t]` and is
//! labelled with `plan[t]`. While padding, the last running step is
//! repeated unchanged. The iterator yields exactly `timesteps` items
//! unless composing a frame fails, in which case it yields that error and
//! stops.

use crate::config::{ConfigError, EmptyPlanPolicy, EpisodeConfig, OverflowPolicy};
use crate::episode::{Episode, Step};
use crate::plan::{plan_in, ActionPlan};
use pathset_core::{Action, EpisodeError, MovementVocabulary, ObsError, Position};
use pathset_obs::{encode_goal, mark_agent, Channel, Frame, Observer};
use pathset_space::Grid;
use std::iter::FusedIterator;

/// Where a [`Steps`] iterator is in its episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Emitting steps along the path.
    Running,
    /// Repeating the last step up to the episode length.
    Padding,
    /// All steps emitted.
    Done,
}

/// Builds [`Episode`]s from paths under one [`EpisodeConfig`].
///
/// # Examples
///
/// ```
/// use pathset_core::{MovementVocabulary, Position};
/// use pathset_episode::{EpisodeConfig, EpisodeSynthesizer};
/// use pathset_space::Grid;
/// use pathset_world::{AStarOracle, PathOracle};
///
/// let vocab = MovementVocabulary::canonical();
/// let config = EpisodeConfig::default();
/// let synth = EpisodeSynthesizer::new(&vocab, &config).unwrap();
///
/// let grid = Grid::new(5, 5).unwrap();
/// let (start, goal) = (Position::new(0, 0), Position::new(4, 4));
/// let path = AStarOracle.shortest_path(&grid, start, goal).unwrap();
/// let episode = synth.synthesize(&grid, &path, goal, 0).unwrap();
///
/// assert_eq!(episode.len(), 10);
/// assert_eq!(episode.plan_len(), 8);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EpisodeSynthesizer<'a> {
    vocab: &'a MovementVocabulary,
    config: &'a EpisodeConfig,
}

impl<'a> EpisodeSynthesizer<'a> {
    /// Create a synthesizer. Fails if `config` does not validate.
    pub fn new(vocab: &'a MovementVocabulary, config: &'a EpisodeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { vocab, config })
    }

    /// The episode settings.
    pub fn config(&self) -> &EpisodeConfig {
        self.config
    }

    /// Prepare the step iterator for one episode.
    ///
    /// All checks that do not depend on observation happen here: the path
    /// is planned against the grid, the goal is encoded, and the empty-plan
    /// and overflow policies are applied. `seed` feeds the observer's RNG.
    ///
    /// # Errors
    ///
    /// - [`EpisodeError::Plan`] if the path is empty, not 4-connected, or
    ///   leaves the free cells of `grid`.
    /// - [`EpisodeError::Obs`] if `goal` is outside the grid.
    /// - [`EpisodeError::EmptyPlan`] if start equals goal under
    ///   [`EmptyPlanPolicy::Reject`].
    /// - [`EpisodeError::TrajectoryOverflow`] if the plan is longer than
    ///   the episode under [`OverflowPolicy::Reject`].
    pub fn steps<'g>(
        &self,
        grid: &'g Grid,
        path: &'g [Position],
        goal: Position,
        seed: u64,
    ) -> Result<Steps<'g>, EpisodeError> {
        let plan = plan_in(self.vocab, grid, path)?;
        let goal_channel = encode_goal(grid.rows(), grid.cols(), goal)?;
        let timesteps = self.config.timesteps;

        let running_len = if plan.is_empty() {
            match self.config.empty_plan {
                EmptyPlanPolicy::Stay => 1,
                EmptyPlanPolicy::Reject => {
                    return Err(EpisodeError::EmptyPlan { position: path[0] })
                }
            }
        } else if plan.len() > timesteps {
            match self.config.overflow {
                OverflowPolicy::Truncate => timesteps,
                OverflowPolicy::Reject => {
                    return Err(EpisodeError::TrajectoryOverflow {
                        plan_len: plan.len(),
                        timesteps,
                    })
                }
            }
        } else {
            plan.len()
        };

        let observer = Observer::new(self.config.policy, self.config.viewport(), seed)?;
        Ok(Steps {
            grid,
            path,
            plan,
            goal_channel,
            observer,
            timesteps,
            running_len,
            t: 0,
            last: None,
            phase: Phase::Running,
        })
    }

    /// Synthesize a complete episode.
    ///
    /// Either every step is produced or an error is returned; a partial
    /// episode is never observable.
    pub fn synthesize(
        &self,
        grid: &Grid,
        path: &[Position],
        goal: Position,
        seed: u64,
    ) -> Result<Episode, EpisodeError> {
        let steps = self.steps(grid, path, goal, seed)?;
        let plan_len = steps.plan_len();
        let steps = steps.collect::<Result<Vec<_>, _>>()?;
        if steps.len() != self.config.timesteps {
            return Err(EpisodeError::Incomplete {
                produced: steps.len(),
                timesteps: self.config.timesteps,
            });
        }
        Ok(Episode::new(steps, plan_len))
    }
}

/// Iterator over the steps of one episode. See the [module docs](self).
#[derive(Debug)]
pub struct Steps<'g> {
    grid: &'g Grid,
    path: &'g [Position],
    plan: ActionPlan,
    goal_channel: Channel,
    observer: Observer,
    timesteps: usize,
    running_len: usize,
    t: usize,
    last: Option<Step>,
    phase: Phase,
}

impl Steps<'_> {
    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The planned actions.
    pub fn plan(&self) -> &ActionPlan {
        &self.plan
    }

    /// Number of steps that will come from the path rather than padding.
    /// Zero when start equals goal.
    pub fn plan_len(&self) -> usize {
        self.plan.len().min(self.timesteps)
    }

    fn compose(&mut self, position: Position) -> Result<Frame, ObsError> {
        let state = self.observer.observe(self.grid, position)?;
        let state = mark_agent(&state, position)?;
        Frame::stack(&state, &self.goal_channel)
    }

    fn advance(&mut self) {
        self.t += 1;
        self.phase = if self.t >= self.timesteps {
            Phase::Done
        } else if self.t >= self.running_len {
            Phase::Padding
        } else {
            Phase::Running
        };
    }
}

impl Iterator for Steps<'_> {
    type Item = Result<Step, EpisodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.phase {
            Phase::Done => return None,
            Phase::Running => {
                let position = self.path[self.t];
                let action = self.plan.get(self.t).unwrap_or(Action::STAY);
                match self.compose(position) {
                    Ok(frame) => {
                        let step = Step { frame, action };
                        self.last = Some(step.clone());
                        step
                    }
                    Err(e) => {
                        self.phase = Phase::Done;
                        return Some(Err(e.into()));
                    }
                }
            }
            Phase::Padding => match self.last.clone() {
                Some(step) => step,
                None => {
                    self.phase = Phase::Done;
                    return Some(Err(EpisodeError::Incomplete {
                        produced: self.t,
                        timesteps: self.timesteps,
                    }));
                }
            },
        };
        self.advance();
        Some(Ok(step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            Phase::Done => (0, Some(0)),
            _ => (0, Some(self.timesteps - self.t)),
        }
    }
}

impl FusedIterator for Steps<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pathset_obs::{AGENT, GOAL, UNSEEN};
    use pathset_space::{Neighbourhood, Viewport, Visibility};
    use pathset_test_utils::{grid, path};
    use proptest::prelude::*;

    fn vocab() -> MovementVocabulary {
        MovementVocabulary::canonical()
    }

    fn config(timesteps: usize) -> EpisodeConfig {
        EpisodeConfig::builder().timesteps(timesteps).build().unwrap()
    }

    fn row_path(len: i32) -> Vec<Position> {
        (0..len).map(|c| Position::new(0, c)).collect()
    }

    // ── Phases ──────────────────────────────────────────────────

    #[test]
    fn phases_progress_in_order() {
        let v = vocab();
        let cfg = config(4);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 5).unwrap();
        let p = row_path(3);
        let mut steps = synth.steps(&g, &p, Position::new(0, 2), 0).unwrap();

        let mut phases = vec![steps.phase()];
        while steps.next().is_some() {
            phases.push(steps.phase());
        }
        assert_eq!(
            phases,
            [
                Phase::Running,
                Phase::Running,
                Phase::Padding,
                Phase::Padding,
                Phase::Done
            ]
        );
        assert!(steps.next().is_none());
    }

    #[test]
    fn padding_repeats_last_step() {
        let v = vocab();
        let cfg = config(6);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 5).unwrap();
        let ep = synth
            .synthesize(&g, &row_path(4), Position::new(0, 3), 0)
            .unwrap();
        assert_eq!(ep.len(), 6);
        assert_eq!(ep.plan_len(), 3);
        assert_eq!(ep.padding_len(), 3);
        for t in 3..6 {
            assert_eq!(ep.steps()[t], ep.steps()[2]);
        }
        assert_eq!(ep.actions(), vec![Action(3); 6]);
    }

    #[test]
    fn exact_fit_has_no_padding() {
        let v = vocab();
        let cfg = config(4);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 5).unwrap();
        let ep = synth
            .synthesize(&g, &row_path(5), Position::new(0, 4), 0)
            .unwrap();
        assert_eq!(ep.len(), 4);
        assert_eq!(ep.padding_len(), 0);
    }

    #[test]
    fn padding_without_running_step_is_an_error() {
        let v = vocab();
        let cfg = config(3);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 3).unwrap();
        let p = row_path(2);
        let mut steps = synth.steps(&g, &p, Position::new(0, 1), 0).unwrap();
        steps.phase = Phase::Padding;

        assert_eq!(
            steps.next(),
            Some(Err(EpisodeError::Incomplete {
                produced: 0,
                timesteps: 3
            }))
        );
        assert_eq!(steps.phase(), Phase::Done);
        assert!(steps.next().is_none());
        assert!(!EpisodeError::Incomplete {
            produced: 0,
            timesteps: 3
        }
        .is_recoverable());
    }

    // ── Empty plan ──────────────────────────────────────────────

    #[test]
    fn empty_plan_stays() {
        let v = vocab();
        let cfg = config(5);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(3, 3).unwrap();
        let here = Position::new(1, 1);
        let ep = synth.synthesize(&g, &[here], here, 0).unwrap();
        assert_eq!(ep.len(), 5);
        assert_eq!(ep.plan_len(), 0);
        assert!(ep.actions().iter().all(|a| a.is_stay()));
        let frame = &ep.steps()[0].frame;
        // The goal marker and the agent marker share the start cell.
        assert_eq!(frame.get(here, Frame::STATE), Some(AGENT));
        assert_eq!(frame.get(here, Frame::GOAL), Some(GOAL));
        assert!(ep.frames().all(|f| f == frame));
    }

    #[test]
    fn empty_plan_rejected() {
        let v = vocab();
        let cfg = EpisodeConfig::builder()
            .empty_plan(EmptyPlanPolicy::Reject)
            .build()
            .unwrap();
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(3, 3).unwrap();
        let here = Position::new(2, 0);
        assert_eq!(
            synth.synthesize(&g, &[here], here, 0),
            Err(EpisodeError::EmptyPlan { position: here })
        );
    }

    // ── Overflow ────────────────────────────────────────────────

    #[test]
    fn overflow_rejected_by_default() {
        let v = vocab();
        let cfg = config(3);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 6).unwrap();
        assert_eq!(
            synth.synthesize(&g, &row_path(6), Position::new(0, 5), 0),
            Err(EpisodeError::TrajectoryOverflow {
                plan_len: 5,
                timesteps: 3
            })
        );
    }

    #[test]
    fn overflow_truncated() {
        let v = vocab();
        let cfg = EpisodeConfig::builder()
            .timesteps(3)
            .overflow(OverflowPolicy::Truncate)
            .build()
            .unwrap();
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 6).unwrap();
        let ep = synth
            .synthesize(&g, &row_path(6), Position::new(0, 5), 0)
            .unwrap();
        assert_eq!(ep.len(), 3);
        assert_eq!(ep.plan_len(), 3);
        assert_eq!(
            ep.steps()[2].frame.get(Position::new(0, 2), Frame::STATE),
            Some(AGENT)
        );
    }

    // ── Failures ────────────────────────────────────────────────

    #[test]
    fn goal_outside_grid() {
        let v = vocab();
        let cfg = config(3);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(2, 2).unwrap();
        let err = synth
            .synthesize(&g, &path(&[(0, 0), (0, 1)]), Position::new(5, 5), 0)
            .unwrap_err();
        assert!(matches!(err, EpisodeError::Obs(ObsError::OutOfBounds { .. })));
    }

    #[test]
    fn path_through_wall() {
        let v = vocab();
        let cfg = config(3);
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = grid(".#.");
        let err = synth
            .synthesize(&g, &path(&[(0, 0), (0, 1), (0, 2)]), Position::new(0, 2), 0)
            .unwrap_err();
        assert!(matches!(err, EpisodeError::Plan(_)));
    }

    #[test]
    fn invalid_config_rejected() {
        let v = vocab();
        let cfg = EpisodeConfig {
            timesteps: 0,
            ..EpisodeConfig::default()
        };
        assert!(EpisodeSynthesizer::new(&v, &cfg).is_err());
    }

    // ── Observation ─────────────────────────────────────────────

    #[test]
    fn at_start_policy_keeps_start_window() {
        let v = vocab();
        let cfg = EpisodeConfig::builder()
            .timesteps(5)
            .visibility(Visibility::Radius(0))
            .policy(pathset_obs::ObservationPolicy::AtStart)
            .build()
            .unwrap();
        let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
        let g = Grid::new(1, 5).unwrap();
        let ep = synth
            .synthesize(&g, &row_path(5), Position::new(0, 4), 0)
            .unwrap();
        let last = &ep.steps()[3].frame;
        // Only the start cell was ever revealed; the agent is marked anyway.
        assert_eq!(last.get(Position::new(0, 0), Frame::STATE), Some(0));
        assert_eq!(last.get(Position::new(0, 3), Frame::STATE), Some(AGENT));
        assert_eq!(last.get(Position::new(0, 4), Frame::STATE), Some(UNSEEN));
    }

    fn arb_walk() -> impl Strategy<Value = (u32, Vec<Position>)> {
        (2u32..9, proptest::collection::vec(0usize..4, 0..30)).prop_map(|(size, steps)| {
            let bound = size as i32 - 1;
            let mut pos = Position::new(bound / 2, bound / 2);
            let mut walk = vec![pos];
            for s in steps {
                let next = pathset_core::Movement::CANONICAL[s].apply(pos);
                if next.row >= 0 && next.col >= 0 && next.row <= bound && next.col <= bound {
                    pos = next;
                    walk.push(pos);
                }
            }
            (size, walk)
        })
    }

    proptest! {
        #[test]
        fn episode_invariants(
            (size, walk) in arb_walk(),
            timesteps in 1usize..20,
            radius in 0u32..4,
            manhattan in any::<bool>(),
        ) {
            let v = vocab();
            let neighbourhood = if manhattan { Neighbourhood::Manhattan } else { Neighbourhood::Chebyshev };
            let cfg = EpisodeConfig::builder()
                .timesteps(timesteps)
                .visibility(Visibility::Radius(radius))
                .neighbourhood(neighbourhood)
                .overflow(OverflowPolicy::Truncate)
                .build()
                .unwrap();
            let synth = EpisodeSynthesizer::new(&v, &cfg).unwrap();
            let g = Grid::new(size, size).unwrap();
            let goal = *walk.last().unwrap();
            let ep = synth.synthesize(&g, &walk, goal, 0).unwrap();

            prop_assert_eq!(ep.len(), timesteps);
            prop_assert_eq!(ep.plan_len(), (walk.len() - 1).min(timesteps));

            let goal_channel = ep.steps()[0].frame.goal();
            let viewport = Viewport::new(Visibility::Radius(radius), neighbourhood);
            for (t, step) in ep.steps().iter().enumerate() {
                prop_assert_eq!(&step.frame.goal(), &goal_channel);
                let state = step.frame.state();
                prop_assert_eq!(state.count(AGENT), 1);
                let at = walk[t.min(ep.plan_len().max(1) - 1)];
                prop_assert_eq!(state.positions_of(AGENT), vec![at]);
                for cell in g.positions() {
                    if !viewport.contains(at, cell) {
                        prop_assert_eq!(state.get(cell), Some(UNSEEN));
                    }
                }
            }
        }
    }
}
