//! Episode and step types.

use pathset_core::Action;
use pathset_obs::Frame;

/// One timestep: what the agent sees and what it does next.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Observation at this timestep.
    pub frame: Frame,
    /// Action taken from this state.
    pub action: Action,
}

/// A fixed-length sequence of steps.
///
/// The first [`plan_len`](Episode::plan_len) steps follow the optimal
/// path; any remaining steps repeat the last of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Episode {
    steps: Vec<Step>,
    plan_len: usize,
}

impl Episode {
    pub(crate) fn new(steps: Vec<Step>, plan_len: usize) -> Self {
        debug_assert!(plan_len <= steps.len());
        Self { steps, plan_len }
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps, always equal to the configured `timesteps`.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the episode has no steps. Never true for a synthesized
    /// episode.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of leading steps taken from the optimal path.
    pub fn plan_len(&self) -> usize {
        self.plan_len
    }

    /// Number of trailing padding steps.
    pub fn padding_len(&self) -> usize {
        self.steps.len() - self.plan_len
    }

    /// Observation frames in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &Frame> + '_ {
        self.steps.iter().map(|s| &s.frame)
    }

    /// Action labels in order.
    pub fn actions(&self) -> Vec<Action> {
        self.steps.iter().map(|s| s.action).collect()
    }

    /// Split into parallel image and label sequences.
    pub fn into_parts(self) -> (Vec<Frame>, Vec<Action>) {
        self.steps.into_iter().map(|s| (s.frame, s.action)).unzip()
    }
}
