//! Conversion of shortest paths into action plans.

use pathset_core::{Action, Movement, MovementVocabulary, PlanError, Position, VocabularyError};
use pathset_space::Grid;

/// The action labels an optimal agent takes along a path.
///
/// Holds `len(path) - 1` actions; action `t` moves the agent from
/// `path[t]` to `path[t + 1]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ActionPlan {
    actions: Vec<Action>,
}

impl ActionPlan {
    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the plan has no actions (start equals goal).
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The actions in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Action at step `t`.
    pub fn get(&self, t: usize) -> Option<Action> {
        self.actions.get(t).copied()
    }

    /// Final action, if any.
    pub fn last(&self) -> Option<Action> {
        self.actions.last().copied()
    }

    /// Iterate over the actions.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    /// Positions visited when executing the plan from `start`, `start`
    /// included.
    ///
    /// For a plan built from `path`, `plan.replay(vocab, path[0])`
    /// returns `path`.
    pub fn replay(
        &self,
        vocab: &MovementVocabulary,
        start: Position,
    ) -> Result<Vec<Position>, VocabularyError> {
        let mut positions = Vec::with_capacity(self.actions.len() + 1);
        let mut pos = start;
        positions.push(pos);
        for &action in &self.actions {
            pos = vocab.movement_of(action)?.apply(pos);
            positions.push(pos);
        }
        Ok(positions)
    }

    /// Consume the plan, returning its actions.
    pub fn into_vec(self) -> Vec<Action> {
        self.actions
    }
}

impl<'a> IntoIterator for &'a ActionPlan {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Label every step of `path` with its action.
///
/// # Errors
///
/// - [`PlanError::EmptyPath`] if `path` has no positions.
/// - [`PlanError::MalformedPath`] if two consecutive positions are not one
///   unit movement apart.
///
/// # Examples
///
/// ```
/// use pathset_core::{Action, MovementVocabulary, Position};
/// use pathset_episode::plan;
///
/// let vocab = MovementVocabulary::canonical();
/// let path = [Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)];
/// let actions = plan(&vocab, &path).unwrap();
///
/// // south, then east
/// assert_eq!(actions.actions(), &[Action(1), Action(3)]);
/// ```
pub fn plan(vocab: &MovementVocabulary, path: &[Position]) -> Result<ActionPlan, PlanError> {
    if path.is_empty() {
        return Err(PlanError::EmptyPath);
    }
    let actions = path
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, to) = (pair[0], pair[1]);
            vocab
                .action_of(Movement::between(from, to))
                .map_err(|_| PlanError::MalformedPath {
                    index,
                    reason: format!("{from} -> {to} is not a unit movement"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ActionPlan { actions })
}

/// [`plan`], after checking that every position of `path` is a free
/// cell of `grid`.
///
/// # Errors
///
/// Additionally returns [`PlanError::OutOfBounds`] for a position outside
/// the grid and [`PlanError::MalformedPath`] for one on a wall.
pub fn plan_in(
    vocab: &MovementVocabulary,
    grid: &Grid,
    path: &[Position],
) -> Result<ActionPlan, PlanError> {
    for (index, &position) in path.iter().enumerate() {
        if !grid.in_bounds(position) {
            return Err(PlanError::OutOfBounds {
                index,
                position,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        if !grid.is_free(position) {
            return Err(PlanError::MalformedPath {
                index,
                reason: format!("{position} is a wall"),
            });
        }
    }
    plan(vocab, path)
}
