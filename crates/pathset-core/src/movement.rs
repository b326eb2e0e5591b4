//! Unit movements and the fixed movement/action bijection.
//!
//! The [`MovementVocabulary`] is the label space a dataset commits to:
//! it is built once, never mutated, and passed by reference into every
//! component that needs to translate between displacements and actions.

use crate::error::VocabularyError;
use crate::id::{Action, Position};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A displacement `(dr, dc)` between two grid cells.
///
/// Only the four unit displacements are members of a vocabulary; other
/// values can still be represented so that malformed paths can be
/// reported with the offending step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement {
    /// Row offset.
    pub dr: i32,
    /// Column offset.
    pub dc: i32,
}

impl Movement {
    /// One row up (row - 1).
    pub const NORTH: Movement = Movement { dr: -1, dc: 0 };
    /// One row down (row + 1).
    pub const SOUTH: Movement = Movement { dr: 1, dc: 0 };
    /// One column left (col - 1).
    pub const WEST: Movement = Movement { dr: 0, dc: -1 };
    /// One column right (col + 1).
    pub const EAST: Movement = Movement { dr: 0, dc: 1 };

    /// The canonical enumeration order: N, S, W, E.
    pub const CANONICAL: [Movement; 4] = [Self::NORTH, Self::SOUTH, Self::WEST, Self::EAST];

    /// Create a movement from its offsets.
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// Component-wise displacement `to - from`.
    ///
    /// Saturates instead of overflowing; a saturated displacement is never
    /// a unit movement, so lookups on it fail as expected.
    pub fn between(from: Position, to: Position) -> Self {
        Self {
            dr: to.row.saturating_sub(from.row),
            dc: to.col.saturating_sub(from.col),
        }
    }

    /// Whether this is one of the four 4-connected unit steps.
    pub fn is_unit(self) -> bool {
        matches!((self.dr, self.dc), (-1, 0) | (1, 0) | (0, -1) | (0, 1))
    }

    /// Apply the movement to `from`.
    pub fn apply(self, from: Position) -> Position {
        Position::new(
            from.row.saturating_add(self.dr),
            from.col.saturating_add(self.dc),
        )
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dr, self.dc)
    }
}

/// Fixed bijection between the four unit movements and actions `0..=3`.
///
/// The insertion order of the underlying set is the action id: the
/// movement at index `i` is labelled `Action(i)`.
///
/// # Examples
///
/// ```
/// use pathset_core::{Action, Movement, MovementVocabulary};
///
/// let vocab = MovementVocabulary::canonical();
/// assert_eq!(vocab.action_of(Movement::NORTH).unwrap(), Action(0));
/// assert_eq!(vocab.movement_of(Action(3)).unwrap(), Movement::EAST);
/// assert!(vocab.action_of(Movement::new(1, 1)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct MovementVocabulary {
    order: IndexSet<Movement>,
}

// `IndexSet` equality ignores order, and the order is the labelling.
impl PartialEq for MovementVocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.order.iter().eq(other.order.iter())
    }
}

impl Eq for MovementVocabulary {}

impl MovementVocabulary {
    /// Number of movement labels.
    pub const LEN: usize = 4;

    /// The canonical vocabulary: N=0, S=1, W=2, E=3.
    pub fn canonical() -> Self {
        Self {
            order: Movement::CANONICAL.into_iter().collect(),
        }
    }

    /// Build a vocabulary from a custom enumeration order.
    ///
    /// Every entry must be a unit movement and no movement may repeat, so
    /// the result always covers all four directions.
    pub fn from_order(order: [Movement; 4]) -> Result<Self, VocabularyError> {
        let mut set = IndexSet::with_capacity(Self::LEN);
        for movement in order {
            if !movement.is_unit() {
                return Err(VocabularyError::InvalidMovement {
                    dr: movement.dr,
                    dc: movement.dc,
                });
            }
            if !set.insert(movement) {
                return Err(VocabularyError::DuplicateMovement {
                    dr: movement.dr,
                    dc: movement.dc,
                });
            }
        }
        Ok(Self { order: set })
    }

    /// Label for a movement.
    pub fn action_of(&self, movement: Movement) -> Result<Action, VocabularyError> {
        self.order
            .get_index_of(&movement)
            .map(|i| Action(i as u8))
            .ok_or(VocabularyError::InvalidMovement {
                dr: movement.dr,
                dc: movement.dc,
            })
    }

    /// Movement for a label. [`Action::STAY`] has no movement.
    pub fn movement_of(&self, action: Action) -> Result<Movement, VocabularyError> {
        self.order
            .get_index(action.index())
            .copied()
            .ok_or(VocabularyError::InvalidAction { action: action.0 })
    }

    /// Movements in label order.
    pub fn movements(&self) -> impl ExactSizeIterator<Item = Movement> + '_ {
        self.order.iter().copied()
    }

    /// Number of labels, always [`Self::LEN`].
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always returns `false`; construction rejects incomplete orders.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for MovementVocabulary {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Canonical order ─────────────────────────────────────────

    #[test]
    fn canonical_labels() {
        let v = MovementVocabulary::canonical();
        assert_eq!(v.action_of(Movement::new(-1, 0)).unwrap(), Action(0));
        assert_eq!(v.action_of(Movement::new(1, 0)).unwrap(), Action(1));
        assert_eq!(v.action_of(Movement::new(0, -1)).unwrap(), Action(2));
        assert_eq!(v.action_of(Movement::new(0, 1)).unwrap(), Action(3));
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn movements_iterate_in_label_order() {
        let v = MovementVocabulary::canonical();
        let all: Vec<_> = v.movements().collect();
        assert_eq!(all, Movement::CANONICAL.to_vec());
    }

    // ── Rejections ──────────────────────────────────────────────

    #[test]
    fn diagonal_is_invalid_movement() {
        let v = MovementVocabulary::canonical();
        assert_eq!(
            v.action_of(Movement::new(1, 1)),
            Err(VocabularyError::InvalidMovement { dr: 1, dc: 1 })
        );
    }

    #[test]
    fn zero_displacement_is_invalid_movement() {
        let v = MovementVocabulary::canonical();
        assert!(v.action_of(Movement::new(0, 0)).is_err());
    }

    #[test]
    fn stay_has_no_movement() {
        let v = MovementVocabulary::canonical();
        assert_eq!(
            v.movement_of(Action::STAY),
            Err(VocabularyError::InvalidAction { action: 4 })
        );
    }

    #[test]
    fn from_order_rejects_non_unit() {
        let err = MovementVocabulary::from_order([
            Movement::NORTH,
            Movement::SOUTH,
            Movement::WEST,
            Movement::new(0, 2),
        ])
        .unwrap_err();
        assert_eq!(err, VocabularyError::InvalidMovement { dr: 0, dc: 2 });
    }

    #[test]
    fn from_order_rejects_duplicates() {
        let err = MovementVocabulary::from_order([
            Movement::NORTH,
            Movement::SOUTH,
            Movement::NORTH,
            Movement::EAST,
        ])
        .unwrap_err();
        assert_eq!(err, VocabularyError::DuplicateMovement { dr: -1, dc: 0 });
    }

    #[test]
    fn custom_order_relabels() {
        let v = MovementVocabulary::from_order([
            Movement::EAST,
            Movement::WEST,
            Movement::SOUTH,
            Movement::NORTH,
        ])
        .unwrap();
        assert_eq!(v.action_of(Movement::EAST).unwrap(), Action(0));
        assert_eq!(v.action_of(Movement::NORTH).unwrap(), Action(3));
        assert_ne!(v, MovementVocabulary::canonical());
    }

    #[test]
    fn equality_follows_label_order() {
        let reordered = MovementVocabulary::from_order([
            Movement::SOUTH,
            Movement::NORTH,
            Movement::WEST,
            Movement::EAST,
        ])
        .unwrap();
        assert_ne!(reordered, MovementVocabulary::canonical());
        assert_eq!(
            MovementVocabulary::from_order(Movement::CANONICAL).unwrap(),
            MovementVocabulary::canonical()
        );
        assert_eq!(reordered.clone(), reordered);
    }

    // ── Movement arithmetic ─────────────────────────────────────

    #[test]
    fn between_and_apply_are_inverse() {
        let a = Position::new(4, 2);
        let b = Position::new(3, 2);
        let m = Movement::between(a, b);
        assert_eq!(m, Movement::NORTH);
        assert_eq!(m.apply(a), b);
    }

    #[test]
    fn between_saturates() {
        let m = Movement::between(Position::new(i32::MIN, 0), Position::new(i32::MAX, 0));
        assert_eq!(m.dr, i32::MAX);
        assert!(!m.is_unit());
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_order() -> impl Strategy<Value = [Movement; 4]> {
        Just(Movement::CANONICAL.to_vec())
            .prop_shuffle()
            .prop_map(|v| [v[0], v[1], v[2], v[3]])
    }

    proptest! {
        #[test]
        fn bijection_round_trips(order in arb_order(), label in 0u8..4) {
            let v = MovementVocabulary::from_order(order).unwrap();
            let a = Action(label);
            let m = v.movement_of(a).unwrap();
            prop_assert_eq!(v.action_of(m).unwrap(), a);
        }

        #[test]
        fn only_unit_vectors_have_labels(dr in -3i32..=3, dc in -3i32..=3) {
            let v = MovementVocabulary::canonical();
            let m = Movement::new(dr, dc);
            prop_assert_eq!(v.action_of(m).is_ok(), m.is_unit());
        }
    }
}
