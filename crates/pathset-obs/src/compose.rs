//! Partial observation of a grid and agent marking.
//!
//! [`observe`] and [`mark_agent`] are the stateless building blocks; the
//! stateful [`Observer`](crate::Observer) decides which mask to apply
//! under each [`ObservationPolicy`](crate::ObservationPolicy) and then
//! delegates to [`masked_state`].

use crate::channel::{encode_cell, Channel, AGENT, UNSEEN};
use pathset_core::{ObsError, Position};
use pathset_space::{Grid, RegionMask, Viewport};

/// The grid's state channel with every cell outside the viewport of
/// `position` set to [`UNSEEN`].
///
/// # Errors
///
/// Returns [`ObsError::OutOfBounds`] if `position` is outside the grid.
///
/// # Examples
///
/// ```
/// use pathset_core::Position;
/// use pathset_obs::{observe, UNSEEN};
/// use pathset_space::{Grid, Neighbourhood, Viewport, Visibility};
///
/// let grid = Grid::new(5, 5).unwrap();
/// let vp = Viewport::new(Visibility::Radius(1), Neighbourhood::Chebyshev);
/// let ch = observe(&grid, Position::new(0, 0), &vp).unwrap();
///
/// assert_eq!(ch.count(UNSEEN), 25 - 4);
/// ```
pub fn observe(grid: &Grid, position: Position, viewport: &Viewport) -> Result<Channel, ObsError> {
    check_bounds(grid, position)?;
    let mask = RegionMask::around(grid.rows(), grid.cols(), position, viewport);
    Ok(masked_state(grid, &mask))
}

/// The grid's state channel restricted to the cells visible in `mask`.
///
/// `mask` must cover the grid's shape.
pub fn masked_state(grid: &Grid, mask: &RegionMask) -> Channel {
    debug_assert_eq!(mask.shape(), grid.shape());
    let data = grid
        .cells()
        .iter()
        .zip(mask.as_slice())
        .map(|(&cell, &visible)| if visible { encode_cell(cell) } else { UNSEEN })
        .collect();
    Channel::from_raw(grid.rows(), grid.cols(), data)
}

/// A copy of `channel` with [`AGENT`] written at `position`.
///
/// The input channel is left untouched, so frames built from a shared
/// observation never alias each other.
pub fn mark_agent(channel: &Channel, position: Position) -> Result<Channel, ObsError> {
    let mut marked = channel.clone();
    marked.set(position, AGENT)?;
    Ok(marked)
}

pub(crate) fn check_bounds(grid: &Grid, position: Position) -> Result<(), ObsError> {
    if grid.in_bounds(position) {
        Ok(())
    } else {
        Err(ObsError::OutOfBounds {
            position,
            rows: grid.rows(),
            cols: grid.cols(),
        })
    }
}
