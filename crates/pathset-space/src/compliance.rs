//! Grid compliance test helpers.
//!
//! These functions verify the structural invariants every [`Grid`] must
//! satisfy regardless of its wall layout. Reused across grid and region
//! test modules.

use crate::grid::Grid;
use crate::region::{Neighbourhood, RegionMask, Viewport, Visibility};
use std::collections::HashSet;

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(grid: &Grid) {
    for pos in grid.positions() {
        for nb in grid.neighbours(pos) {
            assert!(
                grid.neighbours(nb).contains(&pos),
                "neighbour symmetry violated: {nb} in N({pos}) but {pos} not in N({nb})"
            );
        }
    }
}

/// Assert that open neighbours are exactly the free subset of neighbours.
pub fn assert_open_neighbours_are_free(grid: &Grid) {
    for pos in grid.positions() {
        let open = grid.open_neighbours(pos);
        let expected: Vec<_> = grid
            .neighbours(pos)
            .into_iter()
            .filter(|&nb| grid.is_free(nb))
            .collect();
        assert_eq!(open.as_slice(), expected.as_slice(), "open neighbours of {pos}");
    }
}

/// Assert that ranks enumerate every cell exactly once.
pub fn assert_rank_bijective(grid: &Grid) {
    let mut seen = HashSet::new();
    for pos in grid.positions() {
        let rank = grid.rank(pos).expect("position from positions() must be in bounds");
        assert!(seen.insert(rank), "rank {rank} assigned twice");
        assert_eq!(grid.position_of(rank), pos);
    }
    assert_eq!(seen.len(), grid.cell_count());
}

/// Assert that an unbounded viewport sees every cell from every position.
pub fn assert_unbounded_sees_all(grid: &Grid) {
    let viewport = Viewport::new(Visibility::Unbounded, Neighbourhood::Chebyshev);
    for pos in grid.positions() {
        let mask = RegionMask::around(grid.rows(), grid.cols(), pos, &viewport);
        assert_eq!(mask.visible_count(), grid.cell_count());
    }
}

/// Run all compliance checks.
pub fn run_full_compliance(grid: &Grid) {
    assert_neighbours_symmetric(grid);
    assert_open_neighbours_are_free(grid);
    assert_rank_bijective(grid);
    assert_unbounded_sees_all(grid);
}
