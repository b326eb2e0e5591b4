//! Shortest-path oracles over 4-connected grids.

use pathset_core::Position;
use pathset_space::Grid;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

/// Source of shortest paths.
pub trait PathOracle: Send + Sync {
    /// A shortest path from `start` to `goal`, both ends included.
    ///
    /// Consecutive positions differ by one unit movement and every
    /// position is free. Returns `Some(vec![start])` when `start == goal`
    /// and `None` when either end is blocked or the goal is unreachable.
    fn shortest_path(&self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>>;
}

const NONE: usize = usize::MAX;

/// A* search with the Manhattan heuristic.
///
/// Ties on `f` are broken by smaller `h`, then by insertion order, and
/// neighbours are expanded in north, south, west, east order, so the
/// returned path is a pure function of the grid and endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarOracle;

impl PathOracle for AStarOracle {
    fn shortest_path(&self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
        let (start_rank, goal_rank) = endpoints(grid, start, goal)?;
        if start_rank == goal_rank {
            return Some(vec![start]);
        }

        let mut g_score = vec![u32::MAX; grid.cell_count()];
        let mut came_from = vec![NONE; grid.cell_count()];
        let mut heap = BinaryHeap::new();
        let mut seq = 0usize;

        g_score[start_rank] = 0;
        let h = start.manhattan(goal);
        heap.push(Reverse((h, h, seq, start_rank)));

        while let Some(Reverse((f, _, _, rank))) = heap.pop() {
            if rank == goal_rank {
                return Some(reconstruct(grid, &came_from, goal_rank));
            }
            let g = g_score[rank];
            let pos = grid.position_of(rank);
            // Stale entry superseded by a cheaper push.
            if f > g + pos.manhattan(goal) {
                continue;
            }
            for nb in grid.open_neighbours(pos) {
                let Some(nb_rank) = grid.rank(nb) else {
                    continue;
                };
                let tentative = g + 1;
                if tentative < g_score[nb_rank] {
                    g_score[nb_rank] = tentative;
                    came_from[nb_rank] = rank;
                    let h = nb.manhattan(goal);
                    seq += 1;
                    heap.push(Reverse((tentative + h, h, seq, nb_rank)));
                }
            }
        }
        None
    }
}

/// Breadth-first search. Slower than [`AStarOracle`] on open grids but
/// trivially optimal; useful as a cross-check.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsOracle;

impl PathOracle for BfsOracle {
    fn shortest_path(&self, grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
        let (start_rank, goal_rank) = endpoints(grid, start, goal)?;
        if start_rank == goal_rank {
            return Some(vec![start]);
        }

        let mut came_from = vec![NONE; grid.cell_count()];
        came_from[start_rank] = start_rank;
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            let rank = grid.rank(pos)?;
            for nb in grid.open_neighbours(pos) {
                let nb_rank = grid.rank(nb)?;
                if came_from[nb_rank] != NONE {
                    continue;
                }
                came_from[nb_rank] = rank;
                if nb_rank == goal_rank {
                    came_from[start_rank] = NONE;
                    return Some(reconstruct(grid, &came_from, goal_rank));
                }
                queue.push_back(nb);
            }
        }
        None
    }
}

fn endpoints(grid: &Grid, start: Position, goal: Position) -> Option<(usize, usize)> {
    if !grid.is_free(start) || !grid.is_free(goal) {
        return None;
    }
    Some((grid.rank(start)?, grid.rank(goal)?))
}

/// Walk `came_from` back from `goal_rank` until a cell with no parent.
fn reconstruct(grid: &Grid, came_from: &[usize], goal_rank: usize) -> Vec<Position> {
    let mut path = vec![grid.position_of(goal_rank)];
    let mut rank = goal_rank;
    while came_from[rank] != NONE {
        rank = came_from[rank];
        path.push(grid.position_of(rank));
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathset_space::Cell;
    use proptest::prelude::*;

    fn p(r: i32, c: i32) -> Position {
        Position::new(r, c)
    }

    fn assert_valid_path(grid: &Grid, path: &[Position], start: Position, goal: Position) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for w in path.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1, "{} -> {}", w[0], w[1]);
        }
        assert!(path.iter().all(|&q| grid.is_free(q)));
    }

    // ── A* ──────────────────────────────────────────────────────

    #[test]
    fn astar_free_grid_is_manhattan() {
        let grid = Grid::new(5, 5).unwrap();
        let path = AStarOracle.shortest_path(&grid, p(0, 0), p(4, 4)).unwrap();
        assert_eq!(path.len(), 9);
        assert_valid_path(&grid, &path, p(0, 0), p(4, 4));
    }

    #[test]
    fn astar_routes_around_walls() {
        let grid = Grid::parse(
            "
            .....
            ####.
            .....
            ",
        )
        .unwrap();
        let path = AStarOracle.shortest_path(&grid, p(0, 0), p(2, 0)).unwrap();
        assert_eq!(path.len(), 11);
        assert_valid_path(&grid, &path, p(0, 0), p(2, 0));
    }

    #[test]
    fn astar_is_deterministic() {
        let grid = Grid::new(7, 7).unwrap();
        let a = AStarOracle.shortest_path(&grid, p(1, 1), p(5, 6));
        let b = AStarOracle.shortest_path(&grid, p(1, 1), p(5, 6));
        assert_eq!(a, b);
    }

    // ── Edge cases (both oracles) ───────────────────────────────

    fn oracles() -> [&'static dyn PathOracle; 2] {
        [&AStarOracle, &BfsOracle]
    }

    #[test]
    fn start_equals_goal() {
        let grid = Grid::new(3, 3).unwrap();
        for o in oracles() {
            assert_eq!(o.shortest_path(&grid, p(1, 1), p(1, 1)), Some(vec![p(1, 1)]));
        }
    }

    #[test]
    fn disconnected_is_none() {
        let grid = Grid::parse(
            "
            ..#..
            ..#..
            ",
        )
        .unwrap();
        for o in oracles() {
            assert_eq!(o.shortest_path(&grid, p(0, 0), p(1, 4)), None);
        }
    }

    #[test]
    fn blocked_or_outside_endpoint_is_none() {
        let grid = Grid::parse(".#.").unwrap();
        for o in oracles() {
            assert_eq!(o.shortest_path(&grid, p(0, 1), p(0, 0)), None);
            assert_eq!(o.shortest_path(&grid, p(0, 0), p(0, 5)), None);
            assert_eq!(o.shortest_path(&grid, p(-1, 0), p(0, 0)), None);
        }
    }

    #[test]
    fn bfs_adjacent() {
        let grid = Grid::new(1, 2).unwrap();
        assert_eq!(
            BfsOracle.shortest_path(&grid, p(0, 0), p(0, 1)),
            Some(vec![p(0, 0), p(0, 1)])
        );
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1u32..9, 1u32..9).prop_flat_map(|(rows, cols)| {
            proptest::collection::vec(prop::bool::weighted(0.3), (rows * cols) as usize)
                .prop_map(move |walls| {
                    let cells = walls
                        .into_iter()
                        .map(|w| if w { Cell::Wall } else { Cell::Free })
                        .collect();
                    Grid::from_cells(rows, cols, cells).unwrap()
                })
        })
    }

    proptest! {
        #[test]
        fn astar_matches_bfs(grid in arb_grid(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
            let free: Vec<_> = grid.free_positions().collect();
            prop_assume!(!free.is_empty());
            let start = free[a.index(free.len())];
            let goal = free[b.index(free.len())];
            let astar = AStarOracle.shortest_path(&grid, start, goal);
            let bfs = BfsOracle.shortest_path(&grid, start, goal);
            prop_assert_eq!(astar.as_ref().map(Vec::len), bfs.as_ref().map(Vec::len));
            if let Some(path) = astar {
                assert_valid_path(&grid, &path, start, goal);
            }
        }
    }
}
