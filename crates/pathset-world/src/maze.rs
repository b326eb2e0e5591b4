//! Perfect mazes carved by randomized depth-first search.
//!
//! Cells at even `(row, col)` coordinates are maze nodes; the cell between
//! two adjacent nodes is opened when the walk passes from one to the
//! other. Every free cell is reachable from every other, and there is
//! exactly one simple path between any two nodes.

use pathset_core::{Movement, Position};
use pathset_space::{Cell, Grid, SpaceError};
use rand::{Rng, RngCore};

/// Carve a `rows x cols` maze.
///
/// With odd dimensions the nodes reach every border; with an even
/// dimension the last row or column stays solid.
pub fn carve(rows: u32, cols: u32, rng: &mut dyn RngCore) -> Result<Grid, SpaceError> {
    let cell_count = Grid::new(rows, cols)?.cell_count();
    let node_rows = rows.div_ceil(2) as usize;
    let node_cols = cols.div_ceil(2) as usize;
    let width = cols as usize;

    let mut cells = vec![Cell::Wall; cell_count];
    let mut visited = vec![false; node_rows * node_cols];
    let open = |cells: &mut [Cell], p: Position| {
        cells[p.row as usize * width + p.col as usize] = Cell::Free;
    };

    let first = (
        rng.random_range(0..node_rows),
        rng.random_range(0..node_cols),
    );
    visited[first.0 * node_cols + first.1] = true;
    open(&mut cells, node_position(first));
    let mut stack = vec![first];

    while let Some(&(nr, nc)) = stack.last() {
        let mut candidates = [(0usize, 0usize, Movement::NORTH); 4];
        let mut n = 0;
        for m in Movement::CANONICAL {
            let (Some(r), Some(c)) = (
                nr.checked_add_signed(m.dr as isize),
                nc.checked_add_signed(m.dc as isize),
            ) else {
                continue;
            };
            if r < node_rows && c < node_cols && !visited[r * node_cols + c] {
                candidates[n] = (r, c, m);
                n += 1;
            }
        }
        if n == 0 {
            stack.pop();
            continue;
        }
        let (r, c, m) = candidates[rng.random_range(0..n)];
        visited[r * node_cols + c] = true;
        open(&mut cells, m.apply(node_position((nr, nc))));
        open(&mut cells, node_position((r, c)));
        stack.push((r, c));
    }

    Grid::from_cells(rows, cols, cells)
}

fn node_position((r, c): (usize, usize)) -> Position {
    Position::new(2 * r as i32, 2 * c as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashSet, VecDeque};

    fn reachable(grid: &Grid, from: Position) -> usize {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            for nb in grid.open_neighbours(p) {
                if seen.insert(nb) {
                    queue.push_back(nb);
                }
            }
        }
        seen.len()
    }

    #[test]
    fn odd_maze_is_connected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = carve(9, 9, &mut rng).unwrap();
        // 25 nodes joined by 24 corridors.
        assert_eq!(grid.free_count(), 49);
        let start = grid.free_positions().next().unwrap();
        assert_eq!(reachable(&grid, start), grid.free_count());
    }

    #[test]
    fn nodes_are_always_free() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = carve(7, 5, &mut rng).unwrap();
        for r in (0..7).step_by(2) {
            for c in (0..5).step_by(2) {
                assert!(grid.is_free(Position::new(r, c)));
            }
        }
        // Odd cells are never carved.
        assert!(!grid.is_free(Position::new(1, 1)));
    }

    #[test]
    fn even_dimensions_leave_last_line_solid() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = carve(6, 6, &mut rng).unwrap();
        for i in 0..6 {
            assert!(!grid.is_free(Position::new(5, i)));
            assert!(!grid.is_free(Position::new(i, 5)));
        }
        let start = Position::new(0, 0);
        assert_eq!(reachable(&grid, start), grid.free_count());
    }

    #[test]
    fn same_seed_same_maze() {
        let a = carve(11, 13, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = carve(11, 13, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_cell_maze() {
        let grid = carve(1, 1, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert_eq!(grid.free_count(), 1);
    }

    #[test]
    fn empty_shape_rejected() {
        assert_eq!(
            carve(0, 3, &mut ChaCha8Rng::seed_from_u64(0)),
            Err(SpaceError::EmptyGrid)
        );
    }
}
