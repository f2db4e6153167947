use std::collections::VecDeque;

use grid_util::{SimpleValueGrid, ValueGrid};

use crate::grid::{Grid, Position};
use crate::solver::{reconstruct, Exploration, GridSolver};

/// Level-order search counting hops only: weighted cells are as cheap as any other here, so
/// the route has the fewest steps but not necessarily the lowest entry cost.
///
/// The whole reachable area is flooded before the route is read off the predecessor layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn explore_unchecked(&self, grid: &Grid, start: Position, target: Position) -> Exploration {
        let mut visited = SimpleValueGrid::new(grid.cols(), grid.rows(), false);
        let mut predecessors = SimpleValueGrid::new(grid.cols(), grid.rows(), None::<Position>);
        let mut queue = VecDeque::from([start]);
        let mut expanded = Vec::new();
        visited.set_point(start.point(), true);

        while let Some(current) = queue.pop_front() {
            expanded.push(current);
            for next in grid.passable_neighbors(current) {
                if !visited.get_point(next.point()) {
                    visited.set_point(next.point(), true);
                    predecessors.set_point(next.point(), Some(current));
                    queue.push_back(next);
                }
            }
        }
        Exploration {
            path: reconstruct(&predecessors, start, target),
            expanded,
        }
    }
}
