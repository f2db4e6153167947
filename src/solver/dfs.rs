use grid_util::{SimpleValueGrid, ValueGrid};

use crate::grid::{Grid, Position};
use crate::solver::{Exploration, GridSolver};

/// Iterative depth-first search. The stack always holds the current descent from the start,
/// so the first time the target is stepped on the stack is the route. Neighbours are tried
/// north, south, west, east; the route is some route, rarely the shortest. The target is not
/// looked for among the neighbours, so even an adjacent target may be reached by a detour.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstSolver;

impl GridSolver for DepthFirstSolver {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn explore_unchecked(&self, grid: &Grid, start: Position, target: Position) -> Exploration {
        let mut visited = SimpleValueGrid::new(grid.cols(), grid.rows(), false);
        let mut stack = vec![start];
        let mut expanded = vec![start];
        visited.set_point(start.point(), true);
        let mut current = start;

        while !stack.is_empty() {
            if !visited.get_point(current.point()) {
                visited.set_point(current.point(), true);
                stack.push(current);
                expanded.push(current);
            }
            if current == target {
                // The stack runs from the start to the target, both excluded from the path.
                let path = stack[1..stack.len() - 1].to_vec();
                return Exploration {
                    path: Some(path),
                    expanded,
                };
            }
            let next = grid
                .passable_neighbors(current)
                .into_iter()
                .find(|p| !visited.get_point(p.point()));
            match next {
                Some(next) => current = next,
                None => {
                    // Dead end, back up to the previous cell of the descent
                    stack.pop();
                    if let Some(&top) = stack.last() {
                        current = top;
                    }
                }
            }
        }
        Exploration {
            path: None,
            expanded,
        }
    }
}
