use crate::grid::{Grid, Position};
use crate::solver::dijkstra::cheapest_first;
use crate::solver::{Exploration, GridSolver, Selection};

/// Uniform-cost search guided by the Manhattan distance to the target. Every move costs at
/// least one, so with the default `heuristic_factor` of 1.0 the estimate never overshoots and
/// the route is as cheap as the one [DijkstraSolver](crate::solver::dijkstra::DijkstraSolver)
/// finds, usually after settling fewer cells. Factors above 1.0 trade that guarantee for
/// a greedier search.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
    pub selection: Selection,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(selection: Selection) -> AstarSolver {
        AstarSolver {
            selection,
            ..AstarSolver::new()
        }
    }

    /// Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Position, p2: &Position) -> u32 {
        let distance = p1.point().manhattan_distance(&p2.point());
        (distance as f32 * self.heuristic_factor) as u32
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn explore_unchecked(&self, grid: &Grid, start: Position, target: Position) -> Exploration {
        cheapest_first(grid, start, target, self.selection, |p| {
            self.heuristic(&p, &target)
        })
    }
}
