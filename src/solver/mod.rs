use core::fmt;
use std::str::FromStr;

use grid_util::{SimpleValueGrid, ValueGrid};
use log::debug;

use crate::error::{InvalidInput, SearchError, UnknownStrategy};
use crate::grid::{Grid, Position};
use crate::Path;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BreadthFirstSolver;
use dfs::DepthFirstSolver;
use dijkstra::DijkstraSolver;

/// Result of running a strategy to completion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Exploration {
    /// Cells strictly between start and target, or [None] if the target was never reached.
    pub path: Option<Path>,
    /// Every cell the strategy expanded, in the order it did so. The start comes first.
    pub expanded: Vec<Position>,
}

/// How [DijkstraSolver] and [AstarSolver] pick the next cell to settle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Scan every cell for the cheapest unsettled one: O(rows·cols) per step. Ties go to the
    /// first cell in row-major order.
    #[default]
    LinearScan,
    /// Keep the frontier in a binary heap. Returns routes of the same cost as
    /// [LinearScan](Selection::LinearScan) but may break ties differently.
    BinaryHeap,
}

pub trait GridSolver {
    /// Short human readable name used in log output.
    fn name(&self) -> &'static str;

    /// Runs the strategy. The endpoints have already been checked by [validate].
    fn explore_unchecked(&self, grid: &Grid, start: Position, target: Position) -> Exploration;

    /// Validates the endpoints and runs the strategy, reporting the expanded cells alongside
    /// the path, if any.
    fn explore(
        &self,
        grid: &Grid,
        start: Position,
        target: Position,
    ) -> Result<Exploration, InvalidInput> {
        validate(grid, start, target)?;
        let exploration = self.explore_unchecked(grid, start, target);
        debug!(
            "{} search from {} to {} expanded {} cells, path length {:?}",
            self.name(),
            start,
            target,
            exploration.expanded.len(),
            exploration.path.as_ref().map(Vec::len)
        );
        Ok(exploration)
    }

    /// Computes the cells strictly between `start` and `target` on a route, in walking order.
    fn get_path(&self, grid: &Grid, start: Position, target: Position) -> Result<Path, SearchError> {
        self.explore(grid, start, target)?
            .path
            .ok_or(SearchError::NotFound { start, target })
    }

    /// Total entry cost of the route `start -> path -> target`, [None] if it is not walkable.
    fn get_path_cost(
        &self,
        grid: &Grid,
        start: Position,
        path: &[Position],
        target: Position,
    ) -> Option<u32> {
        grid.route_cost(start, path, target)
    }
}

/// Checks that both endpoints are on the grid, distinct and not walls.
pub fn validate(grid: &Grid, start: Position, target: Position) -> Result<(), InvalidInput> {
    for pos in [start, target] {
        if !grid.in_bounds(pos) {
            return Err(InvalidInput::OutOfBounds(pos));
        }
    }
    if start == target {
        return Err(InvalidInput::SameEndpoints(start));
    }
    for pos in [start, target] {
        if !grid.is_passable(pos) {
            return Err(InvalidInput::Impassable(pos));
        }
    }
    Ok(())
}

/// Walks recorded predecessors back from `target`. A target that never received a
/// predecessor was not reached.
pub(crate) fn reconstruct(
    predecessors: &SimpleValueGrid<Option<Position>>,
    start: Position,
    target: Position,
) -> Option<Path> {
    let mut path = Vec::new();
    let mut current = predecessors.get_point(target.point())?;
    while current != start {
        path.push(current);
        current = predecessors.get_point(current.point())?;
    }
    path.reverse();
    Some(path)
}

/// Tag selecting one of the four strategies with its default settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
        Algorithm::UniformCost,
        Algorithm::AStar,
    ];

    pub fn solver(self) -> Box<dyn GridSolver> {
        match self {
            Algorithm::DepthFirst => Box::new(DepthFirstSolver),
            Algorithm::BreadthFirst => Box::new(BreadthFirstSolver),
            Algorithm::UniformCost => Box::new(DijkstraSolver::default()),
            Algorithm::AStar => Box::new(AstarSolver::new()),
        }
    }

    /// Whether the returned route is guaranteed to be the cheapest by entry cost.
    pub fn minimises_cost(self) -> bool {
        matches!(self, Algorithm::UniformCost | Algorithm::AStar)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "dfs",
            Algorithm::BreadthFirst => "bfs",
            Algorithm::UniformCost => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    pub fn explore(
        self,
        grid: &Grid,
        start: Position,
        target: Position,
    ) -> Result<Exploration, InvalidInput> {
        self.solver().explore(grid, start, target)
    }

    pub fn get_path(self, grid: &Grid, start: Position, target: Position) -> Result<Path, SearchError> {
        self.solver().get_path(grid, start, target)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Algorithm::DepthFirst => "Depth First Search",
            Algorithm::BreadthFirst => "Breadth First Search",
            Algorithm::UniformCost => "Dijkstra",
            Algorithm::AStar => "A*",
        };
        f.write_str(label)
    }
}

/// Accepts the short names (`dfs`, `bfs`, `dijkstra`, `astar`) as well as the display labels,
/// ignoring case.
impl FromStr for Algorithm {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Algorithm, UnknownStrategy> {
        let needle = s.trim();
        let alias = match needle.to_ascii_lowercase().as_str() {
            "a-star" | "a_star" => Some(Algorithm::AStar),
            "uniform-cost" | "ucs" => Some(Algorithm::UniformCost),
            _ => None,
        };
        alias
            .or_else(|| {
                Algorithm::ALL.into_iter().find(|a| {
                    needle.eq_ignore_ascii_case(a.short_name())
                        || needle.eq_ignore_ascii_case(&a.to_string())
                })
            })
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_order() {
        // S #
        // . T
        let grid: Grid = "S#\n.T".parse().unwrap();
        let start = Position::new(0, 0);
        assert_eq!(
            validate(&grid, Position::new(2, 0), start),
            Err(InvalidInput::OutOfBounds(Position::new(2, 0)))
        );
        assert_eq!(
            validate(&grid, start, Position::new(0, 9)),
            Err(InvalidInput::OutOfBounds(Position::new(0, 9)))
        );
        assert_eq!(
            validate(&grid, start, start),
            Err(InvalidInput::SameEndpoints(start))
        );
        assert_eq!(
            validate(&grid, start, Position::new(0, 1)),
            Err(InvalidInput::Impassable(Position::new(0, 1)))
        );
        assert_eq!(validate(&grid, start, Position::new(1, 1)), Ok(()));
    }

    /// Bad input is reported before any work is done, by every strategy.
    #[test]
    fn invalid_input_is_not_not_found() {
        let grid: Grid = "S#\n.T".parse().unwrap();
        for algorithm in Algorithm::ALL {
            let err = algorithm
                .get_path(&grid, Position::new(0, 0), Position::new(0, 1))
                .unwrap_err();
            assert_eq!(
                err,
                SearchError::InvalidInput(InvalidInput::Impassable(Position::new(0, 1)))
            );
        }
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.short_name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("A_STAR".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!("ucs".parse::<Algorithm>(), Ok(Algorithm::UniformCost));
        assert_eq!(
            "greedy".parse::<Algorithm>(),
            Err(UnknownStrategy("greedy".to_owned()))
        );
    }
}
