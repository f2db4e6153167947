//! # grid_maze
//!
//! Pathfinding and maze generation on 4-connected grids. A [Grid] holds cells that are empty,
//! walls, weighted, or one of the two endpoints. Four interchangeable strategies find a route
//! between the endpoints:
//! [depth-first](solver::dfs::DepthFirstSolver) (some path),
//! [breadth-first](solver::bfs::BreadthFirstSolver) (fewest steps),
//! [Dijkstra](solver::dijkstra::DijkstraSolver) (cheapest, honouring weighted cells) and
//! [A*](solver::astar::AstarSolver) (cheapest, guided by the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry)).
//!
//! Entering a cell costs [BASE_COST], or [WEIGHTED_COST] for [CellState::Weighted] cells.
//!
//! Three [maze] strategies build fresh grids with endpoints already placed: scattering walls
//! at a given density, carving a spanning tree with a randomized depth-first walk, and
//! recursive division.
//!
//! ```
//! use grid_maze::{search, Algorithm, Grid, Position};
//!
//! let grid: Grid = "S.#\n..#\n..T".parse().unwrap();
//! let path = search(Algorithm::BreadthFirst, &grid, Position::new(0, 0), Position::new(2, 2));
//! assert_eq!(path.unwrap().len(), 3);
//! ```
pub mod error;
pub mod grid;
pub mod maze;
pub mod solver;

pub use error::{GridError, InvalidInput, MazeError, SearchError, UnknownStrategy};
pub use grid::{CellState, Components, Direction, Grid, Position};
pub use maze::{Maze, MazeGenerator, MazeStrategy};
pub use solver::{Algorithm, Exploration, GridSolver, Selection};

use rand::Rng;

/// Cost of entering an empty, start or target cell.
pub const BASE_COST: u32 = 1;
/// Cost of entering a [CellState::Weighted] cell.
pub const WEIGHTED_COST: u32 = 10;
/// Share of cells [MazeStrategy::RandomDensity] turns into walls unless told otherwise.
pub const DEFAULT_WALL_DENSITY: f64 = 0.25;

/// Cells strictly between start and target in walking order. Empty when the endpoints are
/// adjacent.
pub type Path = Vec<Position>;

/// Runs `algorithm` from `start` to `target`, returning the intermediate cells of the route.
pub fn search(
    algorithm: Algorithm,
    grid: &Grid,
    start: Position,
    target: Position,
) -> Result<Path, SearchError> {
    algorithm.get_path(grid, start, target)
}

/// Like [search], but also reports every cell the strategy expanded, in order. An unreachable
/// target is not an error here; the returned [Exploration] simply has no path.
pub fn explore(
    algorithm: Algorithm,
    grid: &Grid,
    start: Position,
    target: Position,
) -> Result<Exploration, InvalidInput> {
    algorithm.explore(grid, start, target)
}

/// Builds a brand-new `rows` x `cols` maze using `strategy`, drawing every random choice from
/// `rng`. Seed the generator for reproducible layouts.
pub fn generate<R: Rng>(
    strategy: MazeStrategy,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    strategy.generate(rows, cols, rng)
}

/// [generate] with the thread-local generator.
pub fn generate_with_thread_rng(
    strategy: MazeStrategy,
    rows: usize,
    cols: usize,
) -> Result<Maze, MazeError> {
    strategy.generate(rows, cols, &mut rand::thread_rng())
}
