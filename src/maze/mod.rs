//! Procedural grid generation. Every strategy builds a brand-new [Grid] and places the start
//! and target on it; nothing about a previous grid survives.
use core::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MazeError, SearchError, UnknownStrategy};
use crate::grid::{CellState, Grid, Position};
use crate::solver::Algorithm;
use crate::{Path, DEFAULT_WALL_DENSITY};

pub mod carve;
pub mod density;
pub mod division;

use carve::RandomizedCarve;
use density::RandomDensity;
use division::RecursiveDivision;

/// A generated grid with its endpoints. The grid carries the matching
/// [CellState::Start] and [CellState::Target] cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Position,
    pub target: Position,
}

impl Maze {
    /// Tags the endpoints on `grid` and wraps everything up.
    pub(crate) fn new(mut grid: Grid, start: Position, target: Position) -> Maze {
        grid.put(start, CellState::Start);
        grid.put(target, CellState::Target);
        Maze {
            grid,
            start,
            target,
        }
    }

    /// Checks if the target can be reached from the start at all.
    pub fn is_solvable(&self) -> bool {
        self.grid.reachable(self.start, self.target)
    }

    pub fn solve(&self, algorithm: Algorithm) -> Result<Path, SearchError> {
        algorithm.get_path(&self.grid, self.start, self.target)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

pub trait MazeGenerator {
    fn name(&self) -> &'static str;

    /// Builds a `rows` x `cols` maze, drawing every random choice from `rng`.
    fn generate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError>;
}

/// Picks two distinct positions uniformly at random, or [None] if there are fewer than two.
pub(crate) fn pick_endpoints<R: Rng>(
    candidates: &[Position],
    rng: &mut R,
) -> Option<(Position, Position)> {
    let mut picked = candidates.choose_multiple(rng, 2);
    Some((*picked.next()?, *picked.next()?))
}

/// Tag selecting one of the three generation strategies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MazeStrategy {
    /// Walls scattered over the given share of cells. The result may be unsolvable.
    RandomDensity { density: f64 },
    /// A spanning tree carved by a randomized depth-first walk. Always solvable.
    RandomizedCarve,
    /// Open space split by walls with a single gap each. Always solvable.
    RecursiveDivision,
}

impl MazeStrategy {
    pub const fn random_density() -> MazeStrategy {
        MazeStrategy::RandomDensity {
            density: DEFAULT_WALL_DENSITY,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            MazeStrategy::RandomDensity { .. } => "density",
            MazeStrategy::RandomizedCarve => "carve",
            MazeStrategy::RecursiveDivision => "division",
        }
    }

    pub fn generate<R: Rng>(self, rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError> {
        match self {
            MazeStrategy::RandomDensity { density } => {
                RandomDensity::new(density)?.generate(rows, cols, rng)
            }
            MazeStrategy::RandomizedCarve => RandomizedCarve.generate(rows, cols, rng),
            MazeStrategy::RecursiveDivision => RecursiveDivision.generate(rows, cols, rng),
        }
    }
}

impl Default for MazeStrategy {
    fn default() -> MazeStrategy {
        MazeStrategy::random_density()
    }
}

impl fmt::Display for MazeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeStrategy::RandomDensity { density } => write!(f, "Random ({density})"),
            MazeStrategy::RandomizedCarve => f.write_str("Randomized DFS"),
            MazeStrategy::RecursiveDivision => f.write_str("Recursive Division"),
        }
    }
}

/// Accepts `density` (at the default density), `carve` and `division`, ignoring case.
impl FromStr for MazeStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<MazeStrategy, UnknownStrategy> {
        [
            MazeStrategy::random_density(),
            MazeStrategy::RandomizedCarve,
            MazeStrategy::RecursiveDivision,
        ]
        .into_iter()
        .find(|m| s.trim().eq_ignore_ascii_case(m.short_name()))
        .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn endpoints_are_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let candidates = [(0, 0), (0, 1), (3, 3)].map(Position::from);
        for _ in 0..100 {
            let (start, target) = pick_endpoints(&candidates, &mut rng).unwrap();
            assert_ne!(start, target);
            assert!(candidates.contains(&start));
            assert!(candidates.contains(&target));
        }
        assert_eq!(pick_endpoints(&candidates[..1], &mut rng), None);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(
            "density".parse::<MazeStrategy>(),
            Ok(MazeStrategy::RandomDensity {
                density: DEFAULT_WALL_DENSITY
            })
        );
        assert_eq!(
            " Carve ".parse::<MazeStrategy>(),
            Ok(MazeStrategy::RandomizedCarve)
        );
        assert_eq!(
            "division".parse::<MazeStrategy>(),
            Ok(MazeStrategy::RecursiveDivision)
        );
        assert!("prim".parse::<MazeStrategy>().is_err());
    }

    #[test]
    fn invalid_density_rejected_through_tag() {
        let mut rng = StdRng::seed_from_u64(0);
        for density in [-0.1, 1.5, f64::NAN] {
            let result = MazeStrategy::RandomDensity { density }.generate(4, 4, &mut rng);
            assert!(matches!(result, Err(MazeError::InvalidDensity(_))));
        }
    }

    #[test]
    fn too_small_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        let strategies = [
            MazeStrategy::random_density(),
            MazeStrategy::RandomizedCarve,
            MazeStrategy::RecursiveDivision,
        ];
        for strategy in strategies {
            assert_eq!(
                strategy.generate(1, 1, &mut rng),
                Err(MazeError::TooSmall { rows: 1, cols: 1 })
            );
        }
        // Carving needs two even-indexed rooms; the other strategies take any two cells.
        for (rows, cols) in [(1, 2), (2, 1), (2, 2)] {
            assert_eq!(
                MazeStrategy::RandomizedCarve.generate(rows, cols, &mut rng),
                Err(MazeError::TooSmall { rows, cols })
            );
            assert!(MazeStrategy::random_density()
                .generate(rows, cols, &mut rng)
                .is_ok());
            assert!(MazeStrategy::RecursiveDivision
                .generate(rows, cols, &mut rng)
                .is_ok());
        }
        for (rows, cols) in [(1, 3), (3, 1)] {
            assert!(MazeStrategy::RandomizedCarve
                .generate(rows, cols, &mut rng)
                .is_ok());
        }
        assert!(matches!(
            MazeStrategy::RecursiveDivision.generate(0, 3, &mut rng),
            Err(MazeError::Grid(_))
        ));
    }
}
