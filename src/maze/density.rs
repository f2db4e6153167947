use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MazeError;
use crate::grid::{CellState, Grid};
use crate::maze::{pick_endpoints, Maze, MazeGenerator};
use crate::DEFAULT_WALL_DENSITY;

/// Scatters walls over a fixed share of the cells. Nothing guarantees the endpoints end up
/// connected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomDensity {
    density: f64,
}

impl RandomDensity {
    pub fn new(density: f64) -> Result<RandomDensity, MazeError> {
        if (0.0..=1.0).contains(&density) {
            Ok(RandomDensity { density })
        } else {
            Err(MazeError::InvalidDensity(density))
        }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Walls asked for on a `rows` x `cols` grid, before capping at the cells left over once
    /// the endpoints are placed.
    pub fn wall_count(&self, rows: usize, cols: usize) -> usize {
        ((rows * cols) as f64 * self.density).round() as usize
    }
}

impl Default for RandomDensity {
    fn default() -> RandomDensity {
        RandomDensity {
            density: DEFAULT_WALL_DENSITY,
        }
    }
}

impl MazeGenerator for RandomDensity {
    fn name(&self) -> &'static str {
        "random density"
    }

    fn generate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError> {
        let mut grid = Grid::new(rows, cols)?;
        let cells = grid.positions().collect::<Vec<_>>();
        let (start, target) =
            pick_endpoints(&cells, rng).ok_or(MazeError::TooSmall { rows, cols })?;
        let free = cells
            .into_iter()
            .filter(|&p| p != start && p != target)
            .collect::<Vec<_>>();

        let mut walls = self.wall_count(rows, cols);
        if walls > free.len() {
            warn!(
                "Density {} asks for {} walls but only {} cells are free",
                self.density,
                walls,
                free.len()
            );
            walls = free.len();
        }
        for &p in free.choose_multiple(rng, walls) {
            grid.put(p, CellState::Wall);
        }
        debug!(
            "{} maze {}x{}: {} walls, start {} target {}",
            self.name(),
            rows,
            cols,
            walls,
            start,
            target
        );
        Ok(Maze::new(grid, start, target))
    }
}
