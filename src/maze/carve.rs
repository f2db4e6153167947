use grid_util::{SimpleValueGrid, ValueGrid};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MazeError;
use crate::grid::{CellState, Direction, Grid, Position};
use crate::maze::{pick_endpoints, Maze, MazeGenerator};

/// Randomized depth-first carving on the even lattice. Cells with an even row and an even
/// column are rooms, everything else starts out as wall; the walk knocks out the wall cell
/// between two rooms each time it moves, so the open cells form a spanning tree over the
/// rooms and every pair of rooms is connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomizedCarve;

impl RandomizedCarve {
    /// Rooms of a `rows` x `cols` grid in row-major order.
    fn lattice(grid: &Grid) -> Vec<Position> {
        grid.positions()
            .filter(|p| p.row % 2 == 0 && p.col % 2 == 0)
            .collect()
    }
}

impl MazeGenerator for RandomizedCarve {
    fn name(&self) -> &'static str {
        "randomized carve"
    }

    fn generate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError> {
        let mut grid = Grid::filled(rows, cols, CellState::Wall)?;
        let lattice = RandomizedCarve::lattice(&grid);
        if lattice.len() < 2 {
            return Err(MazeError::TooSmall { rows, cols });
        }
        for &p in &lattice {
            grid.put(p, CellState::Empty);
        }

        let mut visited = SimpleValueGrid::new(cols, rows, false);
        let origin = *lattice
            .choose(rng)
            .ok_or(MazeError::TooSmall { rows, cols })?;
        visited.set_point(origin.point(), true);
        let mut stack = vec![origin];
        let mut carved = 0;

        while let Some(&current) = stack.last() {
            let mut directions = Direction::ALL;
            directions.shuffle(rng);
            let step = directions.into_iter().find_map(|dir| {
                let next = current
                    .offset(dir, 2)
                    .filter(|&n| grid.in_bounds(n) && !visited.get_point(n.point()))?;
                Some((dir, next))
            });
            match step {
                Some((dir, next)) => {
                    if let Some(between) = current.offset(dir, 1) {
                        grid.put(between, CellState::Empty);
                        carved += 1;
                    }
                    visited.set_point(next.point(), true);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        let (start, target) =
            pick_endpoints(&lattice, rng).ok_or(MazeError::TooSmall { rows, cols })?;
        debug!(
            "{} maze {}x{}: {} rooms, {} passages carved from {}, start {} target {}",
            self.name(),
            rows,
            cols,
            lattice.len(),
            carved,
            origin,
            start,
            target
        );
        Ok(Maze::new(grid, start, target))
    }
}
