use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::MazeError;
use crate::grid::{CellState, Direction, Grid, Position};
use crate::maze::{pick_endpoints, Maze, MazeGenerator};

/// Recursive division. The grid starts open, its edge acting as the enclosing wall, and is
/// split again and again by wall lines that each keep a single gap. Lines are only drawn
/// where both ends butt against a wall or the edge, so no earlier gap is ever sealed and all
/// open cells stay connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecursiveDivision;

/// An open rectangle of cells still to be divided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    top: usize,
    left: usize,
    height: usize,
    width: usize,
}

/// Which way the next wall line runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    /// A wall down one column, splitting the width.
    Column,
    /// A wall along one row, splitting the height.
    Row,
}

impl Region {
    fn bottom(&self) -> usize {
        self.top + self.height
    }

    fn right(&self) -> usize {
        self.left + self.width
    }

    /// Wide regions get a column wall, everything else (ties included) a row wall.
    fn line(&self) -> Line {
        if self.width > self.height {
            Line::Column
        } else {
            Line::Row
        }
    }
}

/// Whether the cell next to a wall end is closed: a wall, or off the grid.
fn closed(grid: &Grid, pos: Option<Position>) -> bool {
    pos.map_or(true, |p| !grid.is_passable(p))
}

/// Interior lines of `region` whose two ends are closed.
fn candidate_lines(grid: &Grid, region: Region, line: Line) -> Vec<usize> {
    match line {
        Line::Column => (region.left + 1..region.right() - 1)
            .filter(|&col| {
                closed(grid, Position::new(region.top, col).offset(Direction::North, 1))
                    && closed(grid, Some(Position::new(region.bottom(), col)))
            })
            .collect(),
        Line::Row => (region.top + 1..region.bottom() - 1)
            .filter(|&row| {
                closed(grid, Position::new(row, region.left).offset(Direction::West, 1))
                    && closed(grid, Some(Position::new(row, region.right())))
            })
            .collect(),
    }
}

/// Splits `region` and recurses into both halves. Regions too thin to hold a wall with a gap,
/// or without any line that keeps the surrounding gaps open, are left as they are.
fn divide<R: Rng>(grid: &mut Grid, region: Region, rng: &mut R) {
    if region.height < 2 || region.width < 2 {
        trace!("Region {:?} is too thin to divide", region);
        return;
    }
    let line = region.line();
    let candidates = candidate_lines(grid, region, line);
    let Some(&at) = candidates.choose(rng) else {
        trace!("Region {:?} has no {:?} line that keeps gaps open", region, line);
        return;
    };
    match line {
        Line::Column => {
            let gap = rng.gen_range(region.top..region.bottom());
            for row in (region.top..region.bottom()).filter(|&row| row != gap) {
                grid.put(Position::new(row, at), CellState::Wall);
            }
            divide(
                grid,
                Region {
                    width: at - region.left,
                    ..region
                },
                rng,
            );
            divide(
                grid,
                Region {
                    left: at + 1,
                    width: region.right() - at - 1,
                    ..region
                },
                rng,
            );
        }
        Line::Row => {
            let gap = rng.gen_range(region.left..region.right());
            for col in (region.left..region.right()).filter(|&col| col != gap) {
                grid.put(Position::new(at, col), CellState::Wall);
            }
            divide(
                grid,
                Region {
                    height: at - region.top,
                    ..region
                },
                rng,
            );
            divide(
                grid,
                Region {
                    top: at + 1,
                    height: region.bottom() - at - 1,
                    ..region
                },
                rng,
            );
        }
    }
}

impl MazeGenerator for RecursiveDivision {
    fn name(&self) -> &'static str {
        "recursive division"
    }

    fn generate<R: Rng>(&self, rows: usize, cols: usize, rng: &mut R) -> Result<Maze, MazeError> {
        let mut grid = Grid::new(rows, cols)?;
        if grid.len() < 2 {
            return Err(MazeError::TooSmall { rows, cols });
        }
        let whole = Region {
            top: 0,
            left: 0,
            height: rows,
            width: cols,
        };
        divide(&mut grid, whole, rng);

        let open = grid
            .positions()
            .filter(|&p| grid.is_passable(p))
            .collect::<Vec<_>>();
        let (start, target) =
            pick_endpoints(&open, rng).ok_or(MazeError::TooSmall { rows, cols })?;
        debug!(
            "{} maze {}x{}: {} walls, start {} target {}",
            self.name(),
            rows,
            cols,
            grid.len() - open.len(),
            start,
            target
        );
        Ok(Maze::new(grid, start, target))
    }
}
