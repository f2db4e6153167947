use core::fmt;
use std::iter;
use std::str::FromStr;

use grid_util::{Point, SimpleValueGrid, ValueGrid};
use itertools::{iproduct, Itertools};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::{BASE_COST, WEIGHTED_COST};

/// A (row, column) cell coordinate. Row 0 is the top of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The position `distance` cells away in `direction`, or [None] if that would leave the
    /// non-negative quadrant. Bounds on the far side are the grid's business.
    pub fn offset(self, direction: Direction, distance: usize) -> Option<Position> {
        Some(match direction {
            Direction::North => Position::new(self.row.checked_sub(distance)?, self.col),
            Direction::South => Position::new(self.row.checked_add(distance)?, self.col),
            Direction::West => Position::new(self.row, self.col.checked_sub(distance)?),
            Direction::East => Position::new(self.row, self.col.checked_add(distance)?),
        })
    }

    /// Storage coordinate in the backing [SimpleValueGrid], which is indexed by (x, y).
    pub(crate) fn point(self) -> Point {
        Point::new(self.col as i32, self.row as i32)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four axis-aligned moves. There is no diagonal movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Neighbour order used everywhere a tie has to be broken: depth-first search takes the
    /// first open cell in this order and the maze carver shuffles starting from it.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Weighted,
    Start,
    Target,
}

impl CellState {
    pub fn is_passable(self) -> bool {
        self != CellState::Wall
    }

    /// Cost of moving into a cell in this state; walls cannot be entered.
    pub fn entry_cost(self) -> Option<u32> {
        match self {
            CellState::Wall => None,
            CellState::Weighted => Some(WEIGHTED_COST),
            CellState::Empty | CellState::Start | CellState::Target => Some(BASE_COST),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Wall => '#',
            CellState::Weighted => '~',
            CellState::Start => 'S',
            CellState::Target => 'T',
        }
    }

    pub fn from_symbol(ch: char) -> Option<CellState> {
        match ch {
            '.' => Some(CellState::Empty),
            '#' => Some(CellState::Wall),
            '~' => Some(CellState::Weighted),
            'S' => Some(CellState::Start),
            'T' => Some(CellState::Target),
            _ => None,
        }
    }
}

/// A fixed-size rectangle of [CellState]s. The grid is a plain value: searches and maze
/// generators borrow it for the duration of a call and keep nothing afterwards.
///
/// Exactly one [CellState::Start] and one [CellState::Target] are expected to be present
/// whenever a search is run; [set_start](Grid::set_start) and [set_target](Grid::set_target)
/// keep that invariant, raw [set](Grid::set) does not.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleValueGrid<CellState>,
}

impl Grid {
    /// An all-[CellState::Empty] grid.
    pub fn new(rows: usize, cols: usize) -> Result<Grid, GridError> {
        Grid::filled(rows, cols, CellState::Empty)
    }

    pub fn filled(rows: usize, cols: usize, state: CellState) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }
        Ok(Grid {
            cells: SimpleValueGrid::new(cols, rows, state),
        })
    }

    /// An empty grid with the start in the top-left corner and the target right next to it,
    /// the layout a freshly cleared board starts from.
    pub fn blank(rows: usize, cols: usize) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        let start = Position::new(0, 0);
        let target = if cols > 1 {
            Position::new(0, 1)
        } else {
            Position::new(1, 0)
        };
        if !grid.in_bounds(target) {
            return Err(GridError::EndpointCollision(start));
        }
        grid.put(start, CellState::Start);
        grid.put(target, CellState::Target);
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }

    pub fn cols(&self) -> usize {
        self.cells.width()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Always false: construction rejects zero rows or columns.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    pub fn get(&self, pos: Position) -> Option<CellState> {
        self.in_bounds(pos).then(|| self.state(pos))
    }

    pub fn set(&mut self, pos: Position, state: CellState) -> Result<(), GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        self.put(pos, state);
        Ok(())
    }

    /// Unchecked read; `pos` must be in bounds.
    pub(crate) fn state(&self, pos: Position) -> CellState {
        self.cells.get_point(pos.point())
    }

    /// Unchecked write; `pos` must be in bounds.
    pub(crate) fn put(&mut self, pos: Position, state: CellState) {
        self.cells.set_point(pos.point(), state);
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(CellState::is_passable)
    }

    /// In-bounds axis-aligned neighbours in north, south, west, east order, walls included.
    pub fn neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| pos.offset(dir, 1))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// [neighbors](Grid::neighbors) without the walls.
    pub fn passable_neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        self.neighbors(pos)
            .into_iter()
            .filter(|&p| self.state(p).is_passable())
            .collect()
    }

    /// Cost of entering `pos`, [None] for walls and positions off the grid.
    pub fn entry_cost(&self, pos: Position) -> Option<u32> {
        self.get(pos).and_then(CellState::entry_cost)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows(), 0..self.cols()).map(|(row, col)| Position::new(row, col))
    }

    /// First cell in row-major order holding `state`.
    pub fn find(&self, state: CellState) -> Option<Position> {
        self.positions().find(|&p| self.state(p) == state)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.positions().filter(|&p| self.state(p) == state).count()
    }

    pub fn start(&self) -> Option<Position> {
        self.find(CellState::Start)
    }

    pub fn target(&self) -> Option<Position> {
        self.find(CellState::Target)
    }

    /// Moves the start to `pos`, clearing the previous start cell.
    pub fn set_start(&mut self, pos: Position) -> Result<(), GridError> {
        self.move_endpoint(CellState::Start, pos)
    }

    /// Moves the target to `pos`, clearing the previous target cell.
    pub fn set_target(&mut self, pos: Position) -> Result<(), GridError> {
        self.move_endpoint(CellState::Target, pos)
    }

    fn move_endpoint(&mut self, endpoint: CellState, pos: Position) -> Result<(), GridError> {
        let current = self.get(pos).ok_or(GridError::OutOfBounds(pos))?;
        if matches!(current, CellState::Start | CellState::Target) && current != endpoint {
            return Err(GridError::EndpointCollision(pos));
        }
        let stale = self
            .positions()
            .filter(|&p| p != pos && self.state(p) == endpoint)
            .collect::<Vec<_>>();
        for p in stale {
            self.put(p, CellState::Empty);
        }
        self.put(pos, endpoint);
        Ok(())
    }

    /// Total entry cost of walking `start -> path... -> target`, or [None] if any step is not
    /// a move between 4-adjacent passable cells.
    pub fn route_cost(&self, start: Position, path: &[Position], target: Position) -> Option<u32> {
        if !self.is_passable(start) {
            return None;
        }
        iter::once(start)
            .chain(path.iter().copied())
            .chain(iter::once(target))
            .tuple_windows()
            .map(|(from, to)| {
                if from.manhattan_distance(&to) == 1 {
                    self.entry_cost(to)
                } else {
                    None
                }
            })
            .sum()
    }

    pub fn is_route(&self, start: Position, path: &[Position], target: Position) -> bool {
        self.route_cost(start, path, target).is_some()
    }

    /// Links 4-adjacent passable cells into connected components.
    pub fn components(&self) -> Components {
        let cols = self.cols();
        let mut sets = UnionFind::new(self.len());
        for pos in self.positions().filter(|&p| self.state(p).is_passable()) {
            let ix = pos.row * cols + pos.col;
            [Direction::South, Direction::East]
                .into_iter()
                .filter_map(|dir| pos.offset(dir, 1))
                .filter(|&p| self.is_passable(p))
                .for_each(|p| {
                    sets.union(ix, p.row * cols + p.col);
                });
        }
        Components { cols, sets }
    }

    /// Checks if `from` and `to` are passable and share a connected component.
    pub fn reachable(&self, from: Position, to: Position) -> bool {
        self.is_passable(from) && self.is_passable(to) && self.components().equiv(from, to)
    }
}

/// Connected components of the passable cells of a [Grid] at the time it was computed.
#[derive(Clone, Debug)]
pub struct Components {
    cols: usize,
    sets: UnionFind<usize>,
}

impl Components {
    /// Representative id of the component `pos` belongs to. Walls are singleton components.
    pub fn component(&self, pos: Position) -> usize {
        self.sets.find(pos.row * self.cols + pos.col)
    }

    pub fn equiv(&self, a: Position, b: Position) -> bool {
        self.sets
            .equiv(a.row * self.cols + a.col, b.row * self.cols + b.col)
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.positions().all(|p| self.state(p) == other.state(p))
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| self.state(Position::new(row, col)).symbol())
                .collect::<String>();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses the same character layout [Display](fmt::Display) produces: one line per row,
/// `.` empty, `#` wall, `~` weighted, `S` start and `T` target. Blank lines and surrounding
/// whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Grid, GridError> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = Grid::new(lines.len(), cols)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let position = Position::new(row, col);
                let state =
                    CellState::from_symbol(ch).ok_or(GridError::UnknownCell { ch, position })?;
                grid.put(position, state);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Neighbours come out north, south, west, east and stop at the border.
    #[test]
    fn neighbour_order() {
        let grid = Grid::new(3, 3).unwrap();
        let centre = grid.neighbors(Position::new(1, 1));
        assert_eq!(
            centre.as_slice(),
            &[
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2)
            ]
        );
        let corner = grid.neighbors(Position::new(0, 0));
        assert_eq!(corner.as_slice(), &[Position::new(1, 0), Position::new(0, 1)]);
        let far_corner = grid.neighbors(Position::new(2, 2));
        assert_eq!(
            far_corner.as_slice(),
            &[Position::new(1, 2), Position::new(2, 1)]
        );
    }

    #[test]
    fn passability_and_cost() {
        let grid: Grid = "S#\n~T".parse().unwrap();
        assert!(grid.is_passable(Position::new(0, 0)));
        assert!(!grid.is_passable(Position::new(0, 1)));
        assert!(!grid.is_passable(Position::new(2, 0)));
        assert_eq!(grid.entry_cost(Position::new(0, 0)), Some(BASE_COST));
        assert_eq!(grid.entry_cost(Position::new(0, 1)), None);
        assert_eq!(grid.entry_cost(Position::new(1, 0)), Some(WEIGHTED_COST));
        assert_eq!(grid.entry_cost(Position::new(1, 1)), Some(BASE_COST));
        assert_eq!(grid.entry_cost(Position::new(0, 5)), None);
        assert_eq!(
            grid.passable_neighbors(Position::new(0, 0)).as_slice(),
            &[Position::new(1, 0)]
        );
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::EmptyDimensions { rows: 0, cols: 4 })
        );
        let single = Grid::new(1, 1).unwrap();
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());
    }

    #[test]
    fn parse_and_display_agree() {
        let text = "S..#\n.~~#\n##.T\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.target(), Some(Position::new(2, 3)));
        assert_eq!(grid.count(CellState::Wall), 4);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "..\n...".parse::<Grid>(),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            ".x".parse::<Grid>(),
            Err(GridError::UnknownCell {
                ch: 'x',
                position: Position::new(0, 1)
            })
        );
        assert!(matches!(
            "".parse::<Grid>(),
            Err(GridError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn moving_endpoints_keeps_one_of_each() {
        let mut grid = Grid::blank(3, 3).unwrap();
        assert_eq!(grid.start(), Some(Position::new(0, 0)));
        assert_eq!(grid.target(), Some(Position::new(0, 1)));
        grid.set_start(Position::new(2, 2)).unwrap();
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.get(Position::new(0, 0)), Some(CellState::Empty));
        assert_eq!(
            grid.set_target(Position::new(2, 2)),
            Err(GridError::EndpointCollision(Position::new(2, 2)))
        );
        assert_eq!(
            grid.set_target(Position::new(3, 0)),
            Err(GridError::OutOfBounds(Position::new(3, 0)))
        );
        assert!(Grid::blank(1, 1).is_err());
        assert_eq!(Grid::blank(2, 1).unwrap().target(), Some(Position::new(1, 0)));
    }

    #[test]
    fn route_cost_checks_every_step() {
        // S . ~
        // # # .
        // T . .
        let grid: Grid = "S.~\n##.\nT..".parse().unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(2, 0);
        let path = [(0, 1), (0, 2), (1, 2), (2, 2), (2, 1)].map(Position::from);
        assert_eq!(grid.route_cost(start, &path, target), Some(15));
        // Skipping a cell breaks adjacency.
        let gap = [(0, 1), (1, 2), (2, 2), (2, 1)].map(Position::from);
        assert!(!grid.is_route(start, &gap, target));
        // Walking through a wall is not a route.
        assert!(!grid.is_route(start, &[], Position::new(1, 0)));
        // Adjacent endpoints need no intermediate cells.
        assert_eq!(grid.route_cost(start, &[], Position::new(0, 1)), Some(1));
    }

    /// Tests whether cells are correctly mapped to different connected components.
    #[test]
    fn component_generation() {
        // . # .
        // . # .
        let grid: Grid = ".#.\n.#.".parse().unwrap();
        let components = grid.components();
        assert!(components.equiv(Position::new(0, 0), Position::new(1, 0)));
        assert!(!components.equiv(Position::new(0, 0), Position::new(0, 2)));
        assert!(components.equiv(Position::new(0, 2), Position::new(1, 2)));
        assert!(!grid.reachable(Position::new(0, 0), Position::new(0, 1)));
        assert!(grid.reachable(Position::new(1, 0), Position::new(0, 0)));
    }

    /// The two corners stay connected around a central wall on a 4-grid.
    #[test]
    fn reachable_around_obstacle() {
        // S . .
        // . # .
        // . . T
        let grid: Grid = "S..\n.#.\n..T".parse().unwrap();
        assert!(grid.reachable(Position::new(0, 0), Position::new(2, 2)));
        // Diagonal contact alone does not connect cells.
        let grid: Grid = ".#\n#.".parse().unwrap();
        assert!(!grid.reachable(Position::new(0, 0), Position::new(1, 1)));
    }
}
