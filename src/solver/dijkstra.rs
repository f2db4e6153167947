use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::{SimpleValueGrid, ValueGrid};
use log::trace;

use crate::grid::{Grid, Position};
use crate::solver::{reconstruct, Exploration, GridSolver, Selection};

/// Cost layer value for cells no route has reached yet.
const UNREACHED: u32 = u32::MAX;

/// Uniform-cost search: settles cells in order of their cheapest known entry cost from the
/// start, so weighted cells are avoided whenever a detour is cheaper.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver {
    pub selection: Selection,
}

impl DijkstraSolver {
    pub fn new(selection: Selection) -> DijkstraSolver {
        DijkstraSolver { selection }
    }
}

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "uniform-cost"
    }

    fn explore_unchecked(&self, grid: &Grid, start: Position, target: Position) -> Exploration {
        cheapest_first(grid, start, target, self.selection, |_| 0)
    }
}

/// Shared core of uniform-cost search and A*: cells are settled by smallest
/// `cost + heuristic`. With a zero heuristic this is plain uniform-cost search.
pub(crate) fn cheapest_first<H>(
    grid: &Grid,
    start: Position,
    target: Position,
    selection: Selection,
    heuristic: H,
) -> Exploration
where
    H: Fn(Position) -> u32,
{
    let mut layers = Layers::new(grid, start);
    match selection {
        Selection::LinearScan => scan_cheapest_first(grid, &mut layers, target, heuristic),
        Selection::BinaryHeap => heap_cheapest_first(grid, &mut layers, start, target, heuristic),
    }
    Exploration {
        path: reconstruct(&layers.predecessors, start, target),
        expanded: layers.expanded,
    }
}

/// Per-cell bookkeeping of a cheapest-first search.
struct Layers {
    cost: SimpleValueGrid<u32>,
    settled: SimpleValueGrid<bool>,
    predecessors: SimpleValueGrid<Option<Position>>,
    expanded: Vec<Position>,
}

impl Layers {
    fn new(grid: &Grid, start: Position) -> Layers {
        let mut cost = SimpleValueGrid::new(grid.cols(), grid.rows(), UNREACHED);
        cost.set_point(start.point(), 0);
        Layers {
            cost,
            settled: SimpleValueGrid::new(grid.cols(), grid.rows(), false),
            predecessors: SimpleValueGrid::new(grid.cols(), grid.rows(), None),
            expanded: Vec::new(),
        }
    }

    fn cost(&self, pos: Position) -> u32 {
        self.cost.get_point(pos.point())
    }

    fn is_settled(&self, pos: Position) -> bool {
        self.settled.get_point(pos.point())
    }

    fn settle(&mut self, pos: Position) {
        self.settled.set_point(pos.point(), true);
        self.expanded.push(pos);
    }

    /// Lowers the known cost of every unsettled passable neighbour of `current` that can be
    /// entered more cheaply through it. `improved` sees each lowered cell with its new cost.
    fn relax<F>(&mut self, grid: &Grid, current: Position, mut improved: F)
    where
        F: FnMut(Position, u32),
    {
        let current_cost = self.cost(current);
        for next in grid.passable_neighbors(current) {
            if self.is_settled(next) {
                continue;
            }
            let Some(step) = grid.entry_cost(next) else {
                continue;
            };
            let candidate = current_cost + step;
            if candidate < self.cost(next) {
                self.cost.set_point(next.point(), candidate);
                self.predecessors.set_point(next.point(), Some(current));
                improved(next, candidate);
            }
        }
    }
}

fn scan_cheapest_first<H>(grid: &Grid, layers: &mut Layers, target: Position, heuristic: H)
where
    H: Fn(Position) -> u32,
{
    loop {
        // Full scan for the unsettled cell with the lowest priority; the first one in
        // row-major order wins ties.
        let selected = grid
            .positions()
            .filter(|&p| !layers.is_settled(p) && layers.cost(p) != UNREACHED)
            .min_by_key(|&p| layers.cost(p).saturating_add(heuristic(p)));
        let Some(current) = selected else {
            break;
        };
        layers.settle(current);
        if current == target {
            break;
        }
        layers.relax(grid, current, |_, _| {});
    }
}

/// Heap entry for a cell reached at `cost`. The smallest `priority` pops first; on equal
/// priority the entry that has travelled further, being nearer the target, goes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Reached {
    priority: u32,
    cost: u32,
    pos: Position,
}

impl Ord for Reached {
    fn cmp(&self, other: &Reached) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Reached {
    fn partial_cmp(&self, other: &Reached) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heap_cheapest_first<H>(
    grid: &Grid,
    layers: &mut Layers,
    start: Position,
    target: Position,
    heuristic: H,
) where
    H: Fn(Position) -> u32,
{
    let mut frontier = BinaryHeap::from([Reached {
        priority: heuristic(start),
        cost: 0,
        pos: start,
    }]);
    while let Some(Reached { pos: current, .. }) = frontier.pop() {
        // A cell is pushed again whenever a cheaper way to it turns up; the cheapest entry
        // pops first and the rest are left over.
        if layers.is_settled(current) {
            continue;
        }
        layers.settle(current);
        if current == target {
            return;
        }
        layers.relax(grid, current, |next, cost| {
            frontier.push(Reached {
                priority: cost.saturating_add(heuristic(next)),
                cost,
                pos: next,
            })
        });
    }
    trace!(
        "Frontier exhausted after settling {} cells",
        layers.expanded.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::solver::bfs::BreadthFirstSolver;

    const SELECTIONS: [Selection; 2] = [Selection::LinearScan, Selection::BinaryHeap];

    #[test]
    fn heap_pops_cheapest_then_furthest() {
        let at = Position::new(0, 0);
        let mut frontier = BinaryHeap::from([
            Reached { priority: 5, cost: 1, pos: at },
            Reached { priority: 3, cost: 0, pos: at },
            Reached { priority: 3, cost: 2, pos: at },
        ]);
        let order = std::iter::from_fn(|| frontier.pop())
            .map(|r| (r.priority, r.cost))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![(3, 2), (3, 0), (5, 1)]);
    }

    /// A single weighted cell on the short route makes the long way round cheaper.
    #[test]
    fn detours_around_weight() {
        // S ~ T
        // . . .
        let grid: Grid = "S~T\n...".parse().unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(0, 2);
        for selection in SELECTIONS {
            let solver = DijkstraSolver::new(selection);
            let path = solver.get_path(&grid, start, target).unwrap();
            assert_eq!(path, [(1, 0), (1, 1), (1, 2)].map(Position::from));
            assert_eq!(solver.get_path_cost(&grid, start, &path, target), Some(4));
        }
        let hop_path = BreadthFirstSolver.get_path(&grid, start, target).unwrap();
        assert_eq!(grid.route_cost(start, &hop_path, target), Some(11));
    }

    /// When the detour is longer than the weight penalty the weighted cell is crossed.
    #[test]
    fn crosses_weight_when_cheaper() {
        // S ~ T
        // . # .
        // . # .
        // . # .
        // . # .
        // . . .
        let grid: Grid = "S~T\n.#.\n.#.\n.#.\n.#.\n...".parse().unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(0, 2);
        for selection in SELECTIONS {
            let path = DijkstraSolver::new(selection)
                .get_path(&grid, start, target)
                .unwrap();
            assert_eq!(path, vec![Position::new(0, 1)]);
        }
    }

    #[test]
    fn stops_once_target_is_settled() {
        // S T . . .
        let grid: Grid = "ST...".parse().unwrap();
        let exploration = DijkstraSolver::default()
            .explore(&grid, Position::new(0, 0), Position::new(0, 1))
            .unwrap();
        assert_eq!(exploration.path, Some(vec![]));
        assert_eq!(
            exploration.expanded,
            vec![Position::new(0, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn unreachable_target() {
        // S # T
        let grid: Grid = "S#T".parse().unwrap();
        let start = Position::new(0, 0);
        let target = Position::new(0, 2);
        for selection in SELECTIONS {
            let solver = DijkstraSolver::new(selection);
            assert_eq!(
                solver.get_path(&grid, start, target),
                Err(SearchError::NotFound { start, target })
            );
            let exploration = solver.explore(&grid, start, target).unwrap();
            assert_eq!(exploration.expanded, vec![start]);
        }
    }
}
