use thiserror::Error;

use crate::grid::Position;

/// Reasons a start/target pair is rejected before any search work is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("{0} lies outside the grid")]
    OutOfBounds(Position),
    #[error("{0} is a wall")]
    Impassable(Position),
    #[error("start and target are both {0}")]
    SameEndpoints(Position),
}

/// Outcome of a search that did not produce a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid search input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// Every reachable cell was exhausted without meeting the target. This is an expected
    /// outcome on grids where walls separate the endpoints.
    #[error("no path from {start} to {target}")]
    NotFound { start: Position, target: Position },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },
    #[error("{0} lies outside the grid")]
    OutOfBounds(Position),
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell character {ch:?} at {position}")]
    UnknownCell { ch: char, position: Position },
    #[error("{0} already holds the other endpoint")]
    EndpointCollision(Position),
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum MazeError {
    /// Fewer than two cells can hold an endpoint. For random density and recursive division
    /// that is only the 1x1 grid. Randomized carving places endpoints on cells with an even row
    /// and column, so it needs three rows or three columns: 1x1, 1x2, 2x1 and 2x2 are too small.
    #[error("a {rows}x{cols} maze has no room for two distinct endpoints")]
    TooSmall { rows: usize, cols: usize },
    #[error("wall density must be within [0, 1], got {0}")]
    InvalidDensity(f64),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A strategy name that matches none of the known algorithms or maze strategies.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown strategy name {0:?}")]
pub struct UnknownStrategy(pub String);
