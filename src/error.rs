use crate::grid::Coord;
use thiserror::Error;

/// Reasons a set of rows cannot form a [Grid](crate::grid::Grid).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell marker {marker} at ({row}, {col})")]
    InvalidMarker { row: usize, col: usize, marker: u8 },
    #[error("invalid character {ch:?} at ({row}, {col})")]
    InvalidChar { row: usize, col: usize, ch: char },
    #[error("{rows}x{cols} grid is too large to search")]
    TooLarge { rows: usize, cols: usize },
}

/// Raised by [GridGraphBuilder](crate::grid_graph::GridGraphBuilder) when the requested endpoints
/// do not name traversable cells. Retrying cannot help: the grid itself must change.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("start {start} or goal {goal} is inside a wall or out of bounds")]
    PositionInWallOrOutOfBounds { start: Coord, goal: Coord },
}
