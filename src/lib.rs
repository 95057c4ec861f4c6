//! # grid_astar_trace
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on 4-connected obstacle grids that
//! records the complete internal state of the search at every expansion, so the run can be
//! replayed step by step afterwards.
//!
//! The pipeline is:
//! 1. a [Grid] of open (`0`) and blocked (`1`) cells is turned into a [GridGraph] by a
//!    [GridGraphBuilder], which also attaches the Manhattan distance to the goal to every node;
//! 2. an [AstarEngine] searches the graph and returns the optional path together with a
//!    [SearchTrace] holding one [SearchState] per expansion;
//! 3. [history::at] and [HistoryCursor] give clamped random access into the trace.
//!
//! Moves have unit cost and diagonals are not allowed. Ties between equal `f = g + h` are broken
//! in favour of the smaller node id, which makes traces fully reproducible.
//!
//! ```
//! use grid_astar_trace::{solve, Coord, Grid};
//!
//! let grid: Grid = "
//!     ...
//!     .#.
//!     ...
//! "
//! .parse()
//! .unwrap();
//! let solution = solve(&grid, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
//! assert_eq!(solution.outcome.cost(), Some(4));
//! assert_eq!(solution.path_coords().unwrap().last(), Some(&Coord::new(2, 2)));
//! ```
pub mod astar;
pub mod error;
pub mod grid;
pub mod grid_graph;
pub mod heuristic;
pub mod history;
pub mod mazes;
pub mod trace;

pub use crate::astar::{search, AstarEngine, SearchOutcome, SearchStatus};
pub use crate::error::{BuildError, GridError};
pub use crate::grid::{Coord, Grid};
pub use crate::grid_graph::{GridGraph, GridGraphBuilder, Node};
pub use crate::heuristic::{Heuristic, Manhattan};
pub use crate::history::HistoryCursor;
pub use crate::trace::{Equation, SearchState, SearchTrace};

use log::info;

/// Dense zero-based identifier of a traversable cell.
pub type NodeId = usize;
/// Path costs and heuristic estimates.
pub type Cost = u32;

/// Cost of every move between neighbouring cells.
pub const EDGE_COST: Cost = 1;
/// Marker of a traversable cell.
pub const OPEN: u8 = 0;
/// Marker of an obstacle.
pub const WALL: u8 = 1;

/// Everything produced by one run of [solve].
#[derive(Clone, Debug)]
pub struct Solution {
    pub graph: GridGraph,
    pub start: NodeId,
    pub goal: NodeId,
    pub outcome: SearchOutcome,
}

impl Solution {
    /// The found path as grid coordinates, start first.
    pub fn path_coords(&self) -> Option<Vec<Coord>> {
        self.outcome.path_coords(&self.graph)
    }

    pub fn history(&self) -> HistoryCursor {
        HistoryCursor::new(&self.outcome.trace)
    }
}

/// Builds the graph for `grid` and searches it from `start` to `goal`.
///
/// An unreachable goal is reported through [SearchOutcome::status], not as an error.
pub fn solve(grid: &Grid, start: Coord, goal: Coord) -> Result<Solution, BuildError> {
    let (graph, start_id, goal_id) = GridGraphBuilder::new(grid.clone()).build(start, goal)?;
    let outcome = search(&graph, start_id, goal_id);
    info!(
        "Search from {} to {} finished with {:?} after {} steps",
        start,
        goal,
        outcome.status(),
        outcome.trace.len()
    );
    Ok(Solution {
        graph,
        start: start_id,
        goal: goal_id,
        outcome,
    })
}
