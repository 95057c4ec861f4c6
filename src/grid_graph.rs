//! Conversion of an obstacle [Grid] into a graph over its traversable cells.
use crate::error::BuildError;
use crate::grid::{Coord, Grid};
use crate::heuristic;
use crate::{Cost, NodeId, EDGE_COST};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{info, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A traversable cell. `id` is dense and zero-based, assigned in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord,
    /// Estimated remaining cost to the goal the graph was built for.
    pub h: Cost,
}

/// Undirected unit-cost graph of the traversable cells of a [Grid], 4-connected.
///
/// Node ids coincide with the [NodeIndex] values of the underlying [UnGraph] and with the
/// insertion index of the coordinate in the lookup set.
#[derive(Clone, Debug)]
pub struct GridGraph {
    graph: UnGraph<Node, Cost>,
    index: FxIndexSet<Coord>,
    goal: Coord,
}

impl GridGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.node_count()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    pub fn coord(&self, id: NodeId) -> Option<Coord> {
        self.index.get_index(id).copied()
    }

    /// Looks up the node occupying a grid cell. Walls and out-of-range cells have none.
    pub fn node_id(&self, coord: Coord) -> Option<NodeId> {
        self.index.get_index_of(&coord)
    }

    /// The goal coordinate the heuristic values were computed against.
    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn heuristic(&self, id: NodeId) -> Option<Cost> {
        self.node(id).map(|n| n.h)
    }

    /// Neighbours of `id` with the edge cost, ordered by ascending node id.
    pub fn neighbours(&self, id: NodeId) -> Vec<(NodeId, Cost)> {
        let ix = NodeIndex::new(id);
        self.graph
            .edges(ix)
            .map(|e| {
                let other = if e.source() == ix { e.target() } else { e.source() };
                (other.index(), *e.weight())
            })
            .sorted_unstable()
            .collect()
    }

    pub fn edge_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Translates a sequence of node ids into grid coordinates.
    pub fn coords(&self, path: &[NodeId]) -> Option<Vec<Coord>> {
        path.iter().map(|&id| self.coord(id)).collect()
    }

    /// Checks that every consecutive pair of `path` is joined by an edge.
    pub fn is_connected_path(&self, path: &[NodeId]) -> bool {
        path.iter().all(|&id| self.contains(id))
            && path
                .iter()
                .tuple_windows()
                .all(|(&a, &b)| self.edge_cost(a, b).is_some())
    }

    pub(crate) fn set_heuristic(&mut self, values: &[Cost]) {
        for (node, &h) in self.graph.node_weights_mut().zip(values) {
            node.h = h;
        }
    }
}

/// Owns a [Grid] and turns it into [GridGraph]s for given start and goal cells.
#[derive(Clone, Debug)]
pub struct GridGraphBuilder {
    grid: Grid,
}

impl GridGraphBuilder {
    pub fn new(grid: Grid) -> GridGraphBuilder {
        GridGraphBuilder { grid }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Builds the graph of traversable cells and resolves `start` and `goal` to node ids.
    /// Heuristic values towards `goal` are attached to every node before returning.
    ///
    /// Nodes are created in a first row-major pass and edges in a second one, so every edge
    /// refers to an existing node.
    pub fn build(
        &self,
        start: Coord,
        goal: Coord,
    ) -> Result<(GridGraph, NodeId, NodeId), BuildError> {
        let grid = &self.grid;
        if !grid.is_traversable(start) || !grid.is_traversable(goal) {
            warn!("Rejecting build: {} or {} is not an open cell", start, goal);
            return Err(BuildError::PositionInWallOrOutOfBounds { start, goal });
        }

        let mut graph: UnGraph<Node, Cost> = UnGraph::default();
        let mut index = FxIndexSet::default();
        for coord in grid.open_cells() {
            let (id, _) = index.insert_full(coord);
            let ix = graph.add_node(Node { id, coord, h: 0 });
            debug_assert_eq!(ix.index(), id);
        }
        for (id, coord) in index.iter().enumerate() {
            for neighbour in grid.open_neighbours(*coord) {
                if let Some(other) = index.get_index_of(&neighbour) {
                    // Each undirected edge is added from its lower id endpoint only.
                    if other > id {
                        graph.add_edge(NodeIndex::new(id), NodeIndex::new(other), EDGE_COST);
                    }
                }
            }
        }

        let mut grid_graph = GridGraph { graph, index, goal };
        let values = heuristic::compute(&grid_graph, goal);
        grid_graph.set_heuristic(&values);

        let (Some(start_id), Some(goal_id)) = (grid_graph.node_id(start), grid_graph.node_id(goal))
        else {
            return Err(BuildError::PositionInWallOrOutOfBounds { start, goal });
        };
        info!(
            "Built grid graph with {} nodes and {} edges",
            grid_graph.node_count(),
            grid_graph.edge_count()
        );
        Ok((grid_graph, start_id, goal_id))
    }
}
