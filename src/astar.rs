//! A* over a [GridGraph] that records a [SearchState] for every expansion.
//!
//! The open set is a [BinaryHeap] ordered by `(f, id)`: the smallest estimated cost is
//! expanded first and equal estimates go to the smallest node id. Improving a node that
//! is already open pushes a new entry; the superseded one is skipped when popped, so the
//! logical open set never holds a node twice.
use crate::grid::Coord;
use crate::grid_graph::GridGraph;
use crate::trace::{SearchState, SearchTrace};
use crate::{Cost, NodeId};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

struct SmallestCostHolder {
    estimated_cost: Cost,
    id: NodeId,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.id == other.id
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest estimate, then the smallest id
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStatus {
    /// The goal was expanded.
    Success,
    /// The open set ran empty first: the goal cannot be reached from the start.
    Exhausted,
}

/// The optional path and the full trace of one search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub path: Option<Vec<NodeId>>,
    pub trace: SearchTrace,
}

impl SearchOutcome {
    pub fn status(&self) -> SearchStatus {
        if self.path.is_some() {
            SearchStatus::Success
        } else {
            SearchStatus::Exhausted
        }
    }

    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    /// Cost of the found path, i.e. the number of moves.
    pub fn cost(&self) -> Option<Cost> {
        self.path
            .as_ref()
            .and_then(|p| Cost::try_from(p.len().saturating_sub(1)).ok())
    }

    pub fn path_coords(&self, graph: &GridGraph) -> Option<Vec<Coord>> {
        self.path.as_deref().and_then(|p| graph.coords(p))
    }

    pub fn into_parts(self) -> (Option<Vec<NodeId>>, SearchTrace) {
        (self.path, self.trace)
    }
}

/// Runs A* searches over a borrowed [GridGraph].
#[derive(Clone, Copy, Debug)]
pub struct AstarEngine<'a> {
    graph: &'a GridGraph,
}

/// Working tables of a single run.
struct Scores {
    g: Vec<Option<Cost>>,
    f: Vec<Option<Cost>>,
    parents: Vec<Option<NodeId>>,
    open: Vec<bool>,
    closed: Vec<bool>,
}

impl Scores {
    fn new(n: usize) -> Scores {
        Scores {
            g: vec![None; n],
            f: vec![None; n],
            parents: vec![None; n],
            open: vec![false; n],
            closed: vec![false; n],
        }
    }

    /// Open nodes in the order the heap would yield them.
    fn open_set(&self) -> Vec<NodeId> {
        let mut open = (0..self.open.len())
            .filter(|&id| self.open[id])
            .collect::<Vec<_>>();
        open.sort_by_key(|&id| (self.f[id], id));
        open
    }

    fn closed_set(&self) -> Vec<NodeId> {
        (0..self.closed.len()).filter(|&id| self.closed[id]).collect()
    }

    fn snapshot(&self, step: usize, current: NodeId) -> SearchState {
        SearchState {
            step,
            current,
            open_set: self.open_set(),
            closed_set: self.closed_set(),
            path: reverse_path(&self.parents, current),
            g: self.g.clone(),
            f: self.f.clone(),
        }
    }
}

/// Follows back-pointers from `end` to the node without one, the start of the search.
fn reverse_path(parents: &[Option<NodeId>], end: NodeId) -> Vec<NodeId> {
    let mut path = std::iter::successors(Some(end), |&node| parents[node]).collect::<Vec<_>>();
    path.reverse();
    path
}

impl<'a> AstarEngine<'a> {
    pub fn new(graph: &'a GridGraph) -> AstarEngine<'a> {
        AstarEngine { graph }
    }

    pub fn graph(&self) -> &'a GridGraph {
        self.graph
    }

    /// Searches a shortest path from `start` to `goal`, recording one [SearchState] per
    /// expansion. An unreachable goal yields a [None] path with the trace intact.
    ///
    /// # Panics
    /// If `start` or `goal` is not a node of the graph.
    pub fn search(&self, start: NodeId, goal: NodeId) -> SearchOutcome {
        let graph = self.graph;
        assert!(graph.contains(start), "start node {start} is not in the graph");
        assert!(graph.contains(goal), "goal node {goal} is not in the graph");
        let h = |id: NodeId| graph.heuristic(id).unwrap_or_default();

        let mut scores = Scores::new(graph.node_count());
        let mut to_see = BinaryHeap::new();
        let mut trace = SearchTrace::default();

        scores.g[start] = Some(0);
        scores.f[start] = Some(h(start));
        scores.open[start] = true;
        to_see.push(SmallestCostHolder {
            estimated_cost: h(start),
            id: start,
        });
        info!("Searching from node {} to node {}", start, goal);

        while let Some(SmallestCostHolder { estimated_cost, id: current }) = to_see.pop() {
            // Open nodes always carry a g, so this only skips superseded heap entries
            let current_g = match scores.g[current] {
                Some(g) if scores.open[current] && scores.f[current] == Some(estimated_cost) => g,
                _ => continue,
            };
            scores.open[current] = false;

            let state = scores.snapshot(trace.len() + 1, current);
            debug!(
                "Step {}: expanding {} with f = {}",
                state.step, current, estimated_cost
            );
            trace.push(state);
            scores.closed[current] = true;

            if current == goal {
                let path = reverse_path(&scores.parents, current);
                if current != start {
                    let mut closed_set = trace
                        .last()
                        .map(|s| s.closed_set.clone())
                        .unwrap_or_default();
                    closed_set.push(current);
                    trace.push(SearchState {
                        step: trace.len() + 1,
                        current,
                        open_set: Vec::new(),
                        closed_set,
                        path: path.clone(),
                        g: scores.g.clone(),
                        f: scores.f.clone(),
                    });
                }
                info!(
                    "Reached node {} at cost {} after {} steps",
                    goal,
                    current_g,
                    trace.len()
                );
                return SearchOutcome {
                    path: Some(path),
                    trace,
                };
            }

            for (neighbour, move_cost) in graph.neighbours(current) {
                let tentative = current_g.saturating_add(move_cost);
                if scores.g[neighbour].map_or(true, |g| tentative < g) {
                    let f = tentative.saturating_add(h(neighbour));
                    scores.parents[neighbour] = Some(current);
                    scores.g[neighbour] = Some(tentative);
                    scores.f[neighbour] = Some(f);
                    scores.closed[neighbour] = false;
                    scores.open[neighbour] = true;
                    to_see.push(SmallestCostHolder {
                        estimated_cost: f,
                        id: neighbour,
                    });
                }
            }
        }
        info!(
            "Node {} is unreachable from node {}, search exhausted after {} steps",
            goal,
            start,
            trace.len()
        );
        SearchOutcome { path: None, trace }
    }
}

/// Shorthand for [AstarEngine::search].
pub fn search(graph: &GridGraph, start: NodeId, goal: NodeId) -> SearchOutcome {
    AstarEngine::new(graph).search(start, goal)
}
