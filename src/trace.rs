//! Step-indexed snapshots of the search state, recorded for later replay.
use crate::grid_graph::GridGraph;
use crate::{Cost, NodeId};
use core::fmt;
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of the search at the moment one node was taken off the open set.
///
/// `current`, `open_set`, `closed_set`, `path` and the score tables all describe the same
/// instant, and nothing in a recorded state changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchState {
    pub(crate) step: usize,
    pub(crate) current: NodeId,
    pub(crate) open_set: Vec<NodeId>,
    pub(crate) closed_set: Vec<NodeId>,
    pub(crate) path: Vec<NodeId>,
    pub(crate) g: Vec<Option<Cost>>,
    pub(crate) f: Vec<Option<Cost>>,
}

impl SearchState {
    /// 1-based position in the trace.
    pub fn step(&self) -> usize {
        self.step
    }

    /// The node being expanded.
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Discovered nodes waiting for expansion, in the order they would be taken.
    pub fn open_set(&self) -> &[NodeId] {
        &self.open_set
    }

    /// Expanded nodes, by ascending id. The final state of a successful search lists the goal last.
    pub fn closed_set(&self) -> &[NodeId] {
        &self.closed_set
    }

    /// Best known route from the start to [current](Self::current), both included.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Best known cost from the start, [None] while `id` is unreached.
    pub fn g(&self, id: NodeId) -> Option<Cost> {
        self.g.get(id).copied().flatten()
    }

    /// `g + h`, [None] while `id` is unreached.
    pub fn f(&self, id: NodeId) -> Option<Cost> {
        self.f.get(id).copied().flatten()
    }

    pub fn g_scores(&self) -> &[Option<Cost>] {
        &self.g
    }

    pub fn f_scores(&self) -> &[Option<Cost>] {
        &self.f
    }

    pub fn is_open(&self, id: NodeId) -> bool {
        self.open_set.contains(&id)
    }

    pub fn is_closed(&self, id: NodeId) -> bool {
        self.closed_set.contains(&id)
    }

    /// The `F(n) = G(n) + H(n)` breakdown for the current node.
    pub fn equation(&self, graph: &GridGraph) -> Option<Equation> {
        Some(Equation {
            step: self.step,
            node: self.current,
            g: self.g(self.current)?,
            h: graph.heuristic(self.current)?,
            f: self.f(self.current)?,
        })
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Step {}: expanding {}", self.step, self.current)?;
        writeln!(f, "open:   [{}]", self.open_set.iter().join(", "))?;
        writeln!(f, "closed: [{}]", self.closed_set.iter().join(", "))?;
        writeln!(f, "path:   [{}]", self.path.iter().join(" -> "))
    }
}

/// One row of the equation history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    pub step: usize,
    pub node: NodeId,
    pub g: Cost,
    pub h: Cost,
    pub f: Cost,
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F({}) = {} + {} = {}", self.node, self.g, self.h, self.f)
    }
}

/// Ordered snapshots of one search run. The first entry is the expansion of the start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchTrace {
    states: Vec<SearchState>,
}

impl SearchTrace {
    pub(crate) fn push(&mut self, state: SearchState) {
        debug_assert_eq!(state.step, self.states.len() + 1);
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The state with 1-based index `step`.
    pub fn get(&self, step: usize) -> Option<&SearchState> {
        step.checked_sub(1).and_then(|i| self.states.get(i))
    }

    pub fn first(&self) -> Option<&SearchState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&SearchState> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchState> {
        self.states.iter()
    }

    pub fn states(&self) -> &[SearchState] {
        &self.states
    }

    /// The equation history, one row per recorded state.
    pub fn equations(&self, graph: &GridGraph) -> Vec<Equation> {
        self.states
            .iter()
            .filter_map(|s| s.equation(graph))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SearchTrace {
    type Item = &'a SearchState;
    type IntoIter = std::slice::Iter<'a, SearchState>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(step: usize) -> SearchState {
        SearchState {
            step,
            current: 2,
            open_set: vec![3, 1],
            closed_set: vec![0],
            path: vec![0, 2],
            g: vec![Some(0), Some(1), Some(1), Some(2)],
            f: vec![Some(4), Some(5), Some(4), Some(4)],
        }
    }

    #[test]
    fn state_accessors() {
        let s = state(1);
        assert_eq!(s.g(3), Some(2));
        assert_eq!(s.f(1), Some(5));
        assert_eq!(s.g(10), None);
        assert!(s.is_open(1));
        assert!(!s.is_open(2));
        assert!(s.is_closed(0));
        assert_eq!(
            s.to_string(),
            "Step 1: expanding 2\nopen:   [3, 1]\nclosed: [0]\npath:   [0 -> 2]\n"
        );
    }

    #[test]
    fn trace_is_one_based() {
        let mut trace = SearchTrace::default();
        assert!(trace.is_empty());
        trace.push(state(1));
        trace.push(state(2));
        assert_eq!(trace.len(), 2);
        assert!(trace.get(0).is_none());
        assert_eq!(trace.get(1).map(|s| s.step()), Some(1));
        assert_eq!(trace.get(2).map(|s| s.step()), Some(2));
        assert!(trace.get(3).is_none());
        assert_eq!(trace.iter().count(), 2);
    }

    #[test]
    fn equation_display() {
        let eq = Equation {
            step: 3,
            node: 7,
            g: 2,
            h: 5,
            f: 7,
        };
        assert_eq!(eq.to_string(), "F(7) = 2 + 5 = 7");
    }
}
