//! Random access into a finished [SearchTrace] for step-by-step replay.
//!
//! Steps are 1-based. Requests outside the trace are clamped to its first or last state
//! instead of failing, so a replay control can never step off either end.
use crate::trace::{SearchState, SearchTrace};

/// Restricts `step` to `lo..=hi`. If the range is empty, `lo` wins.
pub fn clamp(step: usize, lo: usize, hi: usize) -> usize {
    step.min(hi).max(lo)
}

/// The state at `step`, clamped into `1..=trace.len()`. [None] only for an empty trace;
/// traces returned by the search always hold at least one state.
pub fn at(trace: &SearchTrace, step: usize) -> Option<&SearchState> {
    let last = trace.len().checked_sub(1)?;
    trace.states().get(clamp(step, 1, last + 1) - 1)
}

/// Replay position over a trace of known length. The caller owns the cursor, so any number
/// of independent replays can run over one trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryCursor {
    step: usize,
    len: usize,
}

impl HistoryCursor {
    /// A cursor on the first state of `trace`.
    pub fn new(trace: &SearchTrace) -> HistoryCursor {
        HistoryCursor {
            step: 1,
            len: trace.len().max(1),
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_first(&self) -> bool {
        self.step == 1
    }

    pub fn is_last(&self) -> bool {
        self.step == self.len
    }

    pub fn seek(&mut self, step: usize) -> usize {
        self.step = clamp(step, 1, self.len);
        self.step
    }

    pub fn next(&mut self) -> usize {
        self.seek(self.step + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.seek(self.step.saturating_sub(1))
    }

    pub fn rewind(&mut self) -> usize {
        self.seek(1)
    }

    pub fn fast_forward(&mut self) -> usize {
        self.seek(self.len)
    }

    pub fn state<'t>(&self, trace: &'t SearchTrace) -> Option<&'t SearchState> {
        at(trace, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::search;
    use crate::grid::Coord;
    use crate::grid_graph::GridGraphBuilder;

    fn trace() -> SearchTrace {
        let builder = GridGraphBuilder::new("....\n.##.\n....".parse().unwrap());
        let (graph, start, goal) = builder.build(Coord::new(0, 0), Coord::new(2, 3)).unwrap();
        search(&graph, start, goal).trace
    }

    #[test]
    fn clamps_into_range() {
        assert_eq!(clamp(0, 1, 5), 1);
        assert_eq!(clamp(3, 1, 5), 3);
        assert_eq!(clamp(9, 1, 5), 5);
        assert_eq!(clamp(4, 1, 0), 1);
    }

    #[test]
    fn at_clamps_out_of_range_steps() {
        let trace = trace();
        let n = trace.len();
        let step_at = |step| at(&trace, step).map(SearchState::step);
        assert_eq!(step_at(0), Some(1));
        assert_eq!(step_at(1), Some(1));
        assert_eq!(step_at(2), Some(2));
        assert_eq!(step_at(n), Some(n));
        assert_eq!(step_at(n + 100), Some(n));
    }

    #[test]
    fn empty_trace_has_no_states() {
        let empty = SearchTrace::default();
        assert_eq!(at(&empty, 0), None);
        assert_eq!(at(&empty, 3), None);
        let mut cursor = HistoryCursor::new(&empty);
        assert_eq!(cursor.fast_forward(), 1);
        assert_eq!(cursor.state(&empty), None);
    }

    #[test]
    fn cursor_walks_the_trace() {
        let trace = trace();
        let n = trace.len();
        let mut cursor = HistoryCursor::new(&trace);
        assert!(cursor.is_first());
        assert_eq!(cursor.prev(), 1);
        assert_eq!(cursor.next(), 2);
        assert_eq!(cursor.state(&trace).map(SearchState::step), Some(2));
        assert_eq!(cursor.fast_forward(), n);
        assert!(cursor.is_last());
        assert_eq!(cursor.next(), n);
        assert_eq!(cursor.prev(), n - 1);
        assert_eq!(cursor.rewind(), 1);
        assert_eq!(cursor.seek(n + 3), n);
        assert_eq!(cursor.state(&trace), trace.last());
    }

    #[test]
    fn cursors_are_independent() {
        let trace = trace();
        let mut a = HistoryCursor::new(&trace);
        let b = HistoryCursor::new(&trace);
        a.fast_forward();
        assert_eq!(b.step(), 1);
        assert_ne!(a.state(&trace), b.state(&trace));
    }
}
