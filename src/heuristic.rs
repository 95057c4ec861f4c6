use crate::grid::Coord;
use crate::grid_graph::GridGraph;
use crate::Cost;

/// Estimates the remaining cost between two cells. The search is only optimal if the
/// estimate never exceeds the true cost.
pub trait Heuristic {
    fn estimate(&self, from: &Coord, goal: &Coord) -> Cost;
}

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), which is
/// admissible and consistent for unit-cost movement without diagonals.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

/// Coordinates without a [Point](grid_util::point::Point) form are estimated at [Cost::MAX].
impl Heuristic for Manhattan {
    fn estimate(&self, from: &Coord, goal: &Coord) -> Cost {
        from.manhattan_distance(goal)
            .map_or(Cost::MAX, |d| d.saturating_mul(crate::EDGE_COST))
    }
}

/// Manhattan distance from every node of `graph` to `goal`, indexed by node id.
pub fn compute(graph: &GridGraph, goal: Coord) -> Vec<Cost> {
    compute_with(graph, goal, &Manhattan)
}

pub fn compute_with<H: Heuristic>(graph: &GridGraph, goal: Coord, heuristic: &H) -> Vec<Cost> {
    graph
        .nodes()
        .map(|node| heuristic.estimate(&node.coord, &goal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_graph::GridGraphBuilder;

    struct Zero;

    impl Heuristic for Zero {
        fn estimate(&self, _: &Coord, _: &Coord) -> Cost {
            0
        }
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Coord::new(1, 7);
        let b = Coord::new(4, 2);
        assert_eq!(Manhattan.estimate(&a, &b), 8);
        assert_eq!(Manhattan.estimate(&b, &a), 8);
        assert_eq!(Manhattan.estimate(&a, &a), 0);
    }

    #[test]
    fn unrepresentable_coordinates_saturate() {
        let far = Coord::new(usize::MAX, 0);
        assert_eq!(Manhattan.estimate(&far, &Coord::new(0, 0)), Cost::MAX);
    }

    #[test]
    fn computes_one_value_per_node() {
        // |..#|
        // |...|
        let builder = GridGraphBuilder::new("..#\n...".parse().unwrap());
        let (graph, _, _) = builder.build(Coord::new(0, 0), Coord::new(1, 2)).unwrap();
        assert_eq!(compute(&graph, Coord::new(1, 2)), vec![3, 2, 2, 1, 0]);
        // Evaluated against another cell, the values are independent of the attached ones.
        assert_eq!(compute(&graph, Coord::new(0, 0)), vec![0, 1, 1, 2, 3]);
        assert_eq!(compute_with(&graph, Coord::new(1, 2), &Zero), vec![0; 5]);
    }

    /// Consistency: h(a) <= cost(a, b) + h(b) across every edge.
    #[test]
    fn attached_values_are_consistent() {
        let builder = GridGraphBuilder::new(".....\n.###.\n.#...\n...#.".parse().unwrap());
        let (graph, _, _) = builder.build(Coord::new(0, 0), Coord::new(2, 2)).unwrap();
        for node in graph.nodes() {
            for (other, cost) in graph.neighbours(node.id) {
                let h_other = graph.heuristic(other).unwrap();
                assert!(node.h <= cost + h_other);
            }
        }
    }
}
