//! Potential-based cost reduction (Johnson reweighting).
//!
//! With `dist` the shortest distances from the source, every edge gets
//! `cost' = cost + dist(u) - dist(v)`. Shortest-path optimality makes this
//! non-negative, and zero on every edge of a shortest path from the source.

use crate::algorithm::PotentialMap;
use crate::graph::directed::DirectedGraph;
use crate::graph::split::{NodeRef, SplitGraph};
use crate::graph::traits::{Graph, MutableGraph};
use crate::graph::weighted::WeightedDigraph;

/// Default tolerance under which reduced costs are snapped to zero
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Split graph with edge costs replaced by reduced costs
#[derive(Debug, Clone)]
pub struct ReducedCostGraph<'g> {
    base: &'g DirectedGraph,
    graph: WeightedDigraph<NodeRef>,
    anomalies: usize,
}

impl<'g> ReducedCostGraph<'g> {
    /// Number of edges whose reduced cost fell below `-epsilon` and was clamped
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// The reduced adjacency
    pub fn inner(&self) -> &WeightedDigraph<NodeRef> {
        &self.graph
    }

    /// The original graph this was derived from
    pub fn base(&self) -> &'g DirectedGraph {
        self.base
    }

    /// Returns true if no edge carries a negative cost
    pub fn edges_non_negative(&self) -> bool {
        self.graph.edges().all(|(_, _, cost)| cost >= 0.0)
    }
}

impl Graph for ReducedCostGraph<'_> {
    type Node = NodeRef;

    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = NodeRef> + '_> {
        self.graph.vertices()
    }

    fn outgoing_edges(&self, vertex: NodeRef) -> Box<dyn Iterator<Item = (NodeRef, f64)> + '_> {
        self.graph.outgoing_edges(vertex)
    }

    fn has_vertex(&self, vertex: NodeRef) -> bool {
        self.graph.has_vertex(vertex)
    }

    fn get_edge_weight(&self, from: NodeRef, to: NodeRef) -> Option<f64> {
        self.graph.get_edge_weight(from, to)
    }

    fn label(&self, vertex: NodeRef) -> String {
        vertex.label(self.base)
    }
}

impl MutableGraph for ReducedCostGraph<'_> {
    fn add_vertex(&mut self, vertex: NodeRef) -> bool {
        self.graph.add_vertex(vertex)
    }

    fn add_edge(&mut self, from: NodeRef, to: NodeRef, weight: f64) {
        self.graph.add_edge(from, to, weight);
    }

    fn remove_edge(&mut self, from: NodeRef, to: NodeRef) -> Option<f64> {
        self.graph.remove_edge(from, to)
    }
}

/// Reduced cost of a single edge.
///
/// Returns the cost and whether it was a numeric anomaly (below `-epsilon`).
/// Values within `epsilon` of zero become exactly zero; an unreachable
/// endpoint gives `+inf`.
pub fn reduced_cost(cost: f64, dist_u: f64, dist_v: f64, epsilon: f64) -> (f64, bool) {
    if !dist_u.is_finite() || !dist_v.is_finite() {
        return (f64::INFINITY, false);
    }
    let reduced = cost + dist_u - dist_v;
    if reduced < -epsilon {
        (0.0, true)
    } else if reduced.abs() <= epsilon {
        (0.0, false)
    } else {
        (reduced, false)
    }
}

/// Rewrites every edge of `split_graph` with its reduced cost under `potentials`.
pub fn reduce<'g>(
    split_graph: &SplitGraph<'g>,
    potentials: &PotentialMap<NodeRef>,
    epsilon: f64,
) -> ReducedCostGraph<'g> {
    let mut graph = WeightedDigraph::new();
    let mut anomalies = 0;

    for vertex in split_graph.vertices() {
        graph.add_vertex(vertex);
    }

    for (u, v, cost) in split_graph.inner().edges() {
        let (reduced, anomalous) =
            reduced_cost(cost, potentials.potential(u), potentials.potential(v), epsilon);
        if anomalous {
            anomalies += 1;
            log::warn!(
                "negative reduced cost on {} -> {}: {} + {} - {}; clamped to 0",
                split_graph.label(u),
                split_graph.label(v),
                cost,
                potentials.potential(u),
                potentials.potential(v)
            );
        }
        graph.add_edge(u, v, reduced);
    }

    ReducedCostGraph {
        base: split_graph.base(),
        graph,
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::transform::transform;
    use crate::algorithm::{Dijkstra, ShortestPathAlgorithm};
    use crate::build_graph;
    use crate::graph::split::split;
    use std::collections::BTreeSet;

    #[test]
    fn tiny_negative_is_clamped_silently() {
        assert_eq!(reduced_cost(1.0, 0.0, 1.0 + 1e-10, DEFAULT_EPSILON), (0.0, false));
    }

    #[test]
    fn large_negative_is_an_anomaly() {
        assert_eq!(reduced_cost(1.0, 0.0, 1.5, DEFAULT_EPSILON), (0.0, true));
    }

    #[test]
    fn unreachable_endpoint_is_infinite() {
        let (cost, anomalous) = reduced_cost(1.0, f64::INFINITY, 2.0, DEFAULT_EPSILON);
        assert!(cost.is_infinite());
        assert!(!anomalous);
    }

    #[test]
    fn shortest_path_tree_edges_become_zero() {
        let g = build_graph([
            ("s", "a", 1.0),
            ("a", "t", 1.0),
            ("s", "b", 2.0),
            ("b", "t", 2.0),
            ("x", "s", 1.0),
        ])
        .unwrap();
        let id = |n: &str| g.node_id(n).unwrap();
        let split_set = BTreeSet::from([id("s"), id("a"), id("t")]);
        let sg = split(&g, &split_set);
        let (s, t) = sg.endpoints(id("s"), id("t"));
        let tree = Dijkstra::new().compute_shortest_paths(&sg, s).unwrap();
        let reduced = reduce(&sg, &tree.potentials, DEFAULT_EPSILON);

        assert_eq!(reduced.anomalies(), 0);
        let path = tree.path_to(t).unwrap();
        for hop in path.windows(2) {
            assert_eq!(reduced.get_edge_weight(hop[0], hop[1]), Some(0.0));
        }
        // s/out -> b -> t/in costs 4 against a distance of 2
        assert_eq!(reduced.get_edge_weight(NodeRef::SplitOut(id("s")), NodeRef::Original(id("b"))), Some(0.0));
        assert_eq!(reduced.get_edge_weight(NodeRef::Original(id("b")), NodeRef::SplitIn(id("t"))), Some(2.0));
        // x is never reached from s
        let from_x = reduced.get_edge_weight(NodeRef::Original(id("x")), NodeRef::SplitIn(id("s")));
        assert!(from_x.unwrap().is_infinite());
        assert!(reduced.edges_non_negative());
    }

    #[test]
    fn drifted_potentials_are_clamped_per_edge() {
        let g = build_graph([("s", "a", 1.0), ("a", "t", 1.0), ("s", "b", 2.0), ("b", "t", 2.0)]).unwrap();
        let id = |n: &str| g.node_id(n).unwrap();
        let (s, a, b, t) = (id("s"), id("a"), id("b"), id("t"));
        let sg = split(&g, &BTreeSet::from([s, a, t]));

        // s/out -> b reduces to about -1e-10, a/out -> t/in to about -1e-6
        let potentials: PotentialMap<NodeRef> = [
            (NodeRef::SplitIn(s), 0.0),
            (NodeRef::SplitOut(s), 0.0),
            (NodeRef::SplitIn(a), 1.0),
            (NodeRef::SplitOut(a), 1.0),
            (NodeRef::Original(b), 2.0 + 1e-10),
            (NodeRef::SplitIn(t), 2.0 + 1e-6),
            (NodeRef::SplitOut(t), 2.0 + 1e-6),
        ]
        .into_iter()
        .collect();
        let mut reduced = reduce(&sg, &potentials, DEFAULT_EPSILON);

        assert_eq!(reduced.get_edge_weight(NodeRef::SplitOut(s), NodeRef::Original(b)), Some(0.0));
        assert_eq!(reduced.get_edge_weight(NodeRef::SplitOut(a), NodeRef::SplitIn(t)), Some(0.0));
        assert_eq!(reduced.anomalies(), 1);
        assert!(reduced.edges_non_negative());

        let primary = sg.resolver().split_path(&[s, a, t]);
        transform(&mut reduced, sg.resolver(), &primary);
        let (from, to) = sg.endpoints(s, t);
        let second = Dijkstra::new().shortest_path(&reduced, from, to).unwrap();
        assert_eq!(second, vec![NodeRef::SplitOut(s), NodeRef::Original(b), NodeRef::SplitIn(t)]);
    }
}
