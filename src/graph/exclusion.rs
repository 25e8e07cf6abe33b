use std::collections::HashSet;

use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::traits::Graph;

/// A read-only view of a [`DirectedGraph`] with some nodes and edges hidden.
///
/// The underlying graph is never copied or modified.
#[derive(Debug, Clone)]
pub struct ExclusionView<'g> {
    base: &'g DirectedGraph,
    excluded_nodes: HashSet<NodeId>,
    excluded_edges: HashSet<(NodeId, NodeId)>,
}

impl<'g> ExclusionView<'g> {
    /// A view hiding nothing
    pub fn new(base: &'g DirectedGraph) -> Self {
        Self {
            base,
            excluded_nodes: HashSet::new(),
            excluded_edges: HashSet::new(),
        }
    }

    /// Hides a node and every edge touching it
    pub fn exclude_node(&mut self, node: NodeId) -> &mut Self {
        self.excluded_nodes.insert(node);
        self
    }

    /// Hides the directed edge `from -> to`
    pub fn exclude_edge(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        self.excluded_edges.insert((from, to));
        self
    }

    /// Hides both directions of a link
    pub fn exclude_link(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.exclude_edge(a, b).exclude_edge(b, a)
    }

    /// The graph being viewed
    pub fn base(&self) -> &'g DirectedGraph {
        self.base
    }

    fn node_visible(&self, node: NodeId) -> bool {
        !self.excluded_nodes.contains(&node)
    }

    fn edge_visible(&self, from: NodeId, to: NodeId) -> bool {
        self.node_visible(from) && self.node_visible(to) && !self.excluded_edges.contains(&(from, to))
    }
}

impl Graph for ExclusionView<'_> {
    type Node = NodeId;

    fn vertex_count(&self) -> usize {
        self.base.node_ids().filter(|&v| self.node_visible(v)).count()
    }

    fn edge_count(&self) -> usize {
        self.base
            .edges()
            .filter(|&(u, v, _)| self.edge_visible(u, v))
            .count()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.base.node_ids().filter(move |&v| self.node_visible(v)))
    }

    fn outgoing_edges(&self, vertex: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_> {
        if !self.node_visible(vertex) {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.base
                .outgoing_edges(vertex)
                .filter(move |&(v, _)| self.edge_visible(vertex, v)),
        )
    }

    fn has_vertex(&self, vertex: NodeId) -> bool {
        self.base.has_vertex(vertex) && self.node_visible(vertex)
    }

    fn get_edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if !self.edge_visible(from, to) {
            return None;
        }
        self.base.get_edge_weight(from, to)
    }

    fn label(&self, vertex: NodeId) -> String {
        self.base.label(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;

    #[test]
    fn exclusions_hide_without_touching_base() {
        let g = build_graph([("a", "b", 1.0), ("b", "a", 1.0), ("b", "c", 1.0), ("a", "c", 5.0)]).unwrap();
        let id = |n: &str| g.node_id(n).unwrap();

        let mut view = ExclusionView::new(&g);
        view.exclude_link(id("a"), id("b"));
        assert!(!view.has_edge(id("a"), id("b")));
        assert!(!view.has_edge(id("b"), id("a")));
        assert!(view.has_edge(id("b"), id("c")));

        view.exclude_node(id("c"));
        assert!(!view.has_vertex(id("c")));
        assert_eq!(view.outgoing_edges(id("a")).count(), 0);
        assert_eq!(view.edge_count(), 0);

        assert_eq!(g.edge_count(), 4);
        assert!(g.has_edge(id("a"), id("b")));
    }
}
