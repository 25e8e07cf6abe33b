//! Node splitting.
//!
//! A split node `A` is replaced by `SplitIn(A)` and `SplitOut(A)` joined by a
//! single zero-cost arc. Two arc-disjoint paths through the split graph can
//! then never share `A`, because both would need that one internal arc.

use std::collections::BTreeSet;
use std::fmt;

use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::traits::{Graph, MutableGraph};
use crate::graph::weighted::WeightedDigraph;

/// Node of a split graph, carrying the original handle as data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// Node that was not split
    Original(NodeId),
    /// Entry half of a split node
    SplitIn(NodeId),
    /// Exit half of a split node
    SplitOut(NodeId),
}

impl NodeRef {
    /// The original node this reference stands for
    pub fn original(self) -> NodeId {
        match self {
            NodeRef::Original(id) | NodeRef::SplitIn(id) | NodeRef::SplitOut(id) => id,
        }
    }

    /// Node name in `base`, tagged with the half for split nodes
    pub fn label(self, base: &DirectedGraph) -> String {
        let name = base.name(self.original());
        match self {
            NodeRef::Original(_) => name.to_string(),
            NodeRef::SplitIn(_) => format!("{name} (in)"),
            NodeRef::SplitOut(_) => format!("{name} (out)"),
        }
    }

    fn key(self) -> (NodeId, u8) {
        match self {
            NodeRef::Original(id) => (id, 0),
            NodeRef::SplitIn(id) => (id, 1),
            NodeRef::SplitOut(id) => (id, 2),
        }
    }
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Original(id) => write!(f, "#{}", id.index()),
            NodeRef::SplitIn(id) => write!(f, "#{}/in", id.index()),
            NodeRef::SplitOut(id) => write!(f, "#{}/out", id.index()),
        }
    }
}

/// Maps between original nodes and split-graph references
#[derive(Debug, Clone, Default)]
pub struct SplitResolver {
    split_set: BTreeSet<NodeId>,
}

impl SplitResolver {
    /// Resolver for the given set of split nodes
    pub fn new(split_set: BTreeSet<NodeId>) -> Self {
        Self { split_set }
    }

    /// Returns true if the node was split
    pub fn is_split(&self, node: NodeId) -> bool {
        self.split_set.contains(&node)
    }

    /// Reference through which edges leave `node`
    pub fn out_ref(&self, node: NodeId) -> NodeRef {
        if self.is_split(node) {
            NodeRef::SplitOut(node)
        } else {
            NodeRef::Original(node)
        }
    }

    /// Reference through which edges enter `node`
    pub fn in_ref(&self, node: NodeId) -> NodeRef {
        if self.is_split(node) {
            NodeRef::SplitIn(node)
        } else {
            NodeRef::Original(node)
        }
    }

    /// Maps an original path into split space, traversing the internal arc
    /// of every split interior node.
    pub fn split_path(&self, path: &[NodeId]) -> Vec<NodeRef> {
        let mut result = Vec::with_capacity(path.len() * 2);
        for (i, &node) in path.iter().enumerate() {
            let first = i == 0;
            let last = i + 1 == path.len();
            if !first {
                result.push(self.in_ref(node));
            }
            if !last && (first || self.is_split(node)) {
                result.push(self.out_ref(node));
            }
        }
        if path.len() == 1 {
            result.push(self.out_ref(path[0]));
        }
        result.dedup();
        result
    }

    /// Maps a split-graph path back to original nodes, collapsing the halves
    /// of a split node into one occurrence.
    pub fn unsplit_path(&self, path: &[NodeRef]) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = path.iter().map(|r| r.original()).collect();
        result.dedup();
        result
    }
}

/// Graph in which the nodes of a split set are split into in/out halves
#[derive(Debug, Clone)]
pub struct SplitGraph<'g> {
    base: &'g DirectedGraph,
    graph: WeightedDigraph<NodeRef>,
    resolver: SplitResolver,
}

impl<'g> SplitGraph<'g> {
    /// The original graph this was derived from
    pub fn base(&self) -> &'g DirectedGraph {
        self.base
    }

    /// The split-graph adjacency
    pub fn inner(&self) -> &WeightedDigraph<NodeRef> {
        &self.graph
    }

    /// Reference resolver for this split
    pub fn resolver(&self) -> &SplitResolver {
        &self.resolver
    }

    /// Search endpoints in split space for an original source/destination
    pub fn endpoints(&self, source: NodeId, target: NodeId) -> (NodeRef, NodeRef) {
        (self.resolver.out_ref(source), self.resolver.in_ref(target))
    }
}

impl Graph for SplitGraph<'_> {
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

/// Splits the nodes of `split_set`; every other node keeps its original
/// reference. Every node of `graph` is present in the result, even isolated.
pub fn split<'g>(graph: &'g DirectedGraph, split_set: &BTreeSet<NodeId>) -> SplitGraph<'g> {
    let resolver = SplitResolver::new(split_set.clone());
    let mut split_graph = WeightedDigraph::new();

    for node in graph.node_ids() {
        if resolver.is_split(node) {
            split_graph.add_edge(NodeRef::SplitIn(node), NodeRef::SplitOut(node), 0.0);
        } else {
            split_graph.add_vertex(NodeRef::Original(node));
        }
    }

    for (u, v, cost) in graph.edges() {
        split_graph.add_edge(resolver.out_ref(u), resolver.in_ref(v), cost);
    }

    log::trace!(
        "split {} of {} nodes: {} vertices, {} edges",
        split_set.len(),
        graph.vertex_count(),
        split_graph.vertex_count(),
        split_graph.edge_count()
    );

    SplitGraph {
        base: graph,
        graph: split_graph,
        resolver,
    }
}
