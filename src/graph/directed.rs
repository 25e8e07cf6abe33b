use crate::graph::traits::Graph;
use crate::{Error, GraphError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Interned handle of a node in a [`DirectedGraph`].
///
/// Handles are assigned in ascending lexical order of the node names, so
/// ordering handles is the same as ordering names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the graph's name table
    pub fn index(self) -> usize {
        self.0
    }
}

/// Accumulates validated edges and produces an immutable [`DirectedGraph`]
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    names: BTreeSet<String>,
    edges: Vec<(String, String, f64)>,
    seen: HashSet<(String, String)>,
}

impl GraphBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node, which may stay isolated
    pub fn add_node(&mut self, name: &str) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(GraphError::EmptyNodeId.into());
        }
        self.names.insert(name.to_string());
        Ok(self)
    }

    /// Adds a directed edge. Negative or non-finite costs, self-loops and a
    /// second edge for the same ordered pair are rejected.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: f64) -> Result<&mut Self> {
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::EmptyNodeId.into());
        }
        if from == to {
            return Err(GraphError::SelfLoop(from.to_string()).into());
        }
        if !cost.is_finite() {
            return Err(GraphError::NonFiniteCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            }
            .into());
        }
        if cost < 0.0 {
            return Err(GraphError::NegativeCost {
                from: from.to_string(),
                to: to.to_string(),
                cost,
            }
            .into());
        }
        if !self.seen.insert((from.to_string(), to.to_string())) {
            return Err(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        self.names.insert(from.to_string());
        self.names.insert(to.to_string());
        self.edges.push((from.to_string(), to.to_string(), cost));
        Ok(self)
    }

    /// Freezes the builder into a graph
    pub fn build(self) -> DirectedGraph {
        let names: Vec<String> = self.names.into_iter().collect();
        let index: HashMap<String, NodeId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), NodeId(i)))
            .collect();

        let mut outgoing = vec![Vec::new(); names.len()];
        for (from, to, cost) in &self.edges {
            outgoing[index[from].0].push((index[to], *cost));
        }
        for edges in outgoing.iter_mut() {
            edges.sort_by_key(|(node, _)| *node);
        }

        DirectedGraph {
            names,
            index,
            outgoing,
            edge_count: self.edges.len(),
        }
    }
}

/// An immutable directed graph using adjacency lists.
///
/// Built once per batch of queries and shared read-only between them.
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    /// Node names, indexed by `NodeId`
    names: Vec<String>,

    /// Name -> handle lookup
    index: HashMap<String, NodeId>,

    /// Outgoing edges for each vertex, sorted by target
    outgoing: Vec<Vec<(NodeId, f64)>>,

    edge_count: usize,
}

impl DirectedGraph {
    /// Looks up the handle of a named node
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Like [`node_id`](Self::node_id), failing with `InvalidNode`
    pub fn require_node(&self, name: &str) -> Result<NodeId> {
        self.node_id(name)
            .ok_or_else(|| Error::InvalidNode(name.to_string()))
    }

    /// Name of a node handle
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.0]
    }

    /// All node names, in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// All node handles, in ascending order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.names.len()).map(NodeId)
    }

    /// All edges as `(from, to, cost)` handles
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.outgoing
            .iter()
            .enumerate()
            .flat_map(|(u, edges)| edges.iter().map(move |&(v, c)| (NodeId(u), v, c)))
    }

    /// Returns true if an edge `from -> to` exists between the named nodes
    pub fn has_edge_between(&self, from: &str, to: &str) -> bool {
        self.edge_cost(from, to).is_some()
    }

    /// Cost of the edge `from -> to` between the named nodes
    pub fn edge_cost(&self, from: &str, to: &str) -> Option<f64> {
        let (u, v) = (self.node_id(from)?, self.node_id(to)?);
        self.get_edge_weight(u, v)
    }

    /// Outgoing neighbours of a named node with their edge costs
    pub fn neighbors_out(&self, name: &str) -> Result<Vec<(&str, f64)>> {
        let node = self.require_node(name)?;
        Ok(self.outgoing[node.0]
            .iter()
            .map(|&(v, c)| (self.name(v), c))
            .collect())
    }

    /// Summed cost of a node sequence, or `None` if a hop is not an edge
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|hop| self.get_edge_weight(hop[0], hop[1]))
            .sum()
    }
}

impl Graph for DirectedGraph {
    type Node = NodeId;

    fn vertex_count(&self) -> usize {
        self.names.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.node_ids())
    }

    fn outgoing_edges(&self, vertex: NodeId) -> Box<dyn Iterator<Item = (NodeId, f64)> + '_> {
        match self.outgoing.get(vertex.0) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: NodeId) -> bool {
        vertex.0 < self.names.len()
    }

    fn get_edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let edges = self.outgoing.get(from.0)?;
        edges
            .binary_search_by_key(&to, |(target, _)| *target)
            .ok()
            .map(|i| edges[i].1)
    }

    fn label(&self, vertex: NodeId) -> String {
        self.names
            .get(vertex.0)
            .cloned()
            .unwrap_or_else(|| format!("#{}", vertex.0))
    }
}
