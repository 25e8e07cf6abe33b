use std::fmt::Debug;
use std::hash::Hash;

/// Trait representing a weighted directed graph over an arbitrary node handle.
///
/// Costs are `f64`. Implementations must yield outgoing edges in ascending
/// target order so that searches over them are reproducible.
pub trait Graph: Debug {
    /// Node handle type
    type Node: Copy + Eq + Ord + Hash + Debug;

    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all vertices, in ascending order
    fn vertices(&self) -> Box<dyn Iterator<Item = Self::Node> + '_>;

    /// Returns an iterator over the outgoing edges from a vertex
    fn outgoing_edges(&self, vertex: Self::Node) -> Box<dyn Iterator<Item = (Self::Node, f64)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: Self::Node) -> bool;

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: Self::Node, to: Self::Node) -> bool {
        self.get_edge_weight(from, to).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: Self::Node, to: Self::Node) -> Option<f64>;

    /// Human-readable label for a vertex, used in errors and logs
    fn label(&self, vertex: Self::Node) -> String;
}

/// Trait for mutable graph operations
pub trait MutableGraph: Graph {
    /// Adds a vertex; returns false if it was already present
    fn add_vertex(&mut self, vertex: Self::Node) -> bool;

    /// Adds or replaces a directed edge between vertices with the given weight
    fn add_edge(&mut self, from: Self::Node, to: Self::Node, weight: f64);

    /// Removes an edge from the graph, returning its weight
    fn remove_edge(&mut self, from: Self::Node, to: Self::Node) -> Option<f64>;
}
