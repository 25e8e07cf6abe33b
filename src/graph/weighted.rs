use crate::graph::traits::{Graph, MutableGraph};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Ordered adjacency-map digraph used for the per-query derived graphs
/// (split, reduced and overlap graphs).
///
/// Adjacency is kept in `BTreeMap`s so iteration is always ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedDigraph<N>
where
    N: Copy + Eq + Ord + Hash + Debug + Display,
{
    /// Outgoing edges for each vertex: vertex -> {target -> weight}
    adjacency: BTreeMap<N, BTreeMap<N, f64>>,

    edge_count: usize,
}

impl<N> Default for WeightedDigraph<N>
where
    N: Copy + Eq + Ord + Hash + Debug + Display,
{
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

impl<N> WeightedDigraph<N>
where
    N: Copy + Eq + Ord + Hash + Debug + Display,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list; endpoints are added implicitly
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (u, v, w) in edges {
            graph.add_edge(u, v, w);
        }
        graph
    }

    /// All edges as `(from, to, weight)`, in ascending order
    pub fn edges(&self) -> impl Iterator<Item = (N, N, f64)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(&u, targets)| targets.iter().map(move |(&v, &w)| (u, v, w)))
    }
}

impl<N> Graph for WeightedDigraph<N>
where
    N: Copy + Eq + Ord + Hash + Debug + Display,
{
    type Node = N;

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = N> + '_> {
        Box::new(self.adjacency.keys().copied())
    }

    fn outgoing_edges(&self, vertex: N) -> Box<dyn Iterator<Item = (N, f64)> + '_> {
        match self.adjacency.get(&vertex) {
            Some(targets) => Box::new(targets.iter().map(|(&v, &w)| (v, w))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_vertex(&self, vertex: N) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    fn get_edge_weight(&self, from: N, to: N) -> Option<f64> {
        self.adjacency.get(&from)?.get(&to).copied()
    }

    fn label(&self, vertex: N) -> String {
        vertex.to_string()
    }
}

impl<N> MutableGraph for WeightedDigraph<N>
where
    N: Copy + Eq + Ord + Hash + Debug + Display,
{
    fn add_vertex(&mut self, vertex: N) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, BTreeMap::new());
        true
    }

    fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.add_vertex(to);
        let previous = self.adjacency.entry(from).or_default().insert(to, weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
    }

    fn remove_edge(&mut self, from: N, to: N) -> Option<f64> {
        let removed = self.adjacency.get_mut(&from)?.remove(&to);
        if removed.is_some() {
            self.edge_count -= 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_keep_edge_count() {
        let mut g: WeightedDigraph<u32> = WeightedDigraph::new();
        g.add_edge(1, 2, 1.0);
        g.add_edge(1, 2, 3.0);
        g.add_edge(2, 1, 1.0);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.get_edge_weight(1, 2), Some(3.0));

        assert_eq!(g.remove_edge(1, 2), Some(3.0));
        assert_eq!(g.remove_edge(1, 2), None);
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_vertex(2));
    }

    #[test]
    fn outgoing_edges_are_ascending() {
        let g = WeightedDigraph::from_edges([(0u32, 9, 1.0), (0, 3, 1.0), (0, 5, 1.0)]);
        let targets: Vec<u32> = g.outgoing_edges(0).map(|(v, _)| v).collect();
        assert_eq!(targets, vec![3, 5, 9]);
    }
}
