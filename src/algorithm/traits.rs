use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::graph::Graph;
use crate::{Error, Result};

/// Shortest distance from a fixed source to every reached node.
///
/// Unreached nodes have potential `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialMap<N>
where
    N: Copy + Eq + Hash + Debug,
{
    distances: HashMap<N, f64>,
}

impl<N> Default for PotentialMap<N>
where
    N: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self {
            distances: HashMap::new(),
        }
    }
}

impl<N> PotentialMap<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Creates an empty map (every node unreachable)
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the distance of a node
    pub fn set(&mut self, node: N, distance: f64) {
        self.distances.insert(node, distance);
    }

    /// Distance of a node, infinite if unreached
    pub fn potential(&self, node: N) -> f64 {
        self.distances.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    /// Returns true if the node was reached
    pub fn is_reachable(&self, node: N) -> bool {
        self.distances.contains_key(&node)
    }

    /// Number of reached nodes
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns true if no node was reached
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

impl<N> FromIterator<(N, f64)> for PotentialMap<N>
where
    N: Copy + Eq + Hash + Debug,
{
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self {
            distances: iter.into_iter().collect(),
        }
    }
}

/// Result of a single-source shortest path computation
#[derive(Debug, Clone)]
pub struct ShortestPathResult<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Distances from source to each reached vertex
    pub potentials: PotentialMap<N>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: HashMap<N, N>,

    /// Source vertex
    pub source: N,
}

impl<N> ShortestPathResult<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Distance to `target`, infinite if unreached
    pub fn distance(&self, target: N) -> f64 {
        self.potentials.potential(target)
    }

    /// Walks the predecessor tree back from `target`.
    ///
    /// Returns `None` if `target` was not reached or the tree is broken.
    pub fn path_to(&self, target: N) -> Option<Vec<N>> {
        if !self.potentials.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = *self.predecessors.get(&current)?;
            path.push(current);
            if path.len() > self.potentials.len() {
                log::warn!("cycle in predecessor tree while rebuilding path to {:?}", target);
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<G>
where
    G: Graph,
{
    /// Compute shortest paths from a source vertex to all reachable vertices
    fn compute_shortest_paths(&self, graph: &G, source: G::Node) -> Result<ShortestPathResult<G::Node>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Minimum-cost path from `source` to `target`, or `NoPath`
    fn shortest_path(&self, graph: &G, source: G::Node, target: G::Node) -> Result<Vec<G::Node>> {
        if !graph.has_vertex(target) {
            return Err(Error::InvalidNode(graph.label(target)));
        }
        let result = self.compute_shortest_paths(graph, source)?;
        result.path_to(target).ok_or_else(|| Error::NoPath {
            from: graph.label(source),
            to: graph.label(target),
        })
    }
}
