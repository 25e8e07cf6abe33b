use std::collections::{HashMap, HashSet};

use crate::algorithm::{PotentialMap, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::DistanceQueue;
use crate::graph::Graph;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm over non-negative costs.
///
/// Ties in tentative distance are settled in ascending node order and a
/// predecessor is only replaced by a strictly shorter route, so repeated runs
/// on the same graph return the same tree. Edges with a non-finite cost are
/// treated as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Shortest path tree from `source`; stops as soon as `target` is settled
    /// when one is given.
    fn search<G: Graph>(
        &self,
        graph: &G,
        source: G::Node,
        target: Option<G::Node>,
    ) -> Result<ShortestPathResult<G::Node>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidNode(graph.label(source)));
        }

        let mut distances: HashMap<G::Node, f64> = HashMap::new();
        let mut predecessors: HashMap<G::Node, G::Node> = HashMap::new();
        let mut settled: HashSet<G::Node> = HashSet::new();

        distances.insert(source, 0.0);
        let mut queue = DistanceQueue::new();
        queue.push(source, 0.0);

        while let Some((u, dist_u)) = queue.pop() {
            if !settled.insert(u) {
                continue;
            }
            if Some(u) == target {
                break;
            }

            // Relax all outgoing edges
            for (v, weight) in graph.outgoing_edges(u) {
                if !weight.is_finite() || settled.contains(&v) {
                    continue;
                }
                let new_dist = dist_u + weight;

                let should_update = match distances.get(&v) {
                    None => true,
                    Some(&current_dist) => new_dist < current_dist,
                };

                if should_update {
                    distances.insert(v, new_dist);
                    predecessors.insert(v, u);
                    queue.push(v, new_dist);
                }
            }
        }

        log::trace!(
            "dijkstra from {}: settled {} of {} vertices, {} queue pushes",
            graph.label(source),
            settled.len(),
            graph.vertex_count(),
            queue.pushes()
        );

        // Only settled distances are final when the search stopped early
        let potentials: PotentialMap<G::Node> = distances
            .into_iter()
            .filter(|(node, _)| target.is_none() || settled.contains(node))
            .collect();

        Ok(ShortestPathResult {
            potentials,
            predecessors,
            source,
        })
    }
}

impl<G> ShortestPathAlgorithm<G> for Dijkstra
where
    G: Graph,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: G::Node) -> Result<ShortestPathResult<G::Node>> {
        self.search(graph, source, None)
    }

    fn shortest_path(&self, graph: &G, source: G::Node, target: G::Node) -> Result<Vec<G::Node>> {
        if !graph.has_vertex(target) {
            return Err(Error::InvalidNode(graph.label(target)));
        }
        let result = self.search(graph, source, Some(target))?;
        result.path_to(target).ok_or_else(|| Error::NoPath {
            from: graph.label(source),
            to: graph.label(target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;

    #[test]
    fn tree_covers_reachable_nodes_only() {
        let g = build_graph([("a", "b", 2.0), ("b", "c", 1.0), ("a", "c", 4.0), ("d", "a", 1.0)]).unwrap();
        let a = g.node_id("a").unwrap();
        let tree = Dijkstra::new().compute_shortest_paths(&g, a).unwrap();

        assert_eq!(tree.distance(g.node_id("c").unwrap()), 3.0);
        assert!(tree.distance(g.node_id("d").unwrap()).is_infinite());
        assert_eq!(tree.potentials.len(), 3);
    }

    #[test]
    fn equal_cost_routes_resolve_to_smaller_node() {
        // a->b->d and a->c->d both cost 2; b < c so b's route wins
        let g = build_graph([("a", "c", 1.0), ("a", "b", 1.0), ("c", "d", 1.0), ("b", "d", 1.0)]).unwrap();
        let id = |n: &str| g.node_id(n).unwrap();
        let path = Dijkstra::new().shortest_path(&g, id("a"), id("d")).unwrap();
        assert_eq!(path, vec![id("a"), id("b"), id("d")]);
    }

    #[test]
    fn unreachable_target_is_no_path() {
        let g = build_graph([("a", "b", 1.0), ("c", "b", 1.0)]).unwrap();
        let id = |n: &str| g.node_id(n).unwrap();
        let err = Dijkstra::new().shortest_path(&g, id("a"), id("c")).unwrap_err();
        assert_eq!(
            err,
            Error::NoPath {
                from: "a".to_string(),
                to: "c".to_string()
            }
        );
    }
}
