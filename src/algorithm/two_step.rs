use crate::algorithm::{Dijkstra, RoutePair, ShortestPathAlgorithm};
use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::exclusion::ExclusionView;
use crate::{Error, Result};

/// Two-Step heuristic: hide the primary path and search again.
///
/// Every link of the primary path is hidden in both directions, since a
/// physical link may be modelled as two directed edges, and so is every
/// interior node. Two searches and no transform, but the pair found is not
/// always the cheapest one, and a pair may be missed.
pub fn two_step(
    graph: &DirectedGraph,
    source: NodeId,
    target: NodeId,
    primary: &[NodeId],
) -> Result<RoutePair> {
    if primary.len() < 2 {
        return Ok(RoutePair::primary_only(primary.to_vec()));
    }

    let mut view = ExclusionView::new(graph);
    for hop in primary.windows(2) {
        view.exclude_link(hop[0], hop[1]);
    }
    for &node in &primary[1..primary.len() - 1] {
        view.exclude_node(node);
    }

    match Dijkstra::new().shortest_path(&view, source, target) {
        Ok(secondary) => Ok(RoutePair {
            primary: primary.to_vec(),
            secondary: Some(secondary),
        }),
        Err(Error::NoPath { .. }) => {
            log::debug!(
                "two-step: no route from {} to {} once the primary is removed",
                graph.name(source),
                graph.name(target)
            );
            Ok(RoutePair::primary_only(primary.to_vec()))
        }
        Err(e) => Err(e),
    }
}
