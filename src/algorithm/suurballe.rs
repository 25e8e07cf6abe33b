//! Suurballe's algorithm adapted for node-disjointness.
//!
//! 1. Split the nodes at risk into in/out halves (node- to arc-disjointness).
//! 2. Compute potentials from the source in the split graph and reduce costs.
//! 3. Reverse the primary path at zero cost, removing opposite links.
//! 4. Search again; cancel mirrored arcs; re-stitch, un-split and validate.
//!
//! Whenever a disjoint pair exists, the pair returned has minimum total cost.

use std::collections::BTreeSet;

use crate::algorithm::engine::{EngineConfig, SplitPolicy};
use crate::algorithm::observer::{StageObserver, StageSnapshot};
use crate::algorithm::overlap;
use crate::algorithm::reduction::reduce;
use crate::algorithm::transform::transform;
use crate::algorithm::{Dijkstra, RoutePair, ShortestPathAlgorithm};
use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::split::split;
use crate::{Error, Result};

/// Runs the Suurballe pipeline for `source -> target`, given the primary
/// shortest path already found in the original graph.
pub fn suurballe(
    graph: &DirectedGraph,
    source: NodeId,
    target: NodeId,
    primary: &[NodeId],
    config: &EngineConfig,
    observer: Option<&dyn StageObserver>,
) -> Result<RoutePair> {
    if primary.len() < 2 {
        return Ok(RoutePair::primary_only(primary.to_vec()));
    }

    let split_set: BTreeSet<NodeId> = match config.split_policy {
        SplitPolicy::PrimaryPath => primary.iter().copied().collect(),
        SplitPolicy::AllNodes => graph.node_ids().collect(),
    };
    let split_graph = split(graph, &split_set);
    let (s, t) = split_graph.endpoints(source, target);
    let primary_split = split_graph.resolver().split_path(primary);
    notify(observer, &StageSnapshot::Split {
        graph: &split_graph,
        source: s,
        target: t,
        primary: &primary_split,
    });

    let tree = Dijkstra::new().compute_shortest_paths(&split_graph, s)?;
    let mut reduced = reduce(&split_graph, &tree.potentials, config.epsilon);
    notify(observer, &StageSnapshot::Reduce {
        graph: &reduced,
        anomalies: reduced.anomalies(),
    });
    if !reduced.edges_non_negative() {
        log::warn!("reduced graph still carries negative costs after clamping");
    }

    transform(&mut reduced, split_graph.resolver(), &primary_split);
    notify(observer, &StageSnapshot::Transform { graph: &reduced });

    let secondary_split = match Dijkstra::new().shortest_path(&reduced, s, t) {
        Ok(path) => Some(path),
        Err(Error::NoPath { .. }) => None,
        Err(e) => return Err(e),
    };

    let routes = match &secondary_split {
        None => {
            log::debug!(
                "suurballe: no second route from {} to {}",
                graph.name(source),
                graph.name(target)
            );
            RoutePair::primary_only(primary.to_vec())
        }
        Some(secondary) => {
            match overlap::resolve(graph, split_graph.resolver(), s, t, &primary_split, secondary) {
                Ok((first, second)) => order_by_cost(graph, first, second),
                Err(rejection) => {
                    log::warn!(
                        "suurballe: discarding second route from {} to {}: {}",
                        graph.name(source),
                        graph.name(target),
                        rejection
                    );
                    RoutePair::primary_only(primary.to_vec())
                }
            }
        }
    };

    notify(observer, &StageSnapshot::Resolve {
        secondary_raw: secondary_split.as_deref(),
        primary: &routes.primary,
        secondary: routes.secondary.as_deref(),
    });
    Ok(routes)
}

fn notify(observer: Option<&dyn StageObserver>, snapshot: &StageSnapshot<'_>) {
    if let Some(observer) = observer {
        observer.on_stage(snapshot.stage(), snapshot);
    }
}

/// Puts the cheaper route first; ties keep the reconstruction order.
fn order_by_cost(graph: &DirectedGraph, first: Vec<NodeId>, second: Vec<NodeId>) -> RoutePair {
    let cost = |path: &[NodeId]| graph.path_cost(path).unwrap_or(f64::INFINITY);
    if cost(&second) < cost(&first) {
        RoutePair {
            primary: second,
            secondary: Some(first),
        }
    } else {
        RoutePair {
            primary: first,
            secondary: Some(second),
        }
    }
}
