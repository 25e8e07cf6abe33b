//! All-pairs comparison of the Two-Step heuristic against Suurballe.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::engine::{DisjointPathEngine, EngineConfig, Method};
use crate::algorithm::RoutePair;
use crate::graph::directed::{DirectedGraph, NodeId};
use crate::{Error, Result};

/// How both methods fared over every pair of nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairStatistics {
    /// Unordered pairs examined
    pub total_pairs: usize,
    /// Pairs for which Two-Step found a secondary path
    pub resolved_two_step: usize,
    /// Pairs for which Suurballe found a secondary path
    pub resolved_suurballe: usize,
    /// Pairs resolved by both methods
    pub compared_pairs: usize,
    /// Compared pairs where Two-Step matched the Suurballe total
    pub optimal_two_step: usize,
    /// Mean excess of the Two-Step total over the Suurballe total, in percent
    pub mean_relative_error_pct: f64,
}

impl PairStatistics {
    pub fn two_step_resolution_rate(&self) -> f64 {
        ratio(self.resolved_two_step, self.total_pairs)
    }

    pub fn suurballe_resolution_rate(&self) -> f64 {
        ratio(self.resolved_suurballe, self.total_pairs)
    }

    /// Share of Suurballe-resolvable pairs where Two-Step was also optimal
    pub fn optimality_rate(&self) -> f64 {
        ratio(self.optimal_two_step, self.resolved_suurballe)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Outcome of one pair: total cost per method, `None` when unresolved
#[derive(Debug, Clone, Copy)]
struct PairOutcome {
    two_step: Option<f64>,
    suurballe: Option<f64>,
}

fn total_cost(graph: &DirectedGraph, routes: &RoutePair) -> Option<f64> {
    let secondary = routes.secondary.as_ref()?;
    Some(graph.path_cost(&routes.primary)? + graph.path_cost(secondary)?)
}

fn evaluate(
    engine: &DisjointPathEngine,
    graph: &DirectedGraph,
    source: NodeId,
    target: NodeId,
) -> Result<PairOutcome> {
    let mut outcome = PairOutcome {
        two_step: None,
        suurballe: None,
    };
    for method in [Method::TwoStep, Method::Suurballe] {
        let total = match engine.find_disjoint_pair_ids(graph, source, target, method) {
            Ok(routes) => total_cost(graph, &routes),
            Err(Error::NoInitialPath { .. }) => None,
            Err(e) => return Err(e),
        };
        match method {
            Method::TwoStep => outcome.two_step = total,
            Method::Suurballe => outcome.suurballe = total,
        }
    }
    Ok(outcome)
}

/// Runs both methods on every unordered node pair, in parallel.
///
/// Each pair is queried from the lower to the higher node. A pair without
/// any path counts as unresolved for both methods.
pub fn collect_statistics(graph: &DirectedGraph, config: EngineConfig) -> Result<PairStatistics> {
    let engine = DisjointPathEngine::new().with_config(config);
    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let pairs: Vec<(NodeId, NodeId)> = nodes
        .iter()
        .enumerate()
        .flat_map(|(i, &u)| nodes[i + 1..].iter().map(move |&v| (u, v)))
        .collect();

    let outcomes: Vec<PairOutcome> = pairs
        .par_iter()
        .map(|&(u, v)| evaluate(&engine, graph, u, v))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = PairStatistics {
        total_pairs: outcomes.len(),
        ..PairStatistics::default()
    };
    let mut error_sum = 0.0;
    for outcome in &outcomes {
        if outcome.two_step.is_some() {
            stats.resolved_two_step += 1;
        }
        if outcome.suurballe.is_some() {
            stats.resolved_suurballe += 1;
        }
        if let (Some(tsa), Some(sur)) = (outcome.two_step, outcome.suurballe) {
            stats.compared_pairs += 1;
            if (tsa - sur).abs() <= config.epsilon {
                stats.optimal_two_step += 1;
            }
            if sur > 0.0 {
                error_sum += (tsa - sur) / sur * 100.0;
            }
        }
    }
    if stats.compared_pairs > 0 {
        stats.mean_relative_error_pct = error_sum / stats.compared_pairs as f64;
    }

    log::info!(
        "{} pairs: two-step resolved {}, suurballe resolved {}, two-step optimal on {}",
        stats.total_pairs,
        stats.resolved_two_step,
        stats.resolved_suurballe,
        stats.optimal_two_step
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;

    #[test]
    fn empty_graph_has_no_pairs() {
        let g = build_graph(Vec::<(&str, &str, f64)>::new()).unwrap();
        let stats = collect_statistics(&g, EngineConfig::default()).unwrap();
        assert_eq!(stats.total_pairs, 0);
        assert_eq!(stats.optimality_rate(), 0.0);
        assert_eq!(stats.mean_relative_error_pct, 0.0);
    }

    #[test]
    fn disconnected_pairs_are_unresolved() {
        let g = build_graph([("a", "b", 1.0), ("b", "a", 1.0), ("c", "d", 1.0)]).unwrap();
        let stats = collect_statistics(&g, EngineConfig::default()).unwrap();
        assert_eq!(stats.total_pairs, 6);
        assert_eq!(stats.resolved_two_step, 0);
        assert_eq!(stats.resolved_suurballe, 0);
    }
}
