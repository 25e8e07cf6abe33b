use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algorithm::reduction::DEFAULT_EPSILON;
use crate::algorithm::suurballe::suurballe;
use crate::algorithm::two_step::two_step;
use crate::algorithm::{Dijkstra, RoutePair, ShortestPathAlgorithm};
use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::traits::Graph;
use crate::{Error, Result};

pub use crate::algorithm::observer::{LoggingObserver, Stage, StageObserver, StageSnapshot};

/// Method used to find the secondary path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Remove the primary path and search again
    TwoStep,
    /// Minimum-cost pair through node splitting and reduced costs
    Suurballe,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::TwoStep => "two_step",
            Method::Suurballe => "suurballe",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "two_step" | "tsa" => Ok(Method::TwoStep),
            "suurballe" => Ok(Method::Suurballe),
            other => Err(format!("unknown method: {other}")),
        }
    }
}

/// Which nodes are split before the second search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Only the nodes of the primary path
    #[default]
    PrimaryPath,
    /// Every node of the graph
    AllNodes,
}

/// Tuning knobs for the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Reduced costs within `epsilon` of zero snap to zero
    pub epsilon: f64,
    pub split_policy: SplitPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            split_policy: SplitPolicy::PrimaryPath,
        }
    }
}

impl EngineConfig {
    /// Set the reduced-cost tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    /// Set which nodes get split
    pub fn with_split_policy(mut self, split_policy: SplitPolicy) -> Self {
        self.split_policy = split_policy;
        self
    }
}

/// A path through the graph by node name, with its summed cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub nodes: Vec<String>,
    pub cost: f64,
}

impl Path {
    /// Resolves node handles to names and sums the edge costs.
    ///
    /// Hops that are not edges contribute nothing; engine paths never have any.
    pub fn from_ids(graph: &DirectedGraph, nodes: &[NodeId]) -> Self {
        let cost = nodes
            .windows(2)
            .filter_map(|hop| graph.get_edge_weight(hop[0], hop[1]))
            .sum();
        Self {
            nodes: nodes.iter().map(|&n| graph.name(n).to_string()).collect(),
            cost,
        }
    }

    /// Nodes other than the two endpoints
    pub fn interior(&self) -> &[String] {
        if self.nodes.len() <= 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (cost {})", self.nodes.join(" -> "), self.cost)
    }
}

/// Primary path plus, when one exists, a node-disjoint secondary path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisjointPaths {
    pub method: Method,
    pub primary: Path,
    pub secondary: Option<Path>,
}

impl DisjointPaths {
    pub fn primary_cost(&self) -> f64 {
        self.primary.cost
    }

    pub fn secondary_cost(&self) -> Option<f64> {
        self.secondary.as_ref().map(|p| p.cost)
    }

    /// Combined cost of both paths, or `None` without a secondary
    pub fn total_cost(&self) -> Option<f64> {
        self.secondary_cost().map(|c| c + self.primary.cost)
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}

/// Entry point for disjoint path queries.
///
/// The engine holds no per-query state: the same engine can serve
/// concurrent queries over a shared graph.
#[derive(Clone, Default)]
pub struct DisjointPathEngine {
    config: EngineConfig,
    observer: Option<Arc<dyn StageObserver>>,
}

impl fmt::Debug for DisjointPathEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisjointPathEngine")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl DisjointPathEngine {
    /// Create an engine with the default configuration and no observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a stage observer for the Suurballe pipeline
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Finds a primary path between two named nodes and, when possible, a
    /// node-disjoint secondary path.
    ///
    /// Fails with `InvalidNode` for unknown endpoints and `NoInitialPath`
    /// when the endpoints are disconnected. A missing secondary is not an
    /// error.
    pub fn find_disjoint_pair(
        &self,
        graph: &DirectedGraph,
        source: &str,
        target: &str,
        method: Method,
    ) -> Result<DisjointPaths> {
        let src = graph.require_node(source)?;
        let dst = graph.require_node(target)?;
        let routes = self.find_disjoint_pair_ids(graph, src, dst, method)?;

        Ok(DisjointPaths {
            method,
            primary: Path::from_ids(graph, &routes.primary),
            secondary: routes.secondary.map(|p| Path::from_ids(graph, &p)),
        })
    }

    /// Same as [`find_disjoint_pair`](Self::find_disjoint_pair) over node handles
    pub fn find_disjoint_pair_ids(
        &self,
        graph: &DirectedGraph,
        source: NodeId,
        target: NodeId,
        method: Method,
    ) -> Result<RoutePair> {
        let primary = match Dijkstra::new().shortest_path(graph, source, target) {
            Ok(path) => path,
            Err(Error::NoPath { from, to }) => return Err(Error::NoInitialPath { from, to }),
            Err(e) => return Err(e),
        };

        log::debug!(
            "{}: primary path {} -> {} has {} hops",
            method,
            graph.name(source),
            graph.name(target),
            primary.len().saturating_sub(1)
        );

        match method {
            Method::TwoStep => two_step(graph, source, target, &primary),
            Method::Suurballe => suurballe(
                graph,
                source,
                target,
                &primary,
                &self.config,
                self.observer.as_deref(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_common_spellings() {
        assert_eq!("two-step".parse::<Method>(), Ok(Method::TwoStep));
        assert_eq!("TSA".parse::<Method>(), Ok(Method::TwoStep));
        assert_eq!("Suurballe".parse::<Method>(), Ok(Method::Suurballe));
        assert!("bhandari".parse::<Method>().is_err());
    }

    #[test]
    fn method_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Method::TwoStep).unwrap(), "\"two_step\"");
        let m: Method = serde_json::from_str("\"suurballe\"").unwrap();
        assert_eq!(m, Method::Suurballe);
    }

    #[test]
    fn config_builder() {
        let config = EngineConfig::default()
            .with_epsilon(1e-6)
            .with_split_policy(SplitPolicy::AllNodes);
        assert_eq!(config.epsilon, 1e-6);
        assert_eq!(config.split_policy, SplitPolicy::AllNodes);
    }
}
