use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::algorithm::engine::{DisjointPaths, Method};
use crate::graph::directed::DirectedGraph;
use crate::graph::topology::Topology;
use crate::graph::traits::Graph;
use crate::stats::PairStatistics;

/// Body of `POST /api/topologies`: an edge list or an SNDlib document
#[derive(Debug, Clone, Deserialize)]
pub struct TopologyRequest {
    #[serde(default)]
    pub edges: Option<Vec<(String, String, f64)>>,
    #[serde(default)]
    pub sndlib: Option<String>,
}

/// Node of a topology listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Directed edge of a topology listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: String,
    pub target: String,
    pub cost: f64,
}

/// Full node and edge listing of a stored topology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebTopology {
    pub session_id: Uuid,
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// Summary returned when a topology is stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
}

fn default_method() -> Method {
    Method::Suurballe
}

/// Body of `POST /api/paths/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct PathRequest {
    pub source: String,
    pub target: String,
    #[serde(default = "default_method")]
    pub method: Method,
}

/// Disjoint pair plus timing
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub execution_id: Uuid,
    pub execution_time_ms: f64,
    #[serde(flatten)]
    pub result: DisjointPaths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

/// All-pairs statistics plus the derived rates
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub execution_time_ms: f64,
    #[serde(flatten)]
    pub statistics: PairStatistics,
    pub two_step_resolution_rate: f64,
    pub suurballe_resolution_rate: f64,
    pub optimality_rate: f64,
}

impl StatisticsResponse {
    pub fn new(statistics: PairStatistics, execution_time_ms: f64) -> Self {
        Self {
            execution_time_ms,
            two_step_resolution_rate: statistics.two_step_resolution_rate(),
            suurballe_resolution_rate: statistics.suurballe_resolution_rate(),
            optimality_rate: statistics.optimality_rate(),
            statistics,
        }
    }
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// A stored topology, shared read-only between requests
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: Arc<DirectedGraph>,
    /// Present when the topology came from an SNDlib document
    pub topology: Option<Topology>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: DirectedGraph, topology: Option<Topology>) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph: Arc::new(graph),
            topology,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            node_count: self.graph.vertex_count(),
            edge_count: self.graph.edge_count(),
            created_at: self.created_at,
        }
    }

    pub fn listing(&self) -> WebTopology {
        let position = |name: &str| self.topology.as_ref().and_then(|t| t.position(name));
        let nodes = self
            .graph
            .node_ids()
            .map(|id| {
                let name = self.graph.name(id);
                let xy = position(name);
                WebNode {
                    id: id.index(),
                    name: name.to_string(),
                    x: xy.map(|(x, _)| x),
                    y: xy.map(|(_, y)| y),
                }
            })
            .collect();
        let links = self
            .graph
            .edges()
            .map(|(u, v, cost)| WebEdge {
                source: self.graph.name(u).to_string(),
                target: self.graph.name(v).to_string(),
                cost,
            })
            .collect();

        WebTopology {
            session_id: self.id,
            nodes,
            links,
        }
    }
}
