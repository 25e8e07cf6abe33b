//! Disjoint Paths - node-disjoint path pairs for network protection planning
//!
//! This library computes, over a directed weighted topology, a primary shortest
//! path between two nodes and, when one exists, a second path that shares no
//! intermediate node with it. Two methods are provided:
//!
//! * **Suurballe** - node splitting, potential-based reduced costs, reversal of the
//!   primary path and overlap cancellation. Finds the minimum-cost pair.
//! * **Two-Step** - remove the primary path and search again. Cheaper, but may
//!   miss a pair or return a more expensive one.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod stats;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra,
    engine::{
        DisjointPathEngine, DisjointPaths, EngineConfig, LoggingObserver, Method, Path,
        SplitPolicy, Stage, StageObserver, StageSnapshot,
    },
    ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::directed::{DirectedGraph, GraphBuilder, NodeId};
pub use graph::topology::{parse_topology, Topology};
pub use stats::{collect_statistics, PairStatistics};

/// Reasons a topology is rejected at construction time
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("negative cost {cost} on edge {from} -> {to}")]
    NegativeCost { from: String, to: String, cost: f64 },

    #[error("non-finite cost {cost} on edge {from} -> {to}")]
    NonFiniteCost { from: String, to: String, cost: f64 },

    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("self-loop on node {0}")]
    SelfLoop(String),

    #[error("empty node identifier")]
    EmptyNodeId,
}

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("node not found in graph: {0}")]
    InvalidNode(String),

    #[error("no path from {from} to {to}")]
    NoPath { from: String, to: String },

    #[error("no initial path from {from} to {to}")]
    NoInitialPath { from: String, to: String },

    #[error("topology parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Builds an immutable graph from `(from, to, cost)` triples.
pub fn build_graph<I, S>(edges: I) -> Result<DirectedGraph>
where
    I: IntoIterator<Item = (S, S, f64)>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::new();
    for (from, to, cost) in edges {
        builder.add_edge(from.as_ref(), to.as_ref(), cost)?;
    }
    Ok(builder.build())
}

/// Finds the minimum-cost path between two named nodes.
pub fn find_shortest_path(graph: &DirectedGraph, source: &str, target: &str) -> Result<Path> {
    let src = graph.require_node(source)?;
    let dst = graph.require_node(target)?;
    let nodes = Dijkstra::new().shortest_path(graph, src, dst)?;
    Ok(Path::from_ids(graph, &nodes))
}

/// Finds a primary path and, when possible, a node-disjoint secondary path.
pub fn find_disjoint_pair(
    graph: &DirectedGraph,
    source: &str,
    target: &str,
    method: Method,
) -> Result<DisjointPaths> {
    DisjointPathEngine::new().find_disjoint_pair(graph, source, target, method)
}
