pub mod traits;
pub mod dijkstra;
pub mod reduction;
pub mod transform;
pub mod overlap;
pub mod observer;
pub mod two_step;
pub mod suurballe;
pub mod engine;

pub use dijkstra::Dijkstra;
pub use observer::{LoggingObserver, Stage, StageObserver, StageSnapshot};
pub use traits::{PotentialMap, ShortestPathAlgorithm, ShortestPathResult};

use crate::graph::directed::NodeId;

/// Primary route and optional node-disjoint secondary, as node handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePair {
    pub primary: Vec<NodeId>,
    pub secondary: Option<Vec<NodeId>>,
}

impl RoutePair {
    /// A pair without a secondary route
    pub fn primary_only(primary: Vec<NodeId>) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}
