pub mod traits;
pub mod directed;
pub mod weighted;
pub mod split;
pub mod exclusion;
pub mod generators;
pub mod topology;

pub use traits::{Graph, MutableGraph};
pub use directed::{DirectedGraph, GraphBuilder, NodeId};
pub use exclusion::ExclusionView;
pub use split::{split, NodeRef, SplitGraph, SplitResolver};
pub use weighted::WeightedDigraph;
