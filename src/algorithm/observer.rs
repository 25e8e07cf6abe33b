use std::fmt;

use crate::algorithm::reduction::ReducedCostGraph;
use crate::graph::directed::NodeId;
use crate::graph::split::{NodeRef, SplitGraph};
use crate::graph::traits::Graph;

/// Major stages of the Suurballe pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Split,
    Reduce,
    Transform,
    Resolve,
}

impl Stage {
    /// Stable lower-case stage name
    pub fn name(self) -> &'static str {
        match self {
            Stage::Split => "split",
            Stage::Reduce => "reduce",
            Stage::Transform => "transform",
            Stage::Resolve => "resolve",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of the pipeline state right after a stage
#[derive(Debug)]
pub enum StageSnapshot<'a> {
    Split {
        graph: &'a SplitGraph<'a>,
        source: NodeRef,
        target: NodeRef,
        primary: &'a [NodeRef],
    },
    Reduce {
        graph: &'a ReducedCostGraph<'a>,
        anomalies: usize,
    },
    Transform {
        graph: &'a ReducedCostGraph<'a>,
    },
    Resolve {
        secondary_raw: Option<&'a [NodeRef]>,
        primary: &'a [NodeId],
        secondary: Option<&'a [NodeId]>,
    },
}

impl StageSnapshot<'_> {
    /// The stage this snapshot was taken after
    pub fn stage(&self) -> Stage {
        match self {
            StageSnapshot::Split { .. } => Stage::Split,
            StageSnapshot::Reduce { .. } => Stage::Reduce,
            StageSnapshot::Transform { .. } => Stage::Transform,
            StageSnapshot::Resolve { .. } => Stage::Resolve,
        }
    }
}

/// Instrumentation hook called after each stage.
///
/// Results never depend on whether an observer is registered.
pub trait StageObserver: Send + Sync {
    fn on_stage(&self, stage: Stage, snapshot: &StageSnapshot<'_>);
}

/// Observer that logs a summary of every stage at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl StageObserver for LoggingObserver {
    fn on_stage(&self, stage: Stage, snapshot: &StageSnapshot<'_>) {
        match snapshot {
            StageSnapshot::Split { graph, source, target, primary } => log::debug!(
                "[{}] {} vertices, {} edges, {} -> {}, primary has {} split hops",
                stage,
                graph.vertex_count(),
                graph.edge_count(),
                graph.label(*source),
                graph.label(*target),
                primary.len().saturating_sub(1)
            ),
            StageSnapshot::Reduce { graph, anomalies } => log::debug!(
                "[{}] {} edges reweighted, {} anomalies",
                stage,
                graph.edge_count(),
                anomalies
            ),
            StageSnapshot::Transform { graph } => {
                log::debug!("[{}] {} edges after reversal", stage, graph.edge_count())
            }
            StageSnapshot::Resolve { secondary_raw, primary, secondary } => log::debug!(
                "[{}] raw secondary {}, primary {} hops, secondary {}",
                stage,
                if secondary_raw.is_some() { "found" } else { "absent" },
                primary.len().saturating_sub(1),
                secondary.map_or_else(|| "none".to_string(), |p| format!("{} hops", p.len() - 1))
            ),
        }
    }
}
