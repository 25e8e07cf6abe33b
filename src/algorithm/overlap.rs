//! Overlap cancellation and path reconstruction.
//!
//! The second search may walk some reversed primary arcs. Those arcs and the
//! matching primary arcs cancel out; what remains is two arc-disjoint routes
//! from source to destination, which are rebuilt, un-split and validated.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use crate::graph::directed::{DirectedGraph, NodeId};
use crate::graph::split::{NodeRef, SplitResolver};
use crate::graph::traits::Graph;

/// Arc between two split-graph nodes
pub type SplitArc = (NodeRef, NodeRef);

/// Why a raw pair could not be turned into a valid disjoint pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The surviving arcs do not form two source-to-destination routes
    Fragmented,
    /// Both reconstructed paths are the same
    Identical,
    /// The paths share a node other than their endpoints
    SharedInterior(NodeId),
    /// A path visits a node twice
    Loop(NodeId),
    /// A hop is not an edge of the original graph
    MissingEdge(NodeId, NodeId),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Fragmented => write!(f, "surviving arcs do not connect source and destination"),
            Rejection::Identical => write!(f, "reconstructed paths are identical"),
            Rejection::SharedInterior(n) => write!(f, "paths share interior node #{}", n.index()),
            Rejection::Loop(n) => write!(f, "path revisits node #{}", n.index()),
            Rejection::MissingEdge(u, v) => write!(f, "hop #{} -> #{} is not an edge", u.index(), v.index()),
        }
    }
}

/// Arcs of a node sequence
pub fn arcs(path: &[NodeRef]) -> Vec<SplitArc> {
    path.windows(2).map(|hop| (hop[0], hop[1])).collect()
}

/// Removes every primary arc `(u, v)` whose mirror `(v, u)` the secondary
/// walked, and that mirror from the secondary.
///
/// Returns the surviving primary arcs, the surviving secondary arcs and the
/// number of cancelled pairs. Arc order is preserved.
pub fn cancel_overlap(primary: &[SplitArc], secondary: &[SplitArc]) -> (Vec<SplitArc>, Vec<SplitArc>, usize) {
    let secondary_set: HashSet<SplitArc> = secondary.iter().copied().collect();
    let cancelled: HashSet<SplitArc> = primary
        .iter()
        .copied()
        .filter(|&(u, v)| secondary_set.contains(&(v, u)))
        .collect();

    let kept_primary = primary
        .iter()
        .copied()
        .filter(|arc| !cancelled.contains(arc))
        .collect();
    let kept_secondary = secondary
        .iter()
        .copied()
        .filter(|&(u, v)| !cancelled.contains(&(v, u)))
        .collect();

    (kept_primary, kept_secondary, cancelled.len())
}

/// Rebuilds one route starting with `first` and then following the unique
/// unused arc out of each node, consuming arcs from `pool`.
fn walk(
    pool: &mut BTreeMap<NodeRef, BTreeSet<NodeRef>>,
    first: SplitArc,
    target: NodeRef,
    limit: usize,
) -> Option<Vec<NodeRef>> {
    let (start, next) = first;
    if !pool.get_mut(&start)?.remove(&next) {
        return None;
    }

    let mut route = vec![start, next];
    let mut current = next;
    while current != target {
        if route.len() > limit {
            return None;
        }
        let outgoing = pool.get_mut(&current)?;
        let step = *outgoing.iter().next()?;
        outgoing.remove(&step);
        route.push(step);
        current = step;
    }
    Some(route)
}

/// Re-stitches the surviving arcs into two routes from `source` to `target`.
///
/// Route one begins with the surviving primary arc out of the source, route
/// two with the surviving secondary arc out of the source. When the primary
/// arcs are not fragmented, route one is exactly them.
pub fn stitch(
    kept_primary: &[SplitArc],
    kept_secondary: &[SplitArc],
    source: NodeRef,
    target: NodeRef,
) -> Option<(Vec<NodeRef>, Vec<NodeRef>)> {
    let first_primary = *kept_primary.iter().find(|(u, _)| *u == source)?;
    let first_secondary = *kept_secondary.iter().find(|(u, _)| *u == source)?;

    let mut pool: BTreeMap<NodeRef, BTreeSet<NodeRef>> = BTreeMap::new();
    for &(u, v) in kept_primary.iter().chain(kept_secondary) {
        pool.entry(u).or_default().insert(v);
    }
    let limit = kept_primary.len() + kept_secondary.len() + 1;

    let one = walk(&mut pool, first_primary, target, limit)?;
    let two = walk(&mut pool, first_secondary, target, limit)?;

    let leftover: usize = pool.values().map(BTreeSet::len).sum();
    if leftover > 0 {
        log::debug!("{} arcs left over after stitching (zero-cost cycle)", leftover);
    }
    Some((one, two))
}

/// Checks a pair of original-space paths: distinct, simple, sharing only
/// their endpoints, and made of real edges.
pub fn validate(base: &DirectedGraph, first: &[NodeId], second: &[NodeId]) -> Result<(), Rejection> {
    if first == second {
        return Err(Rejection::Identical);
    }

    for path in [first, second] {
        let mut seen = HashSet::new();
        for &node in path {
            if !seen.insert(node) {
                return Err(Rejection::Loop(node));
            }
        }
        for hop in path.windows(2) {
            if !base.has_edge(hop[0], hop[1]) {
                return Err(Rejection::MissingEdge(hop[0], hop[1]));
            }
        }
    }

    let interior = |path: &[NodeId]| -> BTreeSet<NodeId> {
        if path.len() <= 2 {
            return BTreeSet::new();
        }
        path[1..path.len() - 1].iter().copied().collect()
    };
    if let Some(&shared) = interior(first).intersection(&interior(second)).next() {
        return Err(Rejection::SharedInterior(shared));
    }
    Ok(())
}

/// Full overlap resolution: cancel, stitch, un-split, validate.
pub fn resolve(
    base: &DirectedGraph,
    resolver: &SplitResolver,
    source: NodeRef,
    target: NodeRef,
    primary: &[NodeRef],
    secondary: &[NodeRef],
) -> Result<(Vec<NodeId>, Vec<NodeId>), Rejection> {
    let (kept_primary, kept_secondary, cancelled) = cancel_overlap(&arcs(primary), &arcs(secondary));
    log::trace!("cancelled {} mirrored arc pairs", cancelled);

    let (one, two) =
        stitch(&kept_primary, &kept_secondary, source, target).ok_or(Rejection::Fragmented)?;

    let first = resolver.unsplit_path(&one);
    let second = resolver.unsplit_path(&two);
    validate(base, &first, &second)?;
    Ok((first, second))
}
