use crate::graph::split::{NodeRef, SplitResolver};
use crate::graph::traits::MutableGraph;

/// Reverses the primary path inside a reduced-cost graph.
///
/// For every arc `(u, v)` of `primary` (in split space):
/// 1. the pre-existing link from `v`'s node back to `u`'s node is deleted,
///    so the second search cannot walk the primary route backwards over it;
/// 2. `(u, v)` is removed and `(v, u)` inserted with cost exactly 0.
///
/// All deletions happen before any reversal is inserted.
pub fn transform<G>(graph: &mut G, resolver: &SplitResolver, primary: &[NodeRef])
where
    G: MutableGraph<Node = NodeRef>,
{
    for hop in primary.windows(2) {
        let (u, v) = (hop[0].original(), hop[1].original());
        if u == v {
            // internal arc of a split node has no opposite link
            continue;
        }
        let (back_from, back_to) = (resolver.out_ref(v), resolver.in_ref(u));
        if graph.remove_edge(back_from, back_to).is_some() {
            log::trace!("removed opposite link {} -> {}", graph.label(back_from), graph.label(back_to));
        }
    }

    for hop in primary.windows(2) {
        let (u, v) = (hop[0], hop[1]);
        if graph.remove_edge(u, v).is_none() {
            log::warn!("primary arc {} -> {} missing from reduced graph", graph.label(u), graph.label(v));
        }
        graph.add_edge(v, u, 0.0);
    }
}
