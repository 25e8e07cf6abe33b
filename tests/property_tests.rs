use std::collections::{BTreeSet, HashSet};

use disjoint_paths::graph::Graph;
use disjoint_paths::{
    find_disjoint_pair, find_shortest_path, DirectedGraph, GraphBuilder, Method, NodeId, Path,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn build(n: usize, raw: &[(usize, usize, u32)]) -> DirectedGraph {
    let mut builder = GraphBuilder::new();
    for i in 0..n {
        builder.add_node(&format!("n{i}")).unwrap();
    }
    let mut seen = HashSet::new();
    for &(u, v, c) in raw {
        if u != v && seen.insert((u, v)) {
            builder
                .add_edge(&format!("n{u}"), &format!("n{v}"), c as f64)
                .unwrap();
        }
    }
    builder.build()
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..=8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 1u32..=10), 0..=18),
        )
    })
}

fn id(graph: &DirectedGraph, name: &str) -> NodeId {
    graph.node_id(name).unwrap()
}

// Every simple path from `source` to `target`
fn simple_paths(graph: &DirectedGraph, source: NodeId, target: NodeId) -> Vec<Vec<NodeId>> {
    fn dfs(
        graph: &DirectedGraph,
        current: NodeId,
        target: NodeId,
        path: &mut Vec<NodeId>,
        out: &mut Vec<Vec<NodeId>>,
    ) {
        if current == target {
            out.push(path.clone());
            return;
        }
        let next: Vec<NodeId> = graph.outgoing_edges(current).map(|(v, _)| v).collect();
        for v in next {
            if !path.contains(&v) {
                path.push(v);
                dfs(graph, v, target, path, out);
                path.pop();
            }
        }
    }

    let mut out = Vec::new();
    dfs(graph, source, target, &mut vec![source], &mut out);
    out
}

fn interior(path: &[NodeId]) -> BTreeSet<NodeId> {
    if path.len() <= 2 {
        BTreeSet::new()
    } else {
        path[1..path.len() - 1].iter().copied().collect()
    }
}

// Cheapest total over pairs of distinct paths with disjoint interiors
fn best_pair_cost(graph: &DirectedGraph, paths: &[Vec<NodeId>]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, p) in paths.iter().enumerate() {
        for q in &paths[i + 1..] {
            if interior(p).is_disjoint(&interior(q)) {
                let total = graph.path_cost(p)? + graph.path_cost(q)?;
                best = Some(best.map_or(total, |b: f64| b.min(total)));
            }
        }
    }
    best
}

fn names_interior(path: &Path) -> BTreeSet<&str> {
    path.interior().iter().map(String::as_str).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn primary_path_is_optimal((n, raw) in graph_strategy()) {
        let graph = build(n, &raw);
        let (s, t) = ("n0".to_string(), format!("n{}", n - 1));
        let paths = simple_paths(&graph, id(&graph, &s), id(&graph, &t));
        let brute = paths.iter().filter_map(|p| graph.path_cost(p)).fold(None, |best: Option<f64>, c| {
            Some(best.map_or(c, |b| b.min(c)))
        });

        match find_shortest_path(&graph, &s, &t) {
            Ok(path) => {
                let expected = brute.unwrap_or(f64::NAN);
                prop_assert!((path.cost - expected).abs() < TOLERANCE);
            }
            Err(_) => prop_assert!(brute.is_none()),
        }
    }

    #[test]
    fn suurballe_pair_is_disjoint_and_optimal((n, raw) in graph_strategy()) {
        let graph = build(n, &raw);
        let (s, t) = ("n0".to_string(), format!("n{}", n - 1));
        let paths = simple_paths(&graph, id(&graph, &s), id(&graph, &t));
        let best = best_pair_cost(&graph, &paths);

        match find_disjoint_pair(&graph, &s, &t, Method::Suurballe) {
            Ok(pair) => {
                match (&pair.secondary, best) {
                    (Some(secondary), Some(best)) => {
                        prop_assert_ne!(&pair.primary.nodes, &secondary.nodes);
                        prop_assert!(names_interior(&pair.primary)
                            .is_disjoint(&names_interior(secondary)));
                        prop_assert!(pair.primary.cost <= secondary.cost);
                        let total = pair.total_cost().unwrap_or(f64::NAN);
                        prop_assert!((total - best).abs() < TOLERANCE, "got {} expected {}", total, best);
                    }
                    (None, None) => {}
                    (found, best) => prop_assert!(false, "found {:?}, brute force {:?}", found, best),
                }
            }
            Err(_) => prop_assert!(paths.is_empty()),
        }
    }

    #[test]
    fn suurballe_dominates_two_step((n, raw) in graph_strategy()) {
        let graph = build(n, &raw);
        let (s, t) = ("n0".to_string(), format!("n{}", n - 1));
        let two_step = find_disjoint_pair(&graph, &s, &t, Method::TwoStep);
        let suurballe = find_disjoint_pair(&graph, &s, &t, Method::Suurballe);

        if let (Ok(tsa), Ok(sur)) = (&two_step, &suurballe) {
            if let Some(tsa_total) = tsa.total_cost() {
                let sur_total = sur.total_cost();
                prop_assert!(sur_total.is_some());
                prop_assert!(sur_total.unwrap_or(f64::INFINITY) <= tsa_total + TOLERANCE);
            }
            if let Some(secondary) = &tsa.secondary {
                prop_assert!(names_interior(&tsa.primary)
                    .is_disjoint(&names_interior(secondary)));
            }
        } else {
            prop_assert_eq!(two_step.is_err(), suurballe.is_err());
        }
    }

    #[test]
    fn results_are_deterministic((n, raw) in graph_strategy()) {
        let graph = build(n, &raw);
        let rebuilt = build(n, &raw);
        let (s, t) = ("n0".to_string(), format!("n{}", n - 1));
        for method in [Method::TwoStep, Method::Suurballe] {
            let first = find_disjoint_pair(&graph, &s, &t, method);
            let second = find_disjoint_pair(&rebuilt, &s, &t, method);
            prop_assert_eq!(first, second);
        }
    }
}
