use disjoint_paths::graph::generators::{generate_grid, generate_ring};
use disjoint_paths::{
    build_graph, collect_statistics, find_disjoint_pair, parse_topology, DirectedGraph,
    EngineConfig, Error, Method,
};

const RING: &str = "\
?SNDlib native format; type: network; version: 1.0
# four sites on a ring with one diagonal
NODES (
  north ( 0.0 1.0 )
  east ( 1.0 0.0 )
  south ( 0.0 -1.0 )
  west ( -1.0 0.0 )
)
LINKS (
  L1 ( north east ) 0.00 0.00 0.00 0.00 ( 10.00 1.00 )
  L2 ( east south ) 0.00 0.00 0.00 0.00 ( 10.00 1.00 )
  L3 ( south west ) 0.00 0.00 0.00 0.00 ( 10.00 1.00 )
  L4 ( west north ) 0.00 0.00 0.00 0.00 ( 10.00 1.00 )
  L5 ( north south ) 0.00 0.00 5.00 0.00 ( )
)
DEMANDS (
  D1 ( north south ) 1 2.00 UNLIMITED
)
";

fn undirected(links: &[(&str, &str, f64)]) -> DirectedGraph {
    build_graph(links.iter().flat_map(|&(a, b, c)| [(a, b, c), (b, a, c)])).unwrap()
}

#[test]
fn test_parsed_topology_feeds_the_engine() {
    let topology = parse_topology(RING).unwrap();
    assert_eq!(topology.nodes.len(), 4);
    assert_eq!(topology.links.len(), 5);
    assert_eq!(topology.links[4].cost, 5.0);

    let graph = topology.to_graph().unwrap();
    assert_eq!(graph.edges().count(), 10);

    let pair = find_disjoint_pair(&graph, "north", "south", Method::Suurballe).unwrap();
    assert_eq!(pair.primary.nodes, vec!["north", "east", "south"]);
    assert_eq!(pair.secondary.unwrap().nodes, vec!["north", "west", "south"]);
}

#[test]
fn test_parse_errors_carry_line_numbers() {
    let broken = RING.replace("L3 ( south west )", "L3 ( south )");
    match parse_topology(&broken) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 12),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_plain_ring_is_fully_resolved_by_both_methods() {
    let graph = undirected(&[("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0), ("d", "a", 1.0)]);
    let stats = collect_statistics(&graph, EngineConfig::default()).unwrap();

    assert_eq!(stats.total_pairs, 6);
    assert_eq!(stats.resolved_two_step, 6);
    assert_eq!(stats.resolved_suurballe, 6);
    assert_eq!(stats.compared_pairs, 6);
    assert_eq!(stats.optimal_two_step, 6);
    assert_eq!(stats.mean_relative_error_pct, 0.0);
    assert_eq!(stats.optimality_rate(), 1.0);
    assert_eq!(stats.two_step_resolution_rate(), 1.0);
}

#[test]
fn test_trap_pair_counts_against_two_step() {
    let graph = undirected(&[
        ("s", "a", 1.0),
        ("a", "b", 1.0),
        ("b", "t", 1.0),
        ("s", "b", 3.0),
        ("a", "t", 3.0),
    ]);
    let stats = collect_statistics(&graph, EngineConfig::default()).unwrap();

    assert_eq!(stats.total_pairs, 6);
    assert_eq!(stats.resolved_suurballe, 6);
    assert!(stats.resolved_two_step < stats.resolved_suurballe);
    assert!(stats.optimal_two_step <= stats.compared_pairs);
    assert!(stats.optimality_rate() < 1.0);
    assert!(stats.mean_relative_error_pct >= 0.0);
}

#[test]
fn test_generated_topologies_are_two_connected() {
    // a ring and a grid have two disjoint routes between any pair
    for graph in [generate_ring(10, 0, 3).unwrap(), generate_grid(3, 3).unwrap()] {
        let stats = collect_statistics(&graph, EngineConfig::default()).unwrap();
        assert_eq!(stats.resolved_suurballe, stats.total_pairs);
        assert!(stats.mean_relative_error_pct >= 0.0);
    }
}
