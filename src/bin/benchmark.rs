use std::time::{Duration, Instant};

use disjoint_paths::graph::generators::{generate_geometric, generate_grid, generate_ring};
use disjoint_paths::{collect_statistics, DirectedGraph, EngineConfig};

// Times one all-pairs sweep and prints how both methods fared
fn benchmark_topology(name: &str, graph: &DirectedGraph) -> Result<Duration, disjoint_paths::Error> {
    println!(
        "Running all pairs on {} ({} nodes, {} edges)...",
        name,
        graph.nodes().count(),
        graph.edges().count()
    );

    let start = Instant::now();
    let stats = collect_statistics(graph, EngineConfig::default())?;
    let duration = start.elapsed();

    println!("  - {} pairs in {:?}", stats.total_pairs, duration);
    println!(
        "  - resolved: two-step {:.1}%, suurballe {:.1}%",
        stats.two_step_resolution_rate() * 100.0,
        stats.suurballe_resolution_rate() * 100.0
    );
    println!(
        "  - two-step optimal on {:.1}% of resolvable pairs, mean excess {:.2}%",
        stats.optimality_rate() * 100.0,
        stats.mean_relative_error_pct
    );

    Ok(duration)
}

fn main() -> Result<(), disjoint_paths::Error> {
    env_logger::init();

    let seed = 2024;
    let topologies = vec![
        ("ring-24", generate_ring(24, 0, seed)?),
        ("ring-24+chords", generate_ring(24, 5, seed)?),
        ("grid-6x6", generate_grid(6, 6)?),
        ("grid-10x10", generate_grid(10, 10)?),
        ("geometric-60", generate_geometric(60, 0.25, seed)?),
        ("geometric-150", generate_geometric(150, 0.15, seed)?),
    ];

    println!("=====================================================");
    println!("Benchmark: Two-Step vs Suurballe (all node pairs)");
    println!("=====================================================");

    let mut results = Vec::new();
    for (name, graph) in &topologies {
        let duration = benchmark_topology(name, graph)?;
        results.push((*name, duration));
    }

    println!("\n{:<16} | {:<10}", "Topology", "Time (ms)");
    println!("-----------------------------");
    for (name, duration) in &results {
        println!("{:<16} | {:<10.2}", name, duration.as_secs_f64() * 1000.0);
    }

    Ok(())
}
