use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use disjoint_paths::graph::generators::{generate_geometric, generate_grid};
use disjoint_paths::{DirectedGraph, DisjointPathEngine, Method};

fn corner_pair(graph: &DirectedGraph) -> (String, String) {
    let first = graph.nodes().next().unwrap_or_default().to_string();
    let last = graph.nodes().last().unwrap_or_default().to_string();
    (first, last)
}

fn bench_methods(c: &mut Criterion) {
    let engine = DisjointPathEngine::new();
    let mut group = c.benchmark_group("disjoint_pair");

    for side in [5usize, 10, 20] {
        let graph = generate_grid(side, side).expect("grid");
        let (source, target) = corner_pair(&graph);
        for method in [Method::TwoStep, Method::Suurballe] {
            group.bench_with_input(
                BenchmarkId::new(format!("grid/{}", method), side * side),
                &graph,
                |b, g| b.iter(|| engine.find_disjoint_pair(black_box(g), &source, &target, method)),
            );
        }
    }

    for n in [50usize, 200] {
        let graph = generate_geometric(n, 0.3, 7).expect("geometric");
        let (source, target) = corner_pair(&graph);
        for method in [Method::TwoStep, Method::Suurballe] {
            group.bench_with_input(
                BenchmarkId::new(format!("geometric/{}", method), n),
                &graph,
                |b, g| b.iter(|| engine.find_disjoint_pair(black_box(g), &source, &target, method)),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_methods);
criterion_main!(benches);
