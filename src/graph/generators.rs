//! Seeded topology generators.
//!
//! Every generated link is added in both directions with the same cost, the
//! way physical links appear in real topologies. Node names are zero-padded
//! so their lexical order matches their numeric order.

use crate::graph::directed::{DirectedGraph, GraphBuilder};
use crate::Result;
use rand::prelude::*;
use rand::rngs::StdRng;

fn node_name(i: usize, n: usize) -> String {
    let width = n.saturating_sub(1).to_string().len();
    format!("n{:0width$}", i, width = width)
}

fn add_link(builder: &mut GraphBuilder, a: &str, b: &str, cost: f64) -> Result<()> {
    builder.add_edge(a, b, cost)?;
    builder.add_edge(b, a, cost)?;
    Ok(())
}

/// Ring of `n` nodes where each node also links to the node `chord` steps
/// ahead (no chords when `chord < 2`). Costs are drawn in `1.0..10.0`.
pub fn generate_ring(n: usize, chord: usize, seed: u64) -> Result<DirectedGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new();
    let names: Vec<String> = (0..n).map(|i| node_name(i, n)).collect();
    for name in &names {
        builder.add_node(name)?;
    }
    if n < 2 {
        return Ok(builder.build());
    }

    let mut linked = std::collections::HashSet::new();
    let mut steps = vec![1];
    if chord >= 2 && chord < n {
        steps.push(chord);
    }
    for &step in &steps {
        for i in 0..n {
            let j = (i + step) % n;
            let key = (i.min(j), i.max(j));
            if i == j || !linked.insert(key) {
                continue;
            }
            let cost = rng.gen_range(1.0..10.0);
            add_link(&mut builder, &names[i], &names[j], cost)?;
        }
    }

    Ok(builder.build())
}

/// `rows x cols` grid with 4-connectivity and unit costs
pub fn generate_grid(rows: usize, cols: usize) -> Result<DirectedGraph> {
    let n = rows * cols;
    let mut builder = GraphBuilder::new();
    let index = |r: usize, c: usize| r * cols + c;

    for r in 0..rows {
        for c in 0..cols {
            let current = node_name(index(r, c), n);
            builder.add_node(&current)?;
            if c + 1 < cols {
                add_link(&mut builder, &current, &node_name(index(r, c + 1), n), 1.0)?;
            }
            if r + 1 < rows {
                add_link(&mut builder, &current, &node_name(index(r + 1, c), n), 1.0)?;
            }
        }
    }

    Ok(builder.build())
}

/// Random geometric graph in the unit square: nodes within distance
/// `radius` are linked, with the Euclidean distance as cost.
pub fn generate_geometric(n: usize, radius: f64, seed: u64) -> Result<DirectedGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new();

    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    for i in 0..n {
        builder.add_node(&node_name(i, n))?;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (x1, y1) = points[i];
            let (x2, y2) = points[j];
            let dist = ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt();
            if dist <= radius {
                add_link(&mut builder, &node_name(i, n), &node_name(j, n), dist)?;
            }
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::traits::Graph;

    #[test]
    fn ring_links_are_bidirectional() {
        let g = generate_ring(6, 3, 7).unwrap();
        assert_eq!(g.vertex_count(), 6);
        // 6 ring links + 3 distinct chords, both directions
        assert_eq!(g.edge_count(), 18);
        for (u, v, c) in g.edges() {
            assert_eq!(g.get_edge_weight(v, u), Some(c));
        }
    }

    #[test]
    fn grid_has_expected_shape() {
        let g = generate_grid(3, 4).unwrap();
        assert_eq!(g.vertex_count(), 12);
        // (3 * 3 + 2 * 4) links, both directions
        assert_eq!(g.edge_count(), 34);
        assert!(g.has_edge_between("n00", "n01"));
        assert!(g.has_edge_between("n04", "n00"));
        assert!(!g.has_edge_between("n03", "n04"));
    }

    #[test]
    fn geometric_is_reproducible() {
        let a = generate_geometric(20, 0.4, 42).unwrap();
        let b = generate_geometric(20, 0.4, 42).unwrap();
        let ea: Vec<_> = a.edges().collect();
        let eb: Vec<_> = b.edges().collect();
        assert_eq!(ea, eb);
    }
}
