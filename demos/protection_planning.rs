use std::sync::Arc;

use disjoint_paths::{
    parse_topology, DisjointPathEngine, LoggingObserver, Method, Result,
};

const TOPOLOGY: &str = "\
?SNDlib native format; type: network; version: 1.0
NODES (
  Braga ( -8.42 41.55 )
  Porto ( -8.61 41.15 )
  Aveiro ( -8.65 40.64 )
  Viseu ( -7.91 40.66 )
  Coimbra ( -8.42 40.20 )
  Leiria ( -8.81 39.74 )
  Lisboa ( -9.13 38.71 )
  Evora ( -7.91 38.57 )
)
LINKS (
  L1 ( Braga Porto ) 0.00 0.00 0.00 0.00 ( 40.00 55.00 )
  L2 ( Porto Aveiro ) 0.00 0.00 0.00 0.00 ( 40.00 70.00 )
  L3 ( Porto Viseu ) 0.00 0.00 0.00 0.00 ( 40.00 130.00 )
  L4 ( Aveiro Coimbra ) 0.00 0.00 0.00 0.00 ( 40.00 60.00 )
  L5 ( Viseu Coimbra ) 0.00 0.00 0.00 0.00 ( 40.00 90.00 )
  L6 ( Coimbra Leiria ) 0.00 0.00 0.00 0.00 ( 40.00 75.00 )
  L7 ( Leiria Lisboa ) 0.00 0.00 0.00 0.00 ( 40.00 145.00 )
  L8 ( Viseu Evora ) 0.00 0.00 0.00 0.00 ( 40.00 310.00 )
  L9 ( Evora Lisboa ) 0.00 0.00 0.00 0.00 ( 40.00 135.00 )
  L10 ( Braga Viseu ) 0.00 0.00 0.00 0.00 ( 40.00 160.00 )
)
";

fn main() -> Result<()> {
    env_logger::init();

    let topology = parse_topology(TOPOLOGY)?;
    let graph = topology.to_graph()?;
    println!(
        "Topology: {} nodes, {} links",
        topology.nodes.len(),
        topology.links.len()
    );

    let engine = DisjointPathEngine::new().with_observer(Arc::new(LoggingObserver));

    for (source, target) in [("Braga", "Lisboa"), ("Porto", "Coimbra"), ("Aveiro", "Evora")] {
        println!("\n{} -> {}", source, target);
        for method in [Method::TwoStep, Method::Suurballe] {
            let pair = engine.find_disjoint_pair(&graph, source, target, method)?;
            println!("  [{}] working:    {}", method, pair.primary);
            match (&pair.secondary, pair.total_cost()) {
                (Some(backup), Some(total)) => {
                    println!("  [{}] protection: {}", method, backup);
                    println!("  [{}] total cost: {}", method, total);
                }
                _ => println!("  [{}] protection: none", method),
            }
        }
    }

    Ok(())
}
