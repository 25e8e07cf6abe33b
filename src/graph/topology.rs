//! Reader for SNDlib native topology files.
//!
//! ```text
//! NODES (
//!   Lisboa ( -9.13 38.71 )
//!   Porto ( -8.61 41.15 )
//! )
//! LINKS (
//!   L1 ( Lisboa Porto ) 0.00 0.00 0.00 0.00 ( 40.00 3290.00 )
//! )
//! ```
//!
//! Only `NODES` and `LINKS` are read; `META`, `DEMANDS` and any other
//! section is skipped. Lines starting with `#` are comments and the `?SNDlib`
//! format banner is ignored.

use serde::{Deserialize, Serialize};

use crate::graph::directed::{DirectedGraph, GraphBuilder};
use crate::{Error, Result};

/// A node and its map coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// A physical (bidirectional) link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyLink {
    pub id: String,
    pub source: String,
    pub target: String,
    pub cost: f64,
}

/// Parsed topology file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub links: Vec<TopologyLink>,
}

impl Topology {
    /// Builds the directed graph, one edge per direction of every link.
    ///
    /// A link listed twice between the same pair of nodes is rejected as a
    /// duplicate edge.
    pub fn to_graph(&self) -> Result<DirectedGraph> {
        let mut builder = GraphBuilder::new();
        for node in &self.nodes {
            builder.add_node(&node.name)?;
        }
        for link in &self.links {
            builder.add_edge(&link.source, &link.target, link.cost)?;
            builder.add_edge(&link.target, &link.source, link.cost)?;
        }
        Ok(builder.build())
    }

    /// Coordinates of a named node
    pub fn position(&self, name: &str) -> Option<(f64, f64)> {
        self.nodes
            .iter()
            .find(|n| n.name == name)
            .map(|n| (n.x, n.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Nodes,
    Links,
    Skipped,
}

/// Splits a line into tokens, with every parenthesis its own token
fn tokenize(line: &str) -> Vec<String> {
    line.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn parse_number(token: Option<&String>, line: usize, what: &str) -> Result<f64> {
    let token = token.ok_or_else(|| parse_error(line, format!("missing {what}")))?;
    token
        .parse::<f64>()
        .map_err(|_| parse_error(line, format!("invalid {what} '{token}'")))
}

fn expect(tokens: &[String], index: usize, expected: &str, line: usize) -> Result<()> {
    match tokens.get(index) {
        Some(t) if t == expected => Ok(()),
        Some(t) => Err(parse_error(line, format!("expected '{expected}', found '{t}'"))),
        None => Err(parse_error(line, format!("expected '{expected}'"))),
    }
}

/// `name ( x y )`
fn parse_node(tokens: &[String], line: usize) -> Result<TopologyNode> {
    expect(tokens, 1, "(", line)?;
    let x = parse_number(tokens.get(2), line, "x coordinate")?;
    let y = parse_number(tokens.get(3), line, "y coordinate")?;
    expect(tokens, 4, ")", line)?;
    Ok(TopologyNode {
        name: tokens[0].clone(),
        x,
        y,
    })
}

/// `id ( source target ) pre_cap pre_cap_cost routing_cost setup_cost ( {cap cost}* )`
fn parse_link(tokens: &[String], line: usize) -> Result<TopologyLink> {
    expect(tokens, 1, "(", line)?;
    let source = tokens
        .get(2)
        .filter(|t| *t != ")")
        .ok_or_else(|| parse_error(line, "missing link source"))?;
    let target = tokens
        .get(3)
        .filter(|t| *t != ")")
        .ok_or_else(|| parse_error(line, "missing link target"))?;
    expect(tokens, 4, ")", line)?;

    parse_number(tokens.get(5), line, "pre-installed capacity")?;
    parse_number(tokens.get(6), line, "pre-installed capacity cost")?;
    let routing_cost = parse_number(tokens.get(7), line, "routing cost")?;
    parse_number(tokens.get(8), line, "setup cost")?;

    // the first module cost, when modules are listed, prices the link
    let cost = match tokens.get(9).map(String::as_str) {
        Some("(") if tokens.get(10).map(String::as_str) != Some(")") => {
            parse_number(tokens.get(10), line, "module capacity")?;
            parse_number(tokens.get(11), line, "module cost")?
        }
        _ => routing_cost,
    };

    Ok(TopologyLink {
        id: tokens[0].clone(),
        source: source.clone(),
        target: target.clone(),
        cost,
    })
}

/// Parses an SNDlib native topology
pub fn parse_topology(text: &str) -> Result<Topology> {
    let mut topology = Topology::default();
    let mut section: Option<Section> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('?') {
            continue;
        }
        let tokens = tokenize(trimmed);

        match section {
            None => {
                if tokens.last().map(String::as_str) != Some("(") || tokens.len() != 2 {
                    return Err(parse_error(line, format!("expected a section header, found '{trimmed}'")));
                }
                section = Some(match tokens[0].as_str() {
                    "NODES" => Section::Nodes,
                    "LINKS" => Section::Links,
                    other => {
                        log::trace!("skipping section {} at line {}", other, line);
                        Section::Skipped
                    }
                });
            }
            Some(_) if trimmed == ")" => section = None,
            Some(Section::Nodes) => topology.nodes.push(parse_node(&tokens, line)?),
            Some(Section::Links) => {
                let link = parse_link(&tokens, line)?;
                if !topology.nodes.is_empty() {
                    for end in [&link.source, &link.target] {
                        if !topology.nodes.iter().any(|n| &n.name == end) {
                            return Err(parse_error(
                                line,
                                format!("link {} refers to unknown node {}", link.id, end),
                            ));
                        }
                    }
                }
                topology.links.push(link);
            }
            Some(Section::Skipped) => {}
        }
    }

    if section.is_some() {
        return Err(parse_error(text.lines().count(), "unterminated section"));
    }

    log::debug!(
        "parsed topology: {} nodes, {} links",
        topology.nodes.len(),
        topology.links.len()
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    const NETWORK: &str = "\
?SNDlib native format; type: network; version: 1.0
# network small
META (
  granularity = 6month
)

# NODE SECTION
NODES (
  Lisboa ( -9.13 38.71 )
  Porto ( -8.61 41.15 )
  Coimbra ( -8.42 40.20 )
)

# LINK SECTION
LINKS (
  L1 ( Lisboa Coimbra ) 0.00 0.00 0.00 0.00 ( 40.00 120.00 160.00 200.00 )
  L2 ( Coimbra Porto ) 0.00 0.00 0.00 0.00 ( 40.00 90.00 )
  L3 ( Lisboa Porto ) 0.00 0.00 250.00 0.00 ( )
)

DEMANDS (
  D1 ( Lisboa Porto ) 1 10.00 UNLIMITED
)
";

    #[test]
    fn reads_nodes_and_links() {
        let topology = parse_topology(NETWORK).unwrap();
        assert_eq!(topology.nodes.len(), 3);
        assert_eq!(topology.position("Porto"), Some((-8.61, 41.15)));

        let costs: Vec<(&str, f64)> = topology.links.iter().map(|l| (l.id.as_str(), l.cost)).collect();
        assert_eq!(costs, vec![("L1", 120.0), ("L2", 90.0), ("L3", 250.0)]);
    }

    #[test]
    fn links_become_two_directed_edges() {
        let graph = parse_topology(NETWORK).unwrap().to_graph().unwrap();
        assert_eq!(graph.edge_cost("Lisboa", "Coimbra"), Some(120.0));
        assert_eq!(graph.edge_cost("Coimbra", "Lisboa"), Some(120.0));
        assert_eq!(graph.edge_cost("Porto", "Lisboa"), Some(250.0));
    }

    #[test]
    fn duplicate_link_is_rejected() {
        let text = "LINKS (\n L1 ( a b ) 0 0 1 0 ( )\n L2 ( b a ) 0 0 1 0 ( )\n)\n";
        let err = parse_topology(text).unwrap().to_graph().unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(GraphError::DuplicateEdge { .. })));
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let text = "NODES (\n  a ( 1.0 )\n)\n";
        match parse_topology(text) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }

        let text = "NODES (\n  a ( 1.0 2.0 )\n";
        assert!(matches!(parse_topology(text), Err(Error::Parse { .. })));
    }

    #[test]
    fn links_must_name_declared_nodes() {
        let text = "NODES (\n  a ( 0 0 )\n  b ( 1 1 )\n)\nLINKS (\n  L1 ( a c ) 0 0 1 0 ( )\n)\n";
        match parse_topology(text) {
            Err(Error::Parse { line, message }) => {
                assert_eq!(line, 6);
                assert!(message.contains("unknown node c"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
