//! `depwalk nodes`: list nodes and their direct dependencies.

use anyhow::Result;
use depwalk_core::Graph;
use serde::Serialize;

use super::Format;

#[derive(Debug, Serialize)]
struct NodeListing<'g> {
    name: &'g str,
    depends_on: Vec<DependencyListing<'g>>,
}

#[derive(Debug, Serialize)]
struct DependencyListing<'g> {
    node: &'g str,
    label: &'g str,
}

/// Print every node in registration order with its outgoing edges.
pub fn run(graph: &Graph<(), String>, format: Option<&str>) -> Result<()> {
    print!("{}", render(graph, format)?);
    Ok(())
}

pub(crate) fn render(graph: &Graph<(), String>, format: Option<&str>) -> Result<String> {
    let listings: Vec<NodeListing<'_>> = graph
        .nodes()
        .map(|node| NodeListing {
            name: node.name(),
            depends_on: node
                .edges()
                .iter()
                .filter_map(|edge| {
                    graph.node(edge.target()).map(|target| DependencyListing {
                        node: target.name(),
                        label: edge.value(),
                    })
                })
                .collect(),
        })
        .collect();

    match Format::parse(format)? {
        Format::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&listings)?)),
        Format::Text => {
            let mut out = format!(
                "graph '{}': {} nodes, {} edges\n",
                graph.name(),
                graph.node_count(),
                graph.edge_count()
            );
            for listing in &listings {
                out.push_str(&format!("  {}\n", listing.name));
                for dep in &listing.depends_on {
                    out.push_str(&format!("    -> {} ({})\n", dep.node, dep.label));
                }
            }
            Ok(out)
        }
    }
}
