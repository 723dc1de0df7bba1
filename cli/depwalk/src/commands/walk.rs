//! `depwalk walk`: depth-first walk of the dependency graph.

use anyhow::{Context, Result};
use depwalk_analysis::{format_trace, record_walk, record_walk_from, trace_json};
use depwalk_core::Graph;

use super::{node_named, Format};

/// Walk the graph and print the trace.
///
/// `start` overrides the manifest's start node; `from` walks only what is
/// reachable from one node instead of the whole graph.
pub fn run(
    graph: &mut Graph<(), String>,
    start: Option<&str>,
    from: Option<&str>,
    show_backtrack: bool,
    format: Option<&str>,
) -> Result<()> {
    print!("{}", render(graph, start, from, show_backtrack, format)?);
    Ok(())
}

pub(crate) fn render(
    graph: &mut Graph<(), String>,
    start: Option<&str>,
    from: Option<&str>,
    show_backtrack: bool,
    format: Option<&str>,
) -> Result<String> {
    let format = Format::parse(format)?;
    if let Some(name) = start {
        let id = node_named(graph, name)?;
        graph.set_start(id)?;
    }
    if show_backtrack {
        graph.set_show_backtrack(true);
    }

    let (header, trace) = match from {
        Some(name) => {
            let id = node_named(graph, name)?;
            let trace = record_walk_from(graph, id)?;
            (format!("walk from {name}"), trace)
        }
        None => {
            let trace = record_walk(graph)
                .with_context(|| format!("walking graph '{}'", graph.name()))?;
            let start_name = graph
                .start()
                .and_then(|id| graph.node(id))
                .map(|node| node.name().to_string())
                .unwrap_or_default();
            (
                format!("walk of '{}' starting at {start_name}", graph.name()),
                trace,
            )
        }
    };

    match format {
        Format::Json => Ok(format!("{}\n", trace_json(trace.events())?)),
        Format::Text => {
            let backtracks = if graph.show_backtrack() { "shown" } else { "hidden" };
            Ok(format!(
                "{header} (backtracks {backtracks})\n{}",
                format_trace(trace.events())
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DepwalkManifest;

    fn fixture() -> Graph<(), String> {
        DepwalkManifest::from_str(&DepwalkManifest::template("Fred"))
            .unwrap()
            .build_graph()
            .unwrap()
    }

    #[test]
    fn text_walk_from_manifest_start() {
        let mut graph = fixture();
        let out = render(&mut graph, None, None, false, None).unwrap();
        assert_eq!(
            out,
            "walk of 'Fred' starting at node1 (backtracks hidden)\n  node1 edge12\n  node2 edge23\n  node3\n  node2 edge24\n  node4\n  node5\n"
        );
    }

    #[test]
    fn start_override_and_backtracks() {
        let mut graph = fixture();
        let out = render(&mut graph, Some("node2"), None, true, None).unwrap();
        assert!(out.starts_with("walk of 'Fred' starting at node2 (backtracks shown)\n"));
        assert!(out.contains("  node3\n  node2 edge24\n"));
    }

    #[test]
    fn single_walk_from_node() {
        let mut graph = fixture();
        let out = render(&mut graph, None, Some("node4"), false, None).unwrap();
        assert_eq!(out, "walk from node4 (backtracks hidden)\n  node4\n");
    }

    #[test]
    fn json_walk() {
        let mut graph = fixture();
        let out = render(&mut graph, None, None, false, Some("json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["event"], "node");
        assert_eq!(value[0]["name"], "node1");
        assert_eq!(value[1]["label"], "edge12");
    }

    #[test]
    fn unknown_start_node() {
        let mut graph = fixture();
        let err = render(&mut graph, Some("ghost"), None, false, None).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn missing_start_node_is_reported() {
        let mut graph = DepwalkManifest::from_str(
            "[graph]\n[[dependency]]\nnode = \"a\"\ndepends_on = \"b\"\n",
        )
        .unwrap()
        .build_graph()
        .unwrap();
        let err = render(&mut graph, None, None, false, None).unwrap_err();
        assert!(format!("{err:#}").contains("no starting node defined"));
    }
}
