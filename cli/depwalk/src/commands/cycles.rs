//! `depwalk cycles`: report groups of mutually dependent nodes.

use anyhow::Result;
use depwalk_analysis::{components_json, dependency_cycles, format_components};
use depwalk_core::Graph;

use super::Format;

/// Print every dependency cycle (strong component with more than one node).
pub fn run(graph: &mut Graph<(), String>, format: Option<&str>) -> Result<()> {
    print!("{}", render(graph, format)?);
    Ok(())
}

pub(crate) fn render(graph: &mut Graph<(), String>, format: Option<&str>) -> Result<String> {
    let format = Format::parse(format)?;
    let cycles = dependency_cycles(graph);
    match format {
        Format::Json => Ok(format!("{}\n", components_json(graph, &cycles)?)),
        Format::Text => Ok(format!(
            "dependency cycles in '{}': {}\n{}",
            graph.name(),
            cycles.len(),
            format_components(graph, &cycles)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::DepwalkManifest;

    #[test]
    fn template_graph_has_one_cycle() {
        let mut graph = DepwalkManifest::from_str(&DepwalkManifest::template("Fred"))
            .unwrap()
            .build_graph()
            .unwrap();
        let out = render(&mut graph, None).unwrap();
        assert_eq!(
            out,
            "dependency cycles in 'Fred': 1\n  [1] node1 <-> node2 <-> node3\n"
        );
    }

    #[test]
    fn acyclic_graph_json_is_empty() {
        let mut graph = DepwalkManifest::from_str(
            "[graph]\n[[dependency]]\nnode = \"a\"\ndepends_on = \"b\"\n",
        )
        .unwrap()
        .build_graph()
        .unwrap();
        let out = render(&mut graph, Some("json")).unwrap();
        assert_eq!(out.trim(), "[]");
    }
}
