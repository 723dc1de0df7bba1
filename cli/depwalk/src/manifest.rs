//! `depwalk.toml` manifest parsing and graph assembly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use depwalk_core::{DependencyFact, FactGraphBuilder, Graph};
use serde::{Deserialize, Serialize};

/// File name searched for by [`DepwalkManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "depwalk.toml";

/// The top-level manifest: graph settings plus the dependency facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepwalkManifest {
    /// Graph settings (required).
    pub graph: GraphConfig,
    /// Nodes declared without dependencies, registered before any fact.
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeEntry>,
    /// Resolved dependency facts, in registration order.
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencyEntry>,
}

/// `[graph]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_name")]
    pub name: String,
    /// Node the whole-graph walk starts at.
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub show_backtrack: bool,
}

fn default_graph_name() -> String {
    "dependencies".to_string()
}

/// `[[node]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub name: String,
}

/// `[[dependency]]` entry: `node` depends on `depends_on`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub node: String,
    pub depends_on: String,
    /// Edge label; defaults to `"<node> -> <depends_on>"`.
    #[serde(default)]
    pub label: Option<String>,
}

impl DependencyEntry {
    fn to_fact(&self) -> DependencyFact<String> {
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| format!("{} -> {}", self.node, self.depends_on));
        DependencyFact::new(self.node.as_str(), self.depends_on.as_str(), label)
    }
}

impl DepwalkManifest {
    /// Search upward from `start_dir` for a `depwalk.toml` file, parse and
    /// return it along with the path it was found at.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let manifest = Self::load(&candidate)?;
                return Ok(Some((manifest, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Read and parse a manifest at an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing depwalk.toml")
    }

    /// The dependency facts this manifest declares.
    pub fn facts(&self) -> Vec<DependencyFact<String>> {
        self.dependencies.iter().map(DependencyEntry::to_fact).collect()
    }

    /// Assemble the graph: standalone nodes first, then every fact, then
    /// the start node and backtrack setting.
    pub fn build_graph(&self) -> Result<Graph<(), String>> {
        let mut builder = FactGraphBuilder::new(self.graph.name.as_str());
        for node in &self.nodes {
            builder.add_node(&node.name);
        }
        builder.add_facts(self.facts())?;
        if let Some(start) = &self.graph.start {
            builder
                .start_at(start)
                .with_context(|| format!("[graph].start = \"{start}\""))?;
        }
        builder.show_backtrack(self.graph.show_backtrack);
        Ok(builder.build())
    }

    /// Generate the default template for `depwalk init`.
    pub fn template(name: &str) -> String {
        let mut out = format!(
            r#"[graph]
name = "{name}"
start = "node1"
show_backtrack = false
"#
        );
        for (node, depends_on, label) in [
            ("node1", "node2", "edge12"),
            ("node1", "node3", "edge13"),
            ("node2", "node3", "edge23"),
            ("node2", "node4", "edge24"),
            ("node3", "node1", "edge31"),
            ("node5", "node1", "edge51"),
            ("node5", "node4", "edge54"),
        ] {
            out.push_str(&format!(
                "\n[[dependency]]\nnode = \"{node}\"\ndepends_on = \"{depends_on}\"\nlabel = \"{label}\"\n"
            ));
        }
        out
    }
}
