//! CLI command implementations.

pub mod cycles;
pub mod init;
pub mod nodes;
pub mod walk;

use anyhow::{anyhow, bail, Result};
use depwalk_core::{Graph, NodeId};

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    /// Parse a `--format` value; absent means text.
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value {
            None | Some("text") => Ok(Format::Text),
            Some("json") => Ok(Format::Json),
            Some(other) => bail!("unknown format '{other}' (expected text or json)"),
        }
    }
}

/// Resolve a node name given on the command line.
pub(crate) fn node_named<V, E>(graph: &Graph<V, E>, name: &str) -> Result<NodeId> {
    graph
        .find_node(name)
        .ok_or_else(|| anyhow!("no node named '{name}' in graph '{}'", graph.name()))
}
