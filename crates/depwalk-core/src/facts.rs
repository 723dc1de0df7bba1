//! Graph construction from dependency facts.
//!
//! Dependency scanners emit `(node, depends_on, label)` triples. The
//! [`FactGraphBuilder`] turns a stream of such facts into a [`Graph`],
//! creating each node the first time a fact mentions it.
//!
//! # Example
//!
//! ```rust
//! use depwalk_core::{DependencyFact, FactGraphBuilder};
//!
//! let mut builder: FactGraphBuilder<(), String> = FactGraphBuilder::new("solution");
//! builder
//!     .add_fact(DependencyFact::new("main.rs", "parser.rs", "mod".to_string()))
//!     .unwrap();
//! builder
//!     .add_fact(DependencyFact::new("parser.rs", "lexer.rs", "use".to_string()))
//!     .unwrap();
//! builder.start_at("main.rs").unwrap();
//!
//! let graph = builder.build();
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 2);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::node::{Node, NodeId};
use crate::graph::{Graph, GraphError};

/// One resolved dependency: `node` depends on `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFact<E> {
    pub node: String,
    pub depends_on: String,
    pub label: E,
}

impl<E> DependencyFact<E> {
    pub fn new(node: impl Into<String>, depends_on: impl Into<String>, label: E) -> Self {
        Self {
            node: node.into(),
            depends_on: depends_on.into(),
            label,
        }
    }
}

/// Builds a [`Graph`] from dependency facts.
///
/// Keeps a name index so each fact costs one hash lookup per endpoint.
/// Node names are unique in graphs built this way.
pub struct FactGraphBuilder<V, E> {
    graph: Graph<V, E>,
    names: HashMap<String, NodeId>,
}

impl<V: Default, E> FactGraphBuilder<V, E> {
    /// Create a builder for an empty graph called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(name),
            names: HashMap::new(),
        }
    }

    /// Return the id of the node called `name`, registering it first if no
    /// fact has mentioned it yet.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = self.graph.add_node(Node::named(name));
        self.names.insert(name.to_string(), id);
        id
    }

    /// Record one fact. Returns whether a new edge was inserted; a self
    /// dependency or a repeated pair registers the nodes but adds no edge.
    pub fn add_fact(&mut self, fact: DependencyFact<E>) -> Result<bool, GraphError> {
        let from = self.add_node(&fact.node);
        let to = self.add_node(&fact.depends_on);
        let inserted = self.graph.add_edge(from, to, fact.label)?;
        if !inserted {
            debug!(node = %fact.node, depends_on = %fact.depends_on, "fact added no edge");
        }
        Ok(inserted)
    }

    /// Record every fact, returning how many edges were inserted.
    pub fn add_facts<I>(&mut self, facts: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = DependencyFact<E>>,
    {
        let mut inserted = 0;
        for fact in facts {
            if self.add_fact(fact)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Look up a node registered through this builder.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Make `name` the start node of the whole-graph walk.
    pub fn start_at(&mut self, name: &str) -> Result<NodeId, GraphError> {
        let id = self
            .node_id(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))?;
        self.graph.set_start(id)?;
        Ok(id)
    }

    pub fn show_backtrack(&mut self, show: bool) {
        self.graph.set_show_backtrack(show);
    }

    pub fn build(self) -> Graph<V, E> {
        self.graph
    }
}
