//! Node identifier and the Node struct.
//!
//! A node is a named vertex in a dependency graph: one source file, module,
//! or package. It owns its outgoing edges and carries the transient marks
//! used while a walk is in progress.

use std::fmt;

use serde::Serialize;

use super::edge::Edge;

/// Position of a node in its owning graph's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Zero-based registration index within the owning graph.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named vertex in a dependency graph.
#[derive(Debug, Clone, Serialize)]
pub struct Node<V, E> {
    name: String,
    /// Opaque payload supplied by the caller.
    pub value: V,
    edges: Vec<Edge<E>>,
    #[serde(skip)]
    visited: bool,
    /// Discovery number, written by strongly-connected-component numbering.
    /// Zero means "not yet numbered"; the depth-first walk never touches it.
    #[serde(skip)]
    pub dfn: usize,
    /// Low-link number, paired with [`Node::dfn`].
    #[serde(skip)]
    pub low: usize,
}

impl<V, E> Node<V, E> {
    /// Create a node with the given name and payload.
    pub fn new(name: impl Into<String>, value: V) -> Self {
        Self {
            name: name.into(),
            value,
            edges: Vec::new(),
            visited: false,
            dfn: 0,
            low: 0,
        }
    }

    /// Create a node carrying `V::default()`.
    pub fn named(name: impl Into<String>) -> Self
    where
        V: Default,
    {
        Self::new(name, V::default())
    }

    /// The node's name, its identity key within a graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    /// Number of outgoing edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Ids of the nodes this node depends on, in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().map(Edge::target)
    }

    /// Whether the current walk has already discovered this node.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Clear the visited mark. Idempotent.
    pub fn unmark(&mut self) {
        self.visited = false;
    }

    pub(crate) fn mark(&mut self) {
        self.visited = true;
    }

    pub(crate) fn push_edge(&mut self, edge: Edge<E>) {
        self.edges.push(edge);
    }

    /// Drop edges and walk state, so the node can join a graph whose ids its
    /// edges never referred to.
    pub(crate) fn detach(&mut self) {
        self.edges.clear();
        self.visited = false;
        self.dfn = 0;
        self.low = 0;
    }
}

impl<V, E> fmt::Display for Node<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
