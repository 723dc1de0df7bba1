//! The graph container and its depth-first walk.
//!
//! A [`Graph`] owns every node in an arena (its adjacency list). Edges refer
//! to their targets by [`NodeId`], so cyclic dependencies are plain index
//! relationships. The walk marks nodes as it *discovers* them rather than
//! when it finishes them, which is what lets it terminate on cycles and
//! tell whether a node still has undiscovered children after backtracking.

pub mod edge;
pub mod node;

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use self::edge::Edge;
use self::node::{Node, NodeId};
use crate::visitor::Visitor;

/// Errors from graph construction and walking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("no node named '{0}'")]
    UnknownNode(String),

    #[error("no nodes in graph")]
    EmptyGraph,

    #[error("no starting node defined")]
    NoStartNode,

    #[error("no visitor registered")]
    NoVisitor,
}

/// A named directed graph of dependencies.
///
/// `V` is the node payload, `E` the edge label.
#[derive(Serialize)]
pub struct Graph<V, E> {
    name: String,
    nodes: Vec<Node<V, E>>,
    start: Option<NodeId>,
    show_backtrack: bool,
    #[serde(skip)]
    visitor: Option<Box<dyn Visitor<V, E>>>,
}

impl<V, E> Graph<V, E> {
    /// Create an empty graph with no start node and no visitor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            start: None,
            show_backtrack: false,
            visitor: None,
        }
    }

    /// The graph's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // --- Nodes ---

    /// Append a node to the adjacency list.
    ///
    /// The node joins without edges or marks: edges only come from
    /// [`Graph::add_edge`], so a node cloned out of another graph cannot
    /// point at ids this graph never issued. Names are not checked for
    /// uniqueness; see [`Graph::find_node`].
    pub fn add_node(&mut self, mut node: Node<V, E>) -> NodeId {
        if node.edge_count() > 0 {
            debug!(
                node = %node.name(),
                edges = node.edge_count(),
                "dropping edges of added node"
            );
        }
        node.detach();
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Look up a node by id; `None` for ids this graph never issued.
    pub fn node(&self, id: NodeId) -> Option<&Node<V, E>> {
        self.nodes.get(id.0)
    }

    /// Mutable access to a node's payload and numbering fields.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V, E>> {
        self.nodes.get_mut(id.0)
    }

    /// Iterate over nodes in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<V, E>> {
        self.nodes.iter()
    }

    /// Iterate over node ids in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::edge_count).sum()
    }

    /// Whether no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a node by name with a linear scan.
    ///
    /// When several nodes share a name, the first one registered wins.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.name() == name)
            .map(NodeId)
    }

    // --- Edges ---

    /// Add a dependency edge `from -> to` labeled `value`.
    ///
    /// Returns `Ok(false)` without inserting anything when `to` has the same
    /// name as `from` (self-loop) or when `from` already has an edge to a
    /// node of that name. Either id being out of range is an error.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, value: E) -> Result<bool, GraphError> {
        let target = self.node(to).ok_or(GraphError::NodeNotFound(to))?;
        let source = self.node(from).ok_or(GraphError::NodeNotFound(from))?;

        if source.name() == target.name() {
            debug!(node = %source.name(), "ignoring self-loop");
            return Ok(false);
        }
        let duplicate = source
            .targets()
            .any(|existing| self.nodes[existing.0].name() == target.name());
        if duplicate {
            debug!(from = %source.name(), to = %target.name(), "ignoring duplicate edge");
            return Ok(false);
        }

        self.nodes[from.0].push_edge(Edge::new(to, value));
        Ok(true)
    }

    // --- Walk configuration ---

    /// The node the whole-graph walk begins at, if set.
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    /// Set the node the whole-graph walk begins at.
    pub fn set_start(&mut self, id: NodeId) -> Result<(), GraphError> {
        if id.0 >= self.nodes.len() {
            return Err(GraphError::NodeNotFound(id));
        }
        self.start = Some(id);
        Ok(())
    }

    /// Unset the start node.
    pub fn clear_start(&mut self) {
        self.start = None;
    }

    /// Whether every backtrack re-announces the node.
    pub fn show_backtrack(&self) -> bool {
        self.show_backtrack
    }

    /// When set, a node is re-announced every time the walk backtracks to
    /// it, not only when it still has undiscovered children.
    pub fn set_show_backtrack(&mut self, show: bool) {
        self.show_backtrack = show;
    }

    /// Register the visitor used by [`Graph::walk`] and [`Graph::walk_from`],
    /// returning the previously registered one.
    pub fn set_visitor(
        &mut self,
        visitor: Box<dyn Visitor<V, E>>,
    ) -> Option<Box<dyn Visitor<V, E>>> {
        self.visitor.replace(visitor)
    }

    /// Remove and return the registered visitor.
    pub fn take_visitor(&mut self) -> Option<Box<dyn Visitor<V, E>>> {
        self.visitor.take()
    }

    /// Whether a visitor is registered.
    pub fn has_visitor(&self) -> bool {
        self.visitor.is_some()
    }

    // --- Marks ---

    /// Find the first outgoing edge of `id` whose target is unvisited, and
    /// mark that target visited.
    pub fn next_unvisited_child(&mut self, id: NodeId) -> Option<&Edge<E>> {
        if id.0 >= self.nodes.len() {
            return None;
        }
        let position = self.mark_next_unvisited_child(id)?;
        self.nodes[id.0].edges().get(position)
    }

    /// Whether any outgoing edge of `id` leads to an unvisited node.
    pub fn has_unvisited_child(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| {
            node.targets()
                .any(|target| !self.nodes[target.0].is_visited())
        })
    }

    /// Clear the visited mark on every node.
    pub fn clear_marks(&mut self) {
        for node in &mut self.nodes {
            node.unmark();
        }
    }

    // --- Walking ---

    /// Walk the whole graph with the registered visitor.
    ///
    /// Starts at the start node, then walks from every node the first pass
    /// did not reach, in registration order. All marks are cleared
    /// afterwards. Fails without walking if the graph is empty, has no start
    /// node, or has no visitor, checked in that order.
    pub fn walk(&mut self) -> Result<(), GraphError> {
        let start = self.walk_start()?;
        let Some(mut visitor) = self.visitor.take() else {
            warn!(graph = %self.name, "no visitor registered");
            return Err(GraphError::NoVisitor);
        };
        self.walk_all(start, visitor.as_mut());
        self.visitor = Some(visitor);
        Ok(())
    }

    /// Walk the whole graph with a caller-owned visitor.
    ///
    /// Same coverage and cleanup as [`Graph::walk`]; the registered visitor,
    /// if any, is left alone.
    pub fn walk_with<Vis>(&mut self, visitor: &mut Vis) -> Result<(), GraphError>
    where
        Vis: Visitor<V, E> + ?Sized,
    {
        let start = self.walk_start()?;
        self.walk_all(start, visitor);
        Ok(())
    }

    /// Depth-first walk from a single node with the registered visitor.
    ///
    /// Marks are left in place; call [`Graph::clear_marks`] before walking
    /// again.
    pub fn walk_from(&mut self, id: NodeId) -> Result<(), GraphError> {
        if id.0 >= self.nodes.len() {
            return Err(GraphError::NodeNotFound(id));
        }
        let Some(mut visitor) = self.visitor.take() else {
            warn!(graph = %self.name, "no visitor registered");
            return Err(GraphError::NoVisitor);
        };
        self.walk_node(id, visitor.as_mut());
        self.visitor = Some(visitor);
        Ok(())
    }

    /// Depth-first walk from a single node with a caller-owned visitor.
    pub fn walk_from_with<Vis>(&mut self, id: NodeId, visitor: &mut Vis) -> Result<(), GraphError>
    where
        Vis: Visitor<V, E> + ?Sized,
    {
        if id.0 >= self.nodes.len() {
            return Err(GraphError::NodeNotFound(id));
        }
        self.walk_node(id, visitor);
        Ok(())
    }

    fn walk_start(&self) -> Result<NodeId, GraphError> {
        if self.nodes.is_empty() {
            warn!(graph = %self.name, "no nodes in graph");
            return Err(GraphError::EmptyGraph);
        }
        match self.start {
            Some(start) => Ok(start),
            None => {
                warn!(graph = %self.name, "no starting node defined");
                Err(GraphError::NoStartNode)
            }
        }
    }

    fn walk_all<Vis>(&mut self, start: NodeId, visitor: &mut Vis)
    where
        Vis: Visitor<V, E> + ?Sized,
    {
        debug!(graph = %self.name, start = %self.nodes[start.0].name(), "walking graph");
        self.walk_node(start, visitor);
        for index in 0..self.nodes.len() {
            if !self.nodes[index].is_visited() {
                debug!(graph = %self.name, node = %self.nodes[index].name(), "walking unreached node");
                self.walk_node(NodeId(index), visitor);
            }
        }
        self.clear_marks();
    }

    fn walk_node<Vis>(&mut self, id: NodeId, visitor: &mut Vis)
    where
        Vis: Visitor<V, E> + ?Sized,
    {
        visitor.on_node(&self.nodes[id.0]);
        self.nodes[id.0].mark();

        while let Some(position) = self.mark_next_unvisited_child(id) {
            let edge = &self.nodes[id.0].edges()[position];
            let target = edge.target();
            visitor.on_edge(edge.value());
            self.walk_node(target, visitor);

            // Back at `id` after exhausting the child's subtree.
            if self.show_backtrack || self.has_unvisited_child(id) {
                visitor.on_node(&self.nodes[id.0]);
            }
        }
    }

    fn mark_next_unvisited_child(&mut self, id: NodeId) -> Option<usize> {
        let node = &self.nodes[id.0];
        let position = node
            .targets()
            .position(|target| !self.nodes[target.0].is_visited())?;
        let target = node.edges()[position].target();
        self.nodes[target.0].mark();
        Some(position)
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("nodes", &self.nodes)
            .field("start", &self.start)
            .field("show_backtrack", &self.show_backtrack)
            .field("has_visitor", &self.visitor.is_some())
            .finish()
    }
}
