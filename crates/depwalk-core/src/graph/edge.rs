//! Edge type representing a single dependency between two nodes.
//!
//! An edge is owned by its source node and points at its target by
//! [`NodeId`], so cyclic dependency structures never create ownership cycles.

use std::fmt;

use serde::Serialize;

use super::node::NodeId;

/// A labeled dependency edge.
///
/// Immutable once created: the owning graph inserts it through
/// [`Graph::add_edge`](super::Graph::add_edge) and never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<E> {
    target: NodeId,
    value: E,
}

impl<E> Edge<E> {
    /// Create an edge pointing at `target` carrying `value`.
    pub(crate) fn new(target: NodeId, value: E) -> Self {
        Self { target, value }
    }

    /// The node this edge points at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The caller-supplied label/payload.
    pub fn value(&self) -> &E {
        &self.value
    }
}

impl<E: fmt::Display> fmt::Display for Edge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.value, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_accessors() {
        let edge = Edge::new(NodeId(3), "uses");
        assert_eq!(edge.target(), NodeId(3));
        assert_eq!(*edge.value(), "uses");
    }

    #[test]
    fn edge_display() {
        let edge = Edge::new(NodeId(1), "edge12");
        assert_eq!(edge.to_string(), "edge12 -> #1");
    }
}
