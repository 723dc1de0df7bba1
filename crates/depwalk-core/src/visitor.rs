//! Visitor callbacks driven by the depth-first walk.
//!
//! A walk reports two kinds of event: arriving at (or backtracking to) a
//! node, and following an edge. Analyses implement [`Visitor`] to turn that
//! event stream into whatever result they need.

use std::fmt;

use tracing::info;

use crate::graph::node::Node;

/// Callbacks invoked by [`Graph::walk`](crate::Graph::walk) and friends.
///
/// Both callbacks return a continue flag. The walk does not consult it; a
/// visitor that wants to stop early has to ignore the remaining events.
pub trait Visitor<V, E> {
    /// Called on first arrival at a node, and again on backtrack when the
    /// node still has undiscovered children or backtracks are shown.
    fn on_node(&mut self, node: &Node<V, E>) -> bool;

    /// Called with the edge payload just before the walk descends into the
    /// edge's target.
    fn on_edge(&mut self, value: &E) -> bool;
}

impl<V, E, T: Visitor<V, E> + ?Sized> Visitor<V, E> for &mut T {
    fn on_node(&mut self, node: &Node<V, E>) -> bool {
        (**self).on_node(node)
    }

    fn on_edge(&mut self, value: &E) -> bool {
        (**self).on_edge(value)
    }
}

/// Default visitor: one log line per node and per edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogVisitor;

impl<V, E: fmt::Display> Visitor<V, E> for LogVisitor {
    fn on_node(&mut self, node: &Node<V, E>) -> bool {
        info!(node = %node.name(), "visit");
        true
    }

    fn on_edge(&mut self, value: &E) -> bool {
        info!(edge = %value, "follow");
        true
    }
}

/// Adapts a pair of closures into a [`Visitor`].
///
/// ```
/// use depwalk_core::{FnVisitor, Graph, Node};
///
/// let mut graph: Graph<(), &str> = Graph::new("demo");
/// let a = graph.add_node(Node::named("a"));
/// let b = graph.add_node(Node::named("b"));
/// graph.add_edge(a, b, "a->b").unwrap();
/// graph.set_start(a).unwrap();
///
/// let mut names = Vec::new();
/// let mut labels = Vec::new();
/// let mut visitor = FnVisitor::new(
///     |node: &Node<(), &str>| {
///         names.push(node.name().to_string());
///         true
///     },
///     |label: &&str| {
///         labels.push(label.to_string());
///         true
///     },
/// );
/// graph.walk_with(&mut visitor).unwrap();
/// drop(visitor);
/// assert_eq!(names, ["a", "b"]);
/// assert_eq!(labels, ["a->b"]);
/// ```
pub struct FnVisitor<N, G> {
    on_node: N,
    on_edge: G,
}

impl<N, G> FnVisitor<N, G> {
    pub fn new(on_node: N, on_edge: G) -> Self {
        Self { on_node, on_edge }
    }
}

impl<V, E, N, G> Visitor<V, E> for FnVisitor<N, G>
where
    N: FnMut(&Node<V, E>) -> bool,
    G: FnMut(&E) -> bool,
{
    fn on_node(&mut self, node: &Node<V, E>) -> bool {
        (self.on_node)(node)
    }

    fn on_edge(&mut self, value: &E) -> bool {
        (self.on_edge)(value)
    }
}

impl<N, G> fmt::Debug for FnVisitor<N, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnVisitor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_visitor_always_continues() {
        let node: Node<(), &str> = Node::named("a");
        let mut visitor = LogVisitor;
        assert!(visitor.on_node(&node));
        assert!(Visitor::<(), &str>::on_edge(&mut visitor, &"label"));
    }

    #[test]
    fn fn_visitor_forwards_to_closures() {
        let mut nodes = 0;
        let mut edges = 0;
        {
            let mut visitor = FnVisitor::new(
                |_: &Node<(), u8>| {
                    nodes += 1;
                    true
                },
                |_: &u8| {
                    edges += 1;
                    false
                },
            );
            let node: Node<(), u8> = Node::named("x");
            assert!(Visitor::<(), u8>::on_node(&mut visitor, &node));
            assert!(!Visitor::<(), u8>::on_edge(&mut visitor, &1));
            assert!(!Visitor::<(), u8>::on_edge(&mut visitor, &2));
        }
        assert_eq!((nodes, edges), (1, 2));
    }

    #[test]
    fn mutable_reference_is_a_visitor() {
        fn announce<Vis: Visitor<(), &'static str>>(mut visitor: Vis) -> bool {
            let node = Node::named("a");
            visitor.on_node(&node) && visitor.on_edge(&"a->b")
        }

        let mut inner = LogVisitor;
        assert!(announce(&mut inner));
    }
}
