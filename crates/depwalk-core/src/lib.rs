//! Directed dependency graphs and their depth-first walk.
//!
//! Entities (files, modules, packages) are [`Node`]s; "A depends on B" facts
//! are labeled [`Edge`]s. A [`Graph`] owns its nodes and walks them depth
//! first, reporting every node arrival, backtrack, and followed edge to a
//! [`Visitor`]. Cycle reports, orderings, and formatted output are built on
//! top of that event stream by the visitor, not by the graph.
//!
//! ```rust
//! use depwalk_core::{Graph, LogVisitor, Node};
//!
//! let mut graph: Graph<(), &str> = Graph::new("solution");
//! let app = graph.add_node(Node::named("app"));
//! let util = graph.add_node(Node::named("util"));
//! graph.add_edge(app, util, "imports").unwrap();
//! graph.set_start(app).unwrap();
//! graph.set_visitor(Box::new(LogVisitor));
//! graph.walk().unwrap();
//! ```

pub mod facts;
pub mod graph;
pub mod visitor;

pub use facts::{DependencyFact, FactGraphBuilder};
pub use graph::edge::Edge;
pub use graph::node::{Node, NodeId};
pub use graph::{Graph, GraphError};
pub use visitor::{FnVisitor, LogVisitor, Visitor};
