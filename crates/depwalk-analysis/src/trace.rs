//! Recording and rendering walk traces.
//!
//! [`TraceRecorder`] is a visitor that keeps every event of a walk in order.
//! The rendered form puts each node arrival on its own line and appends the
//! label of the edge followed from it:
//!
//! ```text
//!   node1 edge12
//!   node2 edge23
//!   node3
//!   node2 edge24
//!   node4
//!   node5
//! ```

use std::collections::HashSet;
use std::fmt;

use depwalk_core::{Graph, Node, NodeId, Visitor};
use serde::Serialize;

use crate::error::Result;

/// One event reported by a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Arrival at, or backtrack to, a node.
    Node { name: String },
    /// An edge followed to a not-yet-discovered node.
    Edge { label: String },
}

/// Visitor that records the walk's event stream.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    /// Every node event, backtracks included.
    pub fn node_names(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Node { name } => Some(name.as_str()),
                TraceEvent::Edge { .. } => None,
            })
            .collect()
    }

    pub fn edge_labels(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Edge { label } => Some(label.as_str()),
                TraceEvent::Node { .. } => None,
            })
            .collect()
    }

    /// Node names in the order they were first reached.
    pub fn first_visits(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.node_names()
            .into_iter()
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<V, E: fmt::Display> Visitor<V, E> for TraceRecorder {
    fn on_node(&mut self, node: &Node<V, E>) -> bool {
        self.events.push(TraceEvent::Node {
            name: node.name().to_string(),
        });
        true
    }

    fn on_edge(&mut self, value: &E) -> bool {
        self.events.push(TraceEvent::Edge {
            label: value.to_string(),
        });
        true
    }
}

/// Walk the whole graph and return the recorded trace.
pub fn record_walk<V, E: fmt::Display>(graph: &mut Graph<V, E>) -> Result<TraceRecorder> {
    let mut recorder = TraceRecorder::new();
    graph.walk_with(&mut recorder)?;
    Ok(recorder)
}

/// Walk from a single node and return the recorded trace.
///
/// Clears marks before and after, so the graph is left ready for another
/// walk.
pub fn record_walk_from<V, E: fmt::Display>(
    graph: &mut Graph<V, E>,
    from: NodeId,
) -> Result<TraceRecorder> {
    let mut recorder = TraceRecorder::new();
    graph.clear_marks();
    let walked = graph.walk_from_with(from, &mut recorder);
    graph.clear_marks();
    walked?;
    Ok(recorder)
}

/// Render a trace in console form.
pub fn format_trace(events: &[TraceEvent]) -> String {
    let mut out = String::new();
    for event in events {
        match event {
            TraceEvent::Node { name } => {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str("  ");
                out.push_str(name);
            }
            TraceEvent::Edge { label } => {
                out.push(' ');
                out.push_str(label);
            }
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Render a trace as a JSON array.
pub fn trace_json(events: &[TraceEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depwalk_core::GraphError;

    fn node(name: &str) -> TraceEvent {
        TraceEvent::Node { name: name.into() }
    }

    fn edge(label: &str) -> TraceEvent {
        TraceEvent::Edge {
            label: label.into(),
        }
    }

    fn chain() -> (Graph<(), &'static str>, NodeId) {
        let mut graph = Graph::new("chain");
        let a = graph.add_node(Node::named("a"));
        let b = graph.add_node(Node::named("b"));
        let c = graph.add_node(Node::named("c"));
        graph.add_edge(a, b, "ab").unwrap();
        graph.add_edge(a, c, "ac").unwrap();
        (graph, a)
    }

    #[test]
    fn recorder_keeps_order() {
        let (mut graph, a) = chain();
        graph.set_start(a).unwrap();
        let trace = record_walk(&mut graph).unwrap();
        assert_eq!(
            trace.events(),
            &[node("a"), edge("ab"), node("b"), node("a"), edge("ac"), node("c")]
        );
        assert_eq!(trace.node_names(), ["a", "b", "a", "c"]);
        assert_eq!(trace.edge_labels(), ["ab", "ac"]);
        assert_eq!(trace.first_visits(), ["a", "b", "c"]);
    }

    #[test]
    fn record_walk_propagates_preconditions() {
        let (mut graph, _) = chain();
        let err = record_walk(&mut graph).unwrap_err();
        assert!(matches!(
            err,
            crate::AnalysisError::Graph(GraphError::NoStartNode)
        ));
    }

    #[test]
    fn record_walk_from_resets_marks() {
        let (mut graph, a) = chain();
        let first = record_walk_from(&mut graph, a).unwrap();
        assert!(graph.nodes().all(|n| !n.is_visited()));
        let second = record_walk_from(&mut graph, a).unwrap();
        assert_eq!(first.events(), second.events());
    }

    #[test]
    fn format_appends_edges_to_node_lines() {
        let events = [node("a"), edge("ab"), node("b"), node("a"), edge("ac"), node("c")];
        assert_eq!(format_trace(&events), "  a ab\n  b\n  a ac\n  c\n");
        assert_eq!(format_trace(&[]), "");
    }

    #[test]
    fn json_uses_tagged_events() {
        let json = trace_json(&[node("a"), edge("ab")]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["event"], "node");
        assert_eq!(value[0]["name"], "a");
        assert_eq!(value[1]["event"], "edge");
        assert_eq!(value[1]["label"], "ab");
    }

    #[test]
    fn clear_empties_recorder() {
        let (mut graph, a) = chain();
        let mut trace = record_walk_from(&mut graph, a).unwrap();
        trace.clear();
        assert!(trace.events().is_empty());
        assert!(trace.into_events().is_empty());
    }
}
