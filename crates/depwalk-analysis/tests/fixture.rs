//! End-to-end checks on the five-node reference graph.

use depwalk_analysis::{
    dependency_cycles, format_trace, record_walk, strong_components, TraceRecorder,
};
use depwalk_core::{DependencyFact, FactGraphBuilder, Graph};

fn build_graph() -> Graph<(), String> {
    let mut builder = FactGraphBuilder::new("Fred");
    for (node, depends_on, label) in [
        ("node1", "node2", "edge12"),
        ("node1", "node3", "edge13"),
        ("node2", "node3", "edge23"),
        ("node2", "node4", "edge24"),
        ("node3", "node1", "edge31"),
        ("node5", "node1", "edge51"),
        ("node5", "node4", "edge54"),
    ] {
        builder
            .add_fact(DependencyFact::new(node, depends_on, label.to_string()))
            .expect("fact");
    }
    builder.build()
}

#[test]
fn fixture_construction() {
    let graph = build_graph();
    assert_eq!(graph.node_count(), 5, "expected 5 nodes, got {}", graph.node_count());
    assert_eq!(graph.edge_count(), 7, "expected 7 edges, got {}", graph.edge_count());
    let order: Vec<&str> = graph.nodes().map(|n| n.name()).collect();
    assert_eq!(order, ["node1", "node2", "node3", "node4", "node5"]);
}

#[test]
fn walk_from_node1_hiding_backtracks() {
    let mut graph = build_graph();
    let start = graph.find_node("node1").expect("node1");
    graph.set_start(start).expect("start");

    let trace = record_walk(&mut graph).expect("walk");
    assert_eq!(trace.first_visits(), ["node1", "node2", "node3", "node4", "node5"]);
    assert_eq!(
        format_trace(trace.events()),
        "  node1 edge12\n  node2 edge23\n  node3\n  node2 edge24\n  node4\n  node5\n"
    );
}

#[test]
fn walk_from_node2_showing_backtracks() {
    let mut graph = build_graph();
    let start = graph.find_node("node2").expect("node2");
    graph.set_start(start).expect("start");
    graph.set_show_backtrack(true);

    let trace = record_walk(&mut graph).expect("walk");
    let nodes = trace.node_names();
    assert_eq!(
        nodes,
        ["node2", "node3", "node1", "node3", "node2", "node4", "node2", "node5"]
    );

    // node2 is re-announced between node3's subtree and node4.
    let node4 = nodes.iter().position(|n| *n == "node4").expect("node4");
    assert_eq!(nodes[node4 - 1], "node2");
}

#[test]
fn every_registered_node_is_reached() {
    let mut graph = build_graph();
    let start = graph.find_node("node4").expect("node4");
    graph.set_start(start).expect("start");

    let trace = record_walk(&mut graph).expect("walk");
    let mut reached = trace.first_visits();
    reached.sort_unstable();
    assert_eq!(reached, ["node1", "node2", "node3", "node4", "node5"]);
}

#[test]
fn same_nodes_on_every_walk() {
    let mut graph = build_graph();
    let start = graph.find_node("node3").expect("node3");
    graph.set_start(start).expect("start");

    let first = record_walk(&mut graph).expect("first walk");
    let mut second = TraceRecorder::new();
    graph.walk_with(&mut second).expect("second walk");
    assert_eq!(first.events(), second.events());
}

#[test]
fn fixture_has_one_cycle() {
    let mut graph = build_graph();
    let components = strong_components(&mut graph);
    assert_eq!(components.len(), 3);

    let cycles = dependency_cycles(&mut graph);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].names(&graph), ["node1", "node2", "node3"]);
}
