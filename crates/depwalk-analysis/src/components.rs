//! Strongly connected components and dependency cycles.
//!
//! Uses Tarjan's algorithm, numbering nodes through their `dfn`/`low`
//! fields. The search keeps an explicit frame stack instead of recursing, so
//! long dependency chains cannot exhaust the call stack.

use std::collections::HashSet;

use depwalk_core::{Graph, NodeId};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// A strongly connected component: nodes that all reach each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Members in adjacency-list order.
    pub members: Vec<NodeId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// More than one member means the members depend on each other.
    pub fn is_cycle(&self) -> bool {
        self.members.len() > 1
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Member names, in member order.
    pub fn names<'g, V, E>(&self, graph: &'g Graph<V, E>) -> Vec<&'g str> {
        self.members
            .iter()
            .filter_map(|id| graph.node(*id))
            .map(|node| node.name())
            .collect()
    }
}

/// Compute every strongly connected component.
///
/// Components are listed in the order the search completes them, which puts
/// a component after every component it depends on. Overwrites each node's
/// `dfn` and `low`.
pub fn strong_components<V, E>(graph: &mut Graph<V, E>) -> Vec<Component> {
    let ids: Vec<NodeId> = graph.node_ids().collect();
    for &id in &ids {
        if let Some(node) = graph.node_mut(id) {
            node.dfn = 0;
            node.low = 0;
        }
    }

    let mut search = Search {
        counter: 0,
        stack: Vec::new(),
        on_stack: HashSet::new(),
        components: Vec::new(),
    };
    for &root in &ids {
        if dfn(graph, root) == 0 {
            search.run(graph, root);
        }
    }

    debug!(
        graph = %graph.name(),
        components = search.components.len(),
        "strong components computed"
    );
    search.components
}

/// Components with more than one member.
pub fn dependency_cycles<V, E>(graph: &mut Graph<V, E>) -> Vec<Component> {
    strong_components(graph)
        .into_iter()
        .filter(Component::is_cycle)
        .collect()
}

struct Search {
    counter: usize,
    stack: Vec<NodeId>,
    on_stack: HashSet<NodeId>,
    components: Vec<Component>,
}

impl Search {
    fn run<V, E>(&mut self, graph: &mut Graph<V, E>, root: NodeId) {
        // Each frame: (node, position of the next outgoing edge to examine).
        let mut frames = vec![(root, 0usize)];
        self.enter(graph, root);

        while let Some(frame) = frames.last_mut() {
            let (id, position) = *frame;
            let next = graph
                .node(id)
                .and_then(|node| node.edges().get(position))
                .map(|edge| edge.target());

            match next {
                Some(child) => {
                    frame.1 += 1;
                    if dfn(graph, child) == 0 {
                        self.enter(graph, child);
                        frames.push((child, 0));
                    } else if self.on_stack.contains(&child) {
                        let child_dfn = dfn(graph, child);
                        lower(graph, id, child_dfn);
                    }
                }
                None => {
                    frames.pop();
                    let id_low = low(graph, id);
                    if let Some(&(parent, _)) = frames.last() {
                        lower(graph, parent, id_low);
                    }
                    if id_low == dfn(graph, id) {
                        self.complete(id);
                    }
                }
            }
        }
    }

    fn enter<V, E>(&mut self, graph: &mut Graph<V, E>, id: NodeId) {
        self.counter += 1;
        if let Some(node) = graph.node_mut(id) {
            node.dfn = self.counter;
            node.low = self.counter;
        }
        self.stack.push(id);
        self.on_stack.insert(id);
    }

    /// Pop the component rooted at `root` off the stack.
    fn complete(&mut self, root: NodeId) {
        let mut members = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.remove(&member);
            members.push(member);
            if member == root {
                break;
            }
        }
        members.sort();
        self.components.push(Component { members });
    }
}

fn dfn<V, E>(graph: &Graph<V, E>, id: NodeId) -> usize {
    graph.node(id).map_or(0, |node| node.dfn)
}

fn low<V, E>(graph: &Graph<V, E>, id: NodeId) -> usize {
    graph.node(id).map_or(0, |node| node.low)
}

fn lower<V, E>(graph: &mut Graph<V, E>, id: NodeId, candidate: usize) {
    if let Some(node) = graph.node_mut(id) {
        node.low = node.low.min(candidate);
    }
}

/// Serializable view of a component, by name.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport<'g> {
    pub nodes: Vec<&'g str>,
}

/// Render components as a numbered human-readable list.
pub fn format_components<V, E>(graph: &Graph<V, E>, components: &[Component]) -> String {
    if components.is_empty() {
        return "  no dependency cycles\n".to_string();
    }
    let mut out = String::new();
    for (i, component) in components.iter().enumerate() {
        out.push_str(&format!(
            "  [{}] {}\n",
            i + 1,
            component.names(graph).join(" <-> ")
        ));
    }
    out
}

/// Render components as a JSON array of name lists.
pub fn components_json<V, E>(graph: &Graph<V, E>, components: &[Component]) -> Result<String> {
    let reports: Vec<ComponentReport<'_>> = components
        .iter()
        .map(|component| ComponentReport {
            nodes: component.names(graph),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}
