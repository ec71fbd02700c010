use crate::graph::FlowGraph;
use ahash::{AHashMap, AHashSet};

/// Successor lists keyed by source id, in edge insertion order.
pub(crate) fn adjacency(graph: &FlowGraph) -> AHashMap<&str, Vec<&str>> {
    let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::with_capacity(graph.nodes().len());
    for edge in graph.edges() {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }
    adjacency
}

/// Depth-first reachability search along existing edges.
///
/// Uses an explicit stack and a visited set, so it terminates on any graph and
/// never recurses.
pub fn reaches(graph: &FlowGraph, from: &str, to: &str) -> bool {
    let adjacency = adjacency(graph);
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut stack = vec![from];

    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(successors) = adjacency.get(current) {
            stack.extend(successors.iter().filter(|s| !visited.contains(*s)));
        }
    }
    false
}

/// Whether adding `source -> target` would close a cycle.
pub fn would_create_cycle(graph: &FlowGraph, source: &str, target: &str) -> bool {
    source == target || reaches(graph, target, source)
}

/// Checks the whole edge set for cycles (Kahn's algorithm).
///
/// Connect-time validation keeps interactively built graphs acyclic; imported
/// scripts may legitimately loop back to an earlier question.
pub fn is_acyclic(graph: &FlowGraph) -> bool {
    let mut in_degree: AHashMap<&str, usize> = graph
        .nodes()
        .iter()
        .map(|n| (n.id.as_str(), 0))
        .collect();
    for edge in graph.edges() {
        *in_degree.entry(edge.target.as_str()).or_default() += 1;
    }

    let adjacency = adjacency(graph);
    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(id, _)| *id)
        .collect();
    let mut seen = 0;

    while let Some(id) = ready.pop() {
        seen += 1;
        for &next in adjacency.get(id).into_iter().flatten() {
            if let Some(d) = in_degree.get_mut(next) {
                *d -= 1;
                if *d == 0 {
                    ready.push(next);
                }
            }
        }
    }
    seen == in_degree.len()
}
