use crate::graph::FlowGraph;
use ahash::{AHashMap, AHashSet};

enum StackItem {
    Enter(usize),
    Exit(usize),
}

/// Edges of one component as local `(source, target)` index pairs, with every back
/// edge reversed so the result is acyclic.
///
/// Interactive connects never create cycles, but imported scripts may point back to
/// an earlier question. The depth-first pass visits nodes in insertion order, so the
/// choice of back edges is deterministic.
pub(super) fn forward_edges(graph: &FlowGraph, members: &[usize]) -> Vec<(usize, usize)> {
    let local: AHashMap<&str, usize> = members
        .iter()
        .enumerate()
        .map(|(i, &g)| (graph.nodes()[g].id.as_str(), i))
        .collect();

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); members.len()];
    for edge in graph.edges() {
        if let (Some(&u), Some(&w)) = (
            local.get(edge.source.as_str()),
            local.get(edge.target.as_str()),
        ) {
            if u != w {
                successors[u].push(w);
            }
        }
    }

    let mut back_edges: AHashSet<(usize, usize)> = AHashSet::new();
    let mut visited = vec![false; members.len()];
    let mut on_path = vec![false; members.len()];
    let mut stack: Vec<StackItem> = (0..members.len()).rev().map(StackItem::Enter).collect();

    while let Some(item) = stack.pop() {
        match item {
            StackItem::Exit(v) => on_path[v] = false,
            StackItem::Enter(v) => {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                on_path[v] = true;
                stack.push(StackItem::Exit(v));
                for &w in successors[v].iter().rev() {
                    if on_path[w] {
                        back_edges.insert((v, w));
                    } else if !visited[w] {
                        stack.push(StackItem::Enter(w));
                    }
                }
            }
        }
    }

    let mut seen: AHashSet<(usize, usize)> = AHashSet::new();
    let mut edges = Vec::new();
    for (u, targets) in successors.iter().enumerate() {
        for &w in targets {
            let edge = if back_edges.contains(&(u, w)) {
                log::debug!("Reversing back edge {} -> {} for layout", u, w);
                (w, u)
            } else {
                (u, w)
            };
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}
