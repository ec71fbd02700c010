use crate::graph::FlowGraph;

/// Splits the graph into weakly connected components.
///
/// Components are returned in order of their first node, and each holds global
/// node indices in insertion order.
pub(super) fn split(graph: &FlowGraph) -> Vec<Vec<usize>> {
    let count = graph.nodes().len();
    let mut parent: Vec<usize> = (0..count).collect();

    fn find(parent: &mut [usize], mut v: usize) -> usize {
        while parent[v] != v {
            parent[v] = parent[parent[v]];
            v = parent[v];
        }
        v
    }

    for edge in graph.edges() {
        let (Some(u), Some(w)) = (
            graph.node_index(edge.source.as_str()),
            graph.node_index(edge.target.as_str()),
        ) else {
            continue;
        };
        let (ru, rw) = (find(&mut parent, u), find(&mut parent, w));
        if ru != rw {
            // Keep the smaller index as root so component numbering follows insertion order.
            parent[ru.max(rw)] = ru.min(rw);
        }
    }

    let mut slot_of_root: Vec<Option<usize>> = vec![None; count];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for v in 0..count {
        let root = find(&mut parent, v);
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(v);
    }
    components
}
