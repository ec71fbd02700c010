use std::collections::VecDeque;

/// Assigns each node its longest-path distance from a root (a node without
/// incoming edges). Roots, and therefore isolated nodes, get rank 0.
///
/// `edges` must be acyclic; see [`super::acyclic::forward_edges`].
pub(super) fn longest_path(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut in_degree = vec![0usize; node_count];
    for &(u, w) in edges {
        successors[u].push(w);
        in_degree[w] += 1;
    }

    let mut ranks = vec![0usize; node_count];
    let mut ready: VecDeque<usize> = (0..node_count).filter(|&v| in_degree[v] == 0).collect();

    while let Some(v) = ready.pop_front() {
        for &w in &successors[v] {
            ranks[w] = ranks[w].max(ranks[v] + 1);
            in_degree[w] -= 1;
            if in_degree[w] == 0 {
                ready.push_back(w);
            }
        }
    }
    ranks
}
