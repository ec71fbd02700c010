use itertools::Itertools;

/// Barycenter sweeps without improvement before giving up.
const PATIENCE: usize = 4;

/// A ranked component with long edges split into chains of virtual vertices,
/// so that every edge connects adjacent ranks.
///
/// Vertices `0..real_count` are the component's nodes (local indices); the rest
/// are virtual.
pub(super) struct Layering {
    ranks: Vec<usize>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
    real_count: usize,
    layers: Vec<Vec<usize>>,
}

impl Layering {
    pub(super) fn build(ranks: &[usize], edges: &[(usize, usize)]) -> Self {
        let real_count = ranks.len();
        let mut vertex_ranks = ranks.to_vec();
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); real_count];
        let mut succs: Vec<Vec<usize>> = vec![Vec::new(); real_count];

        for &(u, w) in edges {
            let mut prev = u;
            for r in ranks[u] + 1..ranks[w] {
                let virtual_vertex = vertex_ranks.len();
                vertex_ranks.push(r);
                preds.push(vec![prev]);
                succs.push(Vec::new());
                succs[prev].push(virtual_vertex);
                prev = virtual_vertex;
            }
            succs[prev].push(w);
            preds[w].push(prev);
        }

        let mut layering = Self {
            ranks: vertex_ranks,
            preds,
            succs,
            real_count,
            layers: Vec::new(),
        };
        layering.init_order();
        layering
    }

    pub(super) fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }

    pub(super) fn is_real(&self, v: usize) -> bool {
        v < self.real_count
    }

    /// Index of real vertex `v` within its rank, ignoring virtual vertices.
    pub(super) fn real_order(&self, v: usize) -> usize {
        self.layers[self.ranks[v]]
            .iter()
            .take_while(|&&u| u != v)
            .filter(|&&u| self.is_real(u))
            .count()
    }

    /// Initial order: depth-first from the nodes sorted by rank, insertion order
    /// breaking ties, so connected nodes start out close together.
    fn init_order(&mut self) {
        let rank_count = self.ranks.iter().copied().max().map_or(0, |r| r + 1);
        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        let mut visited = vec![false; self.ranks.len()];

        for start in (0..self.real_count).sorted_by_key(|&v| self.ranks[v]) {
            let mut stack = vec![start];
            while let Some(v) = stack.pop() {
                if visited[v] {
                    continue;
                }
                visited[v] = true;
                layers[self.ranks[v]].push(v);
                stack.extend(self.succs[v].iter().rev().filter(|&&w| !visited[w]));
            }
        }
        self.layers = layers;
    }

    /// Alternates downward and upward barycenter sweeps, keeping the ordering with
    /// the fewest crossings. Returns that crossing count.
    pub(super) fn minimize_crossings(&mut self, max_sweeps: usize) -> usize {
        let mut best = self.layers.clone();
        let mut best_cc = self.crossings();
        let mut since_best = 0;
        let mut sweep = 0;

        while best_cc > 0 && since_best < PATIENCE && sweep < max_sweeps {
            self.sweep(sweep % 2 == 0);
            let cc = self.crossings();
            if cc < best_cc {
                best = self.layers.clone();
                best_cc = cc;
                since_best = 0;
            } else {
                since_best += 1;
            }
            sweep += 1;
        }

        log::debug!("Ordering settled after {} sweeps with {} crossings", sweep, best_cc);
        self.layers = best;
        best_cc
    }

    fn sweep(&mut self, downward: bool) {
        let rank_count = self.layers.len();
        if rank_count < 2 {
            return;
        }
        let ranks: Vec<usize> = if downward {
            (1..rank_count).collect()
        } else {
            (0..rank_count - 1).rev().collect()
        };

        for r in ranks {
            let fixed = if downward { r - 1 } else { r + 1 };
            let mut position = vec![0usize; self.ranks.len()];
            for (i, &v) in self.layers[fixed].iter().enumerate() {
                position[v] = i;
            }
            let reordered = self.reorder(&self.layers[r], &position, downward);
            self.layers[r] = reordered;
        }
    }

    /// Sorts a layer by barycenter. Vertices with no neighbour in the fixed layer
    /// keep their slot; the sort is stable, so ties keep their current order.
    fn reorder(&self, layer: &[usize], position: &[usize], downward: bool) -> Vec<usize> {
        let mut sortable: Vec<(f64, usize)> = Vec::with_capacity(layer.len());
        let mut pinned: Vec<Option<usize>> = vec![None; layer.len()];

        for (slot, &v) in layer.iter().enumerate() {
            let neighbours = if downward {
                &self.preds[v]
            } else {
                &self.succs[v]
            };
            if neighbours.is_empty() {
                pinned[slot] = Some(v);
            } else {
                let sum: f64 = neighbours.iter().map(|&u| position[u] as f64).sum();
                sortable.push((sum / neighbours.len() as f64, v));
            }
        }

        sortable.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut sorted = sortable.into_iter().map(|(_, v)| v);
        pinned
            .into_iter()
            .filter_map(|slot| slot.or_else(|| sorted.next()))
            .collect()
    }

    /// Crossings between every pair of adjacent ranks.
    ///
    /// Compares every pair of edges leaving a rank, so a sweep costs O(E^2) per rank.
    /// Fine for hand-authored scripts of a few hundred nodes; generated scripts much
    /// larger than that will lay out slowly.
    pub(super) fn crossings(&self) -> usize {
        let mut position = vec![0usize; self.ranks.len()];
        for layer in &self.layers {
            for (i, &v) in layer.iter().enumerate() {
                position[v] = i;
            }
        }
        let position = &position;

        self.layers
            .iter()
            .map(|layer| {
                let segments: Vec<(usize, usize)> = layer
                    .iter()
                    .flat_map(|&u| self.succs[u].iter().map(move |&w| (position[u], position[w])))
                    .collect();
                segments
                    .iter()
                    .tuple_combinations()
                    .filter(|(a, b)| (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1))
                    .count()
            })
            .sum()
    }
}
