use super::LayoutConfig;
use super::order::Layering;

/// Center of a node in direction-neutral coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct Center {
    /// Along the ranks (x for top-to-bottom, y for left-to-right).
    pub(super) cross: f64,
    /// Across the ranks.
    pub(super) rank: f64,
}

pub(super) struct Placed {
    /// Indexed by local node index.
    pub(super) centers: Vec<Center>,
    /// Extent of the whole component perpendicular to the rank axis.
    pub(super) cross_size: f64,
}

/// Packs each rank left to right in its current order and centers the rank within
/// the widest one. Virtual vertices take no room beyond the edge separation.
pub(super) fn assign(layering: &Layering, config: &LayoutConfig) -> Placed {
    let cross_extent = config.cross_extent();
    let rank_step = config.rank_extent() + config.rank_sep;

    let extent = |v: usize| if layering.is_real(v) { cross_extent } else { 0.0 };
    let gap = |a: usize, b: usize| {
        if layering.is_real(a) && layering.is_real(b) {
            config.node_sep
        } else {
            config.edge_sep
        }
    };
    let layer_size = |layer: &[usize]| -> f64 {
        let widths: f64 = layer.iter().map(|&v| extent(v)).sum();
        let gaps: f64 = layer.windows(2).map(|w| gap(w[0], w[1])).sum();
        widths + gaps
    };

    let cross_size = layering
        .layers()
        .iter()
        .map(|layer| layer_size(layer))
        .fold(0.0, f64::max);

    let real_count = layering.layers().iter().flatten().filter(|&&v| layering.is_real(v)).count();
    let mut centers = vec![Center::default(); real_count];

    for (r, layer) in layering.layers().iter().enumerate() {
        let mut cursor = (cross_size - layer_size(layer)) / 2.0;
        let mut previous: Option<usize> = None;
        for &v in layer {
            if let Some(p) = previous {
                cursor += gap(p, v);
            }
            if layering.is_real(v) {
                centers[v] = Center {
                    cross: cursor + cross_extent / 2.0,
                    rank: r as f64 * rank_step + config.rank_extent() / 2.0,
                };
            }
            cursor += extent(v);
            previous = Some(v);
        }
    }

    Placed {
        centers,
        cross_size,
    }
}
