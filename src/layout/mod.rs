//! Hierarchical auto-layout for the editor canvas.
//!
//! The pipeline follows the classic layered approach:
//!
//! 1. split the graph into weakly connected components,
//! 2. reverse back edges so every component is a DAG ([`acyclic`]),
//! 3. rank nodes by longest path from the roots ([`rank`]),
//! 4. order each rank with barycenter sweeps to reduce crossings ([`order`]),
//! 5. assign coordinates and shift them to a top-left anchor ([`position`]).
//!
//! Layout never touches topology. [`compute_layout`] is pure; [`FlowGraph::apply_layout`]
//! copies positions and handle orientation back onto the nodes.

use crate::error::GraphError;
use crate::graph::{FlowGraph, Handles, NODE_HEIGHT, NODE_WIDTH, NodeId, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

mod acyclic;
mod components;
mod order;
mod position;
mod rank;

/// Flow direction of the ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "LR")]
    LeftToRight,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopToBottom => "TB",
            Direction::LeftToRight => "LR",
        }
    }

    /// Handle sides matching the direction: incoming edges attach on the leading side.
    pub fn handles(&self) -> Handles {
        match self {
            Direction::TopToBottom => Handles {
                target: Side::Top,
                source: Side::Bottom,
            },
            Direction::LeftToRight => Handles {
                target: Side::Left,
                source: Side::Right,
            },
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftToRight)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for [`compute_layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: Direction,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between neighbouring nodes of the same rank.
    pub node_sep: f64,
    /// Gap between consecutive ranks.
    pub rank_sep: f64,
    /// Width reserved for an edge passing through a rank it does not start or end in.
    pub edge_sep: f64,
    /// Gap between disconnected components.
    pub component_sep: f64,
    /// Upper bound on barycenter sweeps per component.
    pub max_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::TopToBottom,
            node_width: NODE_WIDTH,
            node_height: NODE_HEIGHT,
            node_sep: 50.0,
            rank_sep: 50.0,
            edge_sep: 20.0,
            component_sep: 50.0,
            max_sweeps: 24,
        }
    }
}

impl LayoutConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Node extent along the axis perpendicular to the ranks.
    fn cross_extent(&self) -> f64 {
        if self.direction.is_horizontal() {
            self.node_height
        } else {
            self.node_width
        }
    }

    /// Node extent along the rank axis.
    fn rank_extent(&self) -> f64 {
        if self.direction.is_horizontal() {
            self.node_width
        } else {
            self.node_height
        }
    }
}

/// Where a single node ends up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePlacement {
    pub id: NodeId,
    /// Weakly connected component the node belongs to, numbered by first node.
    pub component: usize,
    pub rank: usize,
    /// Position within the rank, counting only real nodes.
    pub order: usize,
    /// Top-left anchored.
    pub position: Position,
    pub handles: Handles,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub direction: Direction,
    /// One entry per graph node, in graph insertion order.
    pub placements: Vec<NodePlacement>,
    /// Remaining crossings between adjacent ranks, summed over components.
    pub crossings: usize,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placement(&self, id: &str) -> Option<&NodePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// `(rank, order)` per node, the part of a layout that must be stable across runs.
    pub fn ranking(&self) -> Vec<(NodeId, usize, usize)> {
        self.placements
            .iter()
            .map(|p| (p.id.clone(), p.rank, p.order))
            .collect()
    }
}

/// Computes a layout for the whole graph. An empty graph yields an empty layout.
pub fn compute_layout(graph: &FlowGraph, config: &LayoutConfig) -> Layout {
    let mut layout = Layout {
        direction: config.direction,
        ..Layout::default()
    };
    if graph.is_empty() {
        return layout;
    }

    let mut slots: Vec<Option<NodePlacement>> = vec![None; graph.nodes().len()];
    let mut cross_offset = 0.0;

    for (component_idx, members) in components::split(graph).into_iter().enumerate() {
        let edges = acyclic::forward_edges(graph, &members);
        let ranks = rank::longest_path(members.len(), &edges);
        let mut layering = order::Layering::build(&ranks, &edges);
        layout.crossings += layering.minimize_crossings(config.max_sweeps);
        let placed = position::assign(&layering, config);

        for (local, &global) in members.iter().enumerate() {
            let center = placed.centers[local];
            let (x, y) = match config.direction {
                Direction::TopToBottom => (center.cross + cross_offset, center.rank),
                Direction::LeftToRight => (center.rank, center.cross + cross_offset),
            };
            slots[global] = Some(NodePlacement {
                id: graph.nodes()[global].id.clone(),
                component: component_idx,
                rank: ranks[local],
                order: layering.real_order(local),
                position: Position::new(x - config.node_width / 2.0, y - config.node_height / 2.0),
                handles: config.direction.handles(),
            });
        }
        cross_offset += placed.cross_size + config.component_sep;
    }

    layout.placements = slots.into_iter().flatten().collect();
    log::info!(
        "Laid out {} nodes ({}) with {} remaining crossings",
        layout.placements.len(),
        layout.direction,
        layout.crossings
    );
    layout
}

impl FlowGraph {
    /// Copies positions and handles from `layout`. Topology is left untouched.
    pub fn apply_layout(&mut self, layout: &Layout) -> Result<(), GraphError> {
        for placement in &layout.placements {
            self.place(placement.id.as_str(), placement.position, placement.handles)?;
        }
        Ok(())
    }
}
