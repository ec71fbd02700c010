//! The authoritative per-document node/edge store.
//!
//! Every mutation either completes fully or leaves the store untouched. Callers
//! are expected to run [`validate_connection`](crate::validator::validate_connection)
//! before [`FlowGraph::add_edge`]; the [`Editor`](crate::editor::Editor) does that for you.

use crate::error::{GraphError, StructuralWarning};
use ahash::{AHashMap, AHashSet};

mod node;

pub use node::*;

/// Horizontal extent of a rendered node, shared by placement defaults and layout.
pub const NODE_WIDTH: f64 = 300.0;
/// Vertical extent of a rendered node.
pub const NODE_HEIGHT: f64 = 230.0;

/// Where a newly added question is dropped on the canvas.
const QUESTION_DROP_POSITION: Position = Position::new(100.0, 100.0);

#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    // node id -> index into `nodes`
    index: AHashMap<NodeId, usize>,
    next_id: u64,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a graph from previously listed parts, checking id uniqueness, that
    /// every edge endpoint exists and that at most one question is the start node.
    pub fn from_parts(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        next_id: u64,
    ) -> Result<Self, GraphError> {
        let mut graph = Self {
            nodes,
            edges: Vec::new(),
            index: AHashMap::new(),
            next_id,
        };
        let mut start: Option<&NodeId> = None;
        for (i, node) in graph.nodes.iter().enumerate() {
            if graph.index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode(node.id.to_string()));
            }
            if node.is_start_node() {
                if let Some(first) = start {
                    return Err(GraphError::MultipleStartNodes {
                        first: first.clone(),
                        second: node.id.clone(),
                    });
                }
                start = Some(&node.id);
            }
        }
        let mut edge_ids = AHashSet::with_capacity(edges.len());
        for edge in &edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(GraphError::DuplicateEdge(edge.id.to_string()));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !graph.contains_node(endpoint.as_str()) {
                    return Err(GraphError::NodeNotFound(endpoint.to_string()));
                }
            }
        }
        graph.edges = edges;
        Ok(graph)
    }

    // --- Queries ---

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The id counter used for fresh ids. Persisted by snapshots.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Insertion rank of a node, used as the stable tie-breaker by layout and export.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn kind(&self, id: &str) -> Option<NodeKind> {
        self.node(id).map(Node::kind)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == id)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// True if `id` has at least one outgoing edge to a node of `kind`.
    pub fn has_edge_to_kind(&self, id: &str, kind: NodeKind) -> bool {
        self.outgoing(id)
            .any(|e| self.kind(e.target.as_str()) == Some(kind))
    }

    pub fn question_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_question()).count()
    }

    pub fn start_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.is_start_node())
    }

    /// The `only_choices` flag as the runtime sees it: the stored value, but only
    /// while the question has at least one edge to a choice.
    pub fn effective_only_choices(&self, id: &str) -> bool {
        match self.node(id).and_then(Node::as_question) {
            Some(q) => q.only_choices && self.has_edge_to_kind(id, NodeKind::Choice),
            None => false,
        }
    }

    /// Where the editor drops a fresh node of the given kind.
    pub fn drop_position(&self, kind: NodeKind) -> Position {
        match kind {
            NodeKind::Question => QUESTION_DROP_POSITION,
            NodeKind::Choice => self
                .nodes
                .last()
                .map(|last| Position::new(last.position.x + NODE_WIDTH, last.position.y))
                .unwrap_or_default(),
        }
    }

    // --- Mutations ---

    /// Adds a node with a fresh id. A question becomes the start node iff it is
    /// the first question in the graph; any start flag in `data` is ignored.
    pub fn add_node(&mut self, data: NodeData, position: Position) -> NodeId {
        let id = NodeId::new(self.fresh_id("node", |g, id| g.contains_node(id)));
        self.insert_node(id.clone(), data, position);
        id
    }

    /// Adds a node under a caller-chosen id. Start flag rules match [`FlowGraph::add_node`].
    pub fn add_node_with_id(
        &mut self,
        id: NodeId,
        data: NodeData,
        position: Position,
    ) -> Result<NodeId, GraphError> {
        if self.contains_node(id.as_str()) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        self.insert_node(id.clone(), data, position);
        Ok(id)
    }

    fn insert_node(&mut self, id: NodeId, mut data: NodeData, position: Position) {
        let first_question = self.question_count() == 0;
        if let NodeData::Question(q) = &mut data {
            q.is_start_node = first_question;
        }
        log::debug!("Adding {} node '{}'", data.kind(), id);
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(Node {
            id,
            data,
            position,
            handles: Handles::default(),
        });
    }

    /// Removes a node together with all incident edges. Removing the start question
    /// succeeds but yields a [`StructuralWarning`]; no replacement start is chosen.
    pub fn remove_node(&mut self, id: &str) -> Result<Option<StructuralWarning>, GraphError> {
        let idx = self
            .node_index(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let removed = self.nodes.remove(idx);
        self.edges
            .retain(|e| e.source != removed.id && e.target != removed.id);
        self.reindex();

        if removed.is_start_node() {
            log::warn!("Start question '{}' removed, graph has no start", removed.id);
            Ok(Some(StructuralWarning::StartNodeRemoved(removed.id)))
        } else {
            Ok(None)
        }
    }

    /// Adds an edge without validating topology. An existing edge with the same
    /// endpoints is reused instead of duplicated.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.to_string()));
            }
        }
        if let Some(existing) = self
            .edges
            .iter()
            .find(|e| e.source == source && e.target == target)
        {
            return Ok(existing.id.clone());
        }

        let id = EdgeId::new(self.fresh_id("edge", |g, id| g.edges.iter().any(|e| e.id == id)));
        log::debug!("Adding edge '{}': {} -> {}", id, source, target);
        self.edges.push(Edge {
            id: id.clone(),
            source: NodeId::from(source),
            target: NodeId::from(target),
        });
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_string()))?;
        Ok(self.edges.remove(idx))
    }

    /// Moves the start flag to `id`. Idempotent on the current start.
    pub fn set_start_node(&mut self, id: &str) -> Result<(), GraphError> {
        let node = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        if !node.is_question() {
            return Err(GraphError::NotAQuestion {
                id: node.id.clone(),
                kind: node.kind(),
            });
        }

        for node in &mut self.nodes {
            if let NodeData::Question(q) = &mut node.data {
                q.is_start_node = node.id == id;
            }
        }
        Ok(())
    }

    /// Replaces the editable attributes of a question. The start flag is untouched.
    pub fn update_question(
        &mut self,
        id: &str,
        question: String,
        response: Option<String>,
        only_choices: bool,
    ) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        match &mut node.data {
            NodeData::Question(q) => {
                q.question = question;
                q.response = response.filter(|r| !r.is_empty());
                q.only_choices = only_choices;
                Ok(())
            }
            NodeData::Choice(_) => Err(GraphError::NotAQuestion {
                id: node.id.clone(),
                kind: NodeKind::Choice,
            }),
        }
    }

    /// Replaces the editable attributes of a choice.
    pub fn update_choice(
        &mut self,
        id: &str,
        text: String,
        response: Option<String>,
        request_contact: bool,
    ) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        match &mut node.data {
            NodeData::Choice(c) => {
                c.text = text;
                c.response = response.filter(|r| !r.is_empty());
                c.request_contact = request_contact;
                Ok(())
            }
            NodeData::Question(_) => Err(GraphError::NotAChoice {
                id: node.id.clone(),
                kind: NodeKind::Question,
            }),
        }
    }

    /// Moves a node on the canvas. Presentation only.
    pub fn place(&mut self, id: &str, position: Position, handles: Handles) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        node.position = position;
        node.handles = handles;
        Ok(())
    }

    /// Drops every node and edge. The id counter keeps running.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.index.clear();
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, GraphError> {
        let idx = self
            .node_index(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        Ok(&mut self.nodes[idx])
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    fn fresh_id(&mut self, prefix: &str, taken: impl Fn(&Self, &str) -> bool) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("{}_{}", prefix, self.next_id);
            if !taken(self, &candidate) {
                return candidate;
            }
        }
    }
}
