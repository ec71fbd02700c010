//! Per-document facade used by the rendering layer.
//!
//! An [`Editor`] owns one [`FlowGraph`] and exposes the intents a canvas can issue.
//! Typed methods return typed errors; [`Editor::dispatch`] runs any [`Intent`] and
//! turns every rejection or warning into a [`Notification`], so nothing fails silently.

use crate::error::{ConnectError, GraphError, ScriptError, SnapshotError, StructuralWarning};
use crate::graph::{
    ChoiceData, Edge, EdgeId, FlowGraph, Node, NodeData, NodeId, NodeKind, QuestionData,
};
use crate::layout::{Direction, Layout, LayoutConfig, compute_layout};
use crate::notice::Notification;
use crate::script::{ScriptConfig, export_script, import_script};
use crate::snapshot::DocumentSnapshot;
use crate::validator::validate_connection;

/// Everything the rendering collaborator can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddQuestionNode,
    AddChoiceNode,
    /// Speculative check while a connection is being dragged. Never mutates.
    CanConnect { source: NodeId, target: NodeId },
    Connect { source: NodeId, target: NodeId },
    RemoveNode(NodeId),
    RemoveEdge(EdgeId),
    SetStart(NodeId),
    UpdateQuestion {
        id: NodeId,
        question: String,
        response: Option<String>,
        only_choices: bool,
    },
    UpdateChoice {
        id: NodeId,
        text: String,
        response: Option<String>,
        request_contact: bool,
    },
    Clear,
    RunLayout(Direction),
    ExportConfig,
    ImportConfig(ScriptConfig),
}

/// What a successfully dispatched intent produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    NodeAdded(NodeId),
    ConnectionAllowed,
    EdgeAdded(EdgeId),
    NodeRemoved(NodeId),
    EdgeRemoved(EdgeId),
    StartChanged(NodeId),
    NodeUpdated(NodeId),
    Cleared,
    LaidOut(Layout),
    Exported(ScriptConfig),
    Imported,
}

/// Outcome of [`Editor::dispatch`]. A failed intent has no response and an error
/// notice; a completed one may still carry a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub response: Option<Response>,
    pub notice: Option<Notification>,
}

impl Feedback {
    fn done(response: Response) -> Self {
        Self {
            response: Some(response),
            notice: None,
        }
    }

    fn failed(notice: Notification) -> Self {
        Self {
            response: None,
            notice: Some(notice),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.response.is_some()
    }
}

/// Builder for [`Editor`], mirroring how layout tunables are usually configured once.
#[derive(Debug, Default)]
pub struct EditorBuilder {
    graph: FlowGraph,
    layout_config: LayoutConfig,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(mut self, graph: FlowGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout_config = config;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.layout_config.direction = direction;
        self
    }

    pub fn build(self) -> Editor {
        Editor {
            graph: self.graph,
            layout_config: self.layout_config,
        }
    }
}

#[derive(Debug, Default)]
pub struct Editor {
    graph: FlowGraph,
    layout_config: LayoutConfig,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn add_question_node(&mut self) -> NodeId {
        let position = self.graph.drop_position(NodeKind::Question);
        self.graph
            .add_node(NodeData::Question(QuestionData::default()), position)
    }

    pub fn add_choice_node(&mut self) -> NodeId {
        let position = self.graph.drop_position(NodeKind::Choice);
        self.graph
            .add_node(NodeData::Choice(ChoiceData::default()), position)
    }

    /// Validates without mutating; safe to call on every pointer move.
    pub fn can_connect(&self, source: &str, target: &str) -> Result<(), ConnectError> {
        validate_connection(&self.graph, source, target)
    }

    /// Adds `source -> target` if the validator accepts it. A rejected connect leaves
    /// the graph untouched.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, ConnectError> {
        validate_connection(&self.graph, source, target)?;
        Ok(self.graph.add_edge(source, target)?)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<Option<StructuralWarning>, GraphError> {
        self.graph.remove_node(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        self.graph.remove_edge(id)
    }

    pub fn set_start(&mut self, id: &str) -> Result<(), GraphError> {
        self.graph.set_start_node(id)
    }

    pub fn update_question(
        &mut self,
        id: &str,
        question: String,
        response: Option<String>,
        only_choices: bool,
    ) -> Result<(), GraphError> {
        self.graph
            .update_question(id, question, response, only_choices)
    }

    pub fn update_choice(
        &mut self,
        id: &str,
        text: String,
        response: Option<String>,
        request_contact: bool,
    ) -> Result<(), GraphError> {
        self.graph
            .update_choice(id, text, response, request_contact)
    }

    pub fn clear(&mut self) {
        self.graph.clear();
    }

    /// Lays the graph out in `direction` and remembers the direction for later imports.
    pub fn run_layout(&mut self, direction: Direction) -> Result<Layout, GraphError> {
        self.layout_config.direction = direction;
        let layout = compute_layout(&self.graph, &self.layout_config);
        self.graph.apply_layout(&layout)?;
        Ok(layout)
    }

    pub fn export_config(&self) -> Result<ScriptConfig, ScriptError> {
        export_script(&self.graph)
    }

    /// Replaces the document with the imported script, laid out with the current
    /// configuration. On error the current document is kept as is.
    pub fn import_config(&mut self, config: &ScriptConfig) -> Result<(), ScriptError> {
        let mut graph = import_script(config)?;
        let layout = compute_layout(&graph, &self.layout_config);
        graph.apply_layout(&layout)?;
        self.graph = graph;
        Ok(())
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot::capture(&self.graph)
    }

    /// Replaces the document with a saved snapshot. On error nothing changes.
    pub fn restore(&mut self, snapshot: DocumentSnapshot) -> Result<(), SnapshotError> {
        self.graph = snapshot.restore()?;
        Ok(())
    }

    /// Runs one intent to completion and reports the result for display.
    pub fn dispatch(&mut self, intent: Intent) -> Feedback {
        log::debug!("Dispatching {:?}", intent);
        match intent {
            Intent::AddQuestionNode => Feedback::done(Response::NodeAdded(self.add_question_node())),
            Intent::AddChoiceNode => Feedback::done(Response::NodeAdded(self.add_choice_node())),
            Intent::CanConnect { source, target } => {
                match self.can_connect(source.as_str(), target.as_str()) {
                    Ok(()) => Feedback::done(Response::ConnectionAllowed),
                    Err(e) => Feedback::failed((&e).into()),
                }
            }
            Intent::Connect { source, target } => {
                match self.connect(source.as_str(), target.as_str()) {
                    Ok(edge) => Feedback::done(Response::EdgeAdded(edge)),
                    Err(e) => Feedback::failed((&e).into()),
                }
            }
            Intent::RemoveNode(id) => match self.remove_node(id.as_str()) {
                Ok(warning) => Feedback {
                    response: Some(Response::NodeRemoved(id)),
                    notice: warning.as_ref().map(Notification::from),
                },
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::RemoveEdge(id) => match self.remove_edge(id.as_str()) {
                Ok(edge) => Feedback::done(Response::EdgeRemoved(edge.id)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::SetStart(id) => match self.set_start(id.as_str()) {
                Ok(()) => Feedback::done(Response::StartChanged(id)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::UpdateQuestion {
                id,
                question,
                response,
                only_choices,
            } => match self.update_question(id.as_str(), question, response, only_choices) {
                Ok(()) => Feedback::done(Response::NodeUpdated(id)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::UpdateChoice {
                id,
                text,
                response,
                request_contact,
            } => match self.update_choice(id.as_str(), text, response, request_contact) {
                Ok(()) => Feedback::done(Response::NodeUpdated(id)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::Clear => {
                self.clear();
                Feedback::done(Response::Cleared)
            }
            Intent::RunLayout(direction) => match self.run_layout(direction) {
                Ok(layout) => Feedback::done(Response::LaidOut(layout)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::ExportConfig => match self.export_config() {
                Ok(config) => Feedback::done(Response::Exported(config)),
                Err(e) => Feedback::failed((&e).into()),
            },
            Intent::ImportConfig(config) => match self.import_config(&config) {
                Ok(()) => Feedback::done(Response::Imported),
                Err(e) => Feedback::failed((&e).into()),
            },
        }
    }
}
