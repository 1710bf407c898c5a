use quizflow_layout::{layout_graph, Direction, LayoutOptions};
use quizflow_model::{
    export_graph, import_graph, Edge, ExportError, ExportedDocuments, Graph, ImportError,
    ImportOptions, Node, Position, ResultsDocument,
};
use tracing::{debug, info};

use crate::handle::default_question;
use crate::ids::IdGenerator;
use crate::mutation::{
    classify, spawn_from_handle, ConnectOutcome, DropTarget, PendingConnection,
};
use crate::source::{fetch_documents, DocumentSource, LoadError, SourceDocuments};
use crate::store::{EdgeStyles, GraphCommand, GraphStore, StoreError};
use crate::viewport::{FocusToggle, Project, ScreenPoint, Viewport};

const QUESTION_SPACING: f32 = 450.0;
const QUESTION_ROW: f32 = 100.0;

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub layout: LayoutOptions,
    pub import: ImportOptions,
    pub styles: EdgeStyles,
    /// Re-run the layout after every spawned node. Off by default so that
    /// hand-placed positions survive edits.
    pub auto_layout_on_connect: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identifies one import request. Only the newest ticket may install a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Applied { nodes: usize, edges: usize },
    Stale,
}

#[derive(Debug)]
pub struct EditorSession {
    options: SessionOptions,
    store: GraphStore,
    ids: IdGenerator,
    pending: Option<PendingConnection>,
    focus: FocusToggle,
    generation: u64,
    results: Option<ResultsDocument>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl EditorSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            store: GraphStore::new(options.styles.clone()),
            options,
            ids: IdGenerator::new(),
            pending: None,
            focus: FocusToggle::default(),
            generation: 0,
            results: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn graph(&self) -> &Graph {
        self.store.graph()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn results(&self) -> Option<&ResultsDocument> {
        self.results.as_ref()
    }

    pub fn pending_connection(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    pub fn apply(&mut self, command: GraphCommand) -> Result<(), SessionError> {
        self.store.apply(command)?;
        Ok(())
    }

    pub fn begin_import(&mut self) -> ImportTicket {
        self.generation += 1;
        ImportTicket {
            generation: self.generation,
        }
    }

    /// Installs fetched documents if `ticket` is still the newest import.
    /// On any failure the current graph is left untouched.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        fetched: Result<SourceDocuments, LoadError>,
    ) -> Result<ImportStatus, SessionError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale import"
            );
            return Ok(ImportStatus::Stale);
        }

        let documents = fetched?;
        let imported = import_graph(
            &documents.questions,
            &documents.strings,
            &documents.results,
            &self.options.import,
        )?;
        let nodes = layout_graph(&imported.nodes, &imported.edges, &self.options.layout);
        let graph = Graph::new(nodes, imported.edges);
        let status = ImportStatus::Applied {
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
        };

        self.store.apply(GraphCommand::Replace(graph))?;
        for node in self.store.nodes() {
            self.ids.observe(&node.id);
        }
        self.results = Some(documents.results);
        self.pending = None;
        info!(?status, "import installed");
        Ok(status)
    }

    pub fn import_from(
        &mut self,
        source: &dyn DocumentSource,
    ) -> Result<ImportStatus, SessionError> {
        let ticket = self.begin_import();
        let fetched = fetch_documents(source);
        self.finish_import(ticket, fetched)
    }

    pub fn export(&self) -> Result<ExportedDocuments, SessionError> {
        Ok(export_graph(self.store.graph())?)
    }

    /// Re-flows the current graph, optionally in a different direction.
    pub fn relayout(&mut self, direction: Option<Direction>) -> Result<(), SessionError> {
        let mut options = self.options.layout.clone();
        if let Some(direction) = direction {
            options.direction = direction;
        }
        let graph = self.store.graph();
        let nodes = layout_graph(&graph.nodes, &graph.edges, &options);
        self.store.apply(GraphCommand::SetNodes(nodes))?;
        Ok(())
    }

    pub fn begin_connection(&mut self, node_id: impl Into<String>, handle_id: impl Into<String>) {
        self.pending = Some(PendingConnection {
            node_id: node_id.into(),
            handle_id: handle_id.into(),
        });
    }

    /// Ends the current drag. A drop on empty canvas from a spawning handle
    /// adds the node and its edge in one command; anything else is ignored.
    pub fn end_connection(
        &mut self,
        target: DropTarget,
        pointer: ScreenPoint,
        projector: &dyn Project,
    ) -> Result<ConnectOutcome, SessionError> {
        let (pending, kind) = match classify(self.pending.take(), &target) {
            Ok(classified) => classified,
            Err(reason) => {
                debug!(?reason, "connection dropped");
                return Ok(ConnectOutcome::Ignored(reason));
            }
        };

        let position = projector.project(pointer);
        let style = self.store.edge_style(&pending.handle_id);
        let (node, edge) = spawn_from_handle(&pending, kind, &mut self.ids, position, style);
        let outcome = ConnectOutcome::Spawned {
            node_id: node.id.clone(),
            edge_id: edge.id.clone(),
        };
        debug!(handle = %kind, node = %node.id, source = %pending.node_id, "spawning node");
        self.store.apply(GraphCommand::Spawn { node, edge })?;

        if self.options.auto_layout_on_connect {
            self.relayout(None)?;
        }
        Ok(outcome)
    }

    /// Handle-to-handle connection between two existing nodes.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        handle_id: Option<&str>,
    ) -> Result<String, SessionError> {
        let mut edge = Edge::between(source, target);
        if let Some(handle_id) = handle_id {
            edge = edge
                .with_handle(handle_id)
                .with_style(self.store.edge_style(handle_id));
        }
        let id = edge.id.clone();
        self.store.apply(GraphCommand::Connect(edge))?;
        Ok(id)
    }

    /// Adds a free-standing question to the right of the previous ones.
    pub fn add_question(&mut self) -> Result<String, SessionError> {
        let id = self.ids.next_id();
        let x = self.ids.peek() as f32 * QUESTION_SPACING;
        let node = Node::question(id.as_str(), default_question(&id))
            .with_position(Position::new(x, QUESTION_ROW));
        self.store.apply(GraphCommand::AddNode(node))?;
        Ok(id)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<(), SessionError> {
        self.store.apply(GraphCommand::RemoveNode(id.to_string()))?;
        Ok(())
    }

    /// Double-click on a node: returns the viewport the canvas should switch to,
    /// or `None` if the node is unknown.
    pub fn toggle_focus(
        &mut self,
        node_id: &str,
        current: Viewport,
        window: (f32, f32),
    ) -> Option<Viewport> {
        let node = self.store.graph().node(node_id)?;
        Some(self.focus.toggle(current, node, window))
    }
}
