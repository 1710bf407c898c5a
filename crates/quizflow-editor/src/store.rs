use std::collections::HashMap;

use quizflow_model::{Edge, EdgeStyle, Graph, GraphError, Node, NodeData, NodeKind};
use tracing::trace;

const DEFAULT_STROKE: &str = "#b1b1b7";

/// Stroke colour per source handle id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStyles {
    strokes: HashMap<String, String>,
    fallback: String,
}

impl Default for EdgeStyles {
    fn default() -> Self {
        let strokes = [("newOption", "#2680eb"), ("grey", "#8e8e8e")]
            .into_iter()
            .map(|(handle, stroke)| (handle.to_string(), stroke.to_string()))
            .collect();
        Self {
            strokes,
            fallback: DEFAULT_STROKE.to_string(),
        }
    }
}

impl EdgeStyles {
    pub fn insert(&mut self, handle: impl Into<String>, stroke: impl Into<String>) {
        self.strokes.insert(handle.into(), stroke.into());
    }

    pub fn style_for(&self, handle: &str) -> EdgeStyle {
        let stroke = self.strokes.get(handle).unwrap_or(&self.fallback);
        EdgeStyle {
            stroke: stroke.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphCommand {
    SetNodes(Vec<Node>),
    SetEdges(Vec<Edge>),
    AddNode(Node),
    Connect(Edge),
    /// A new node together with the edge that reaches it; both or neither are committed.
    Spawn { node: Node, edge: Edge },
    RemoveNode(String),
    Replace(Graph),
}

impl GraphCommand {
    fn name(&self) -> &'static str {
        match self {
            GraphCommand::SetNodes(_) => "set_nodes",
            GraphCommand::SetEdges(_) => "set_edges",
            GraphCommand::AddNode(_) => "add_node",
            GraphCommand::Connect(_) => "connect",
            GraphCommand::Spawn { .. } => "spawn",
            GraphCommand::RemoveNode(_) => "remove_node",
            GraphCommand::Replace(_) => "replace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("node `{0}` does not exist")]
    UnknownNode(String),

    #[error("option `{option}` already belongs to `{parent}`")]
    SecondParent { option: String, parent: String },

    #[error("option `{option}` already leads to `{next}`")]
    NextAlreadyLinked { option: String, next: String },

    #[error("edge `{edge}` cannot join {from} `{source_id}` to {to} `{target}`")]
    KindMismatch {
        edge: String,
        source_id: String,
        from: NodeKind,
        target: String,
        to: NodeKind,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// The authoritative graph of an editing session. Reads borrow the current
/// snapshot; writes go through [`GraphStore::apply`] and either commit whole
/// or leave the graph as it was.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graph: Graph,
    styles: EdgeStyles,
    revision: u64,
}

impl GraphStore {
    pub fn new(styles: EdgeStyles) -> Self {
        Self {
            graph: Graph::default(),
            styles,
            revision: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn edge_style(&self, handle: &str) -> EdgeStyle {
        self.styles.style_for(handle)
    }

    pub fn apply(&mut self, command: GraphCommand) -> Result<(), StoreError> {
        let name = command.name();
        match command {
            GraphCommand::SetNodes(nodes) => {
                let candidate = Graph::new(nodes, self.graph.edges.clone());
                candidate.validate()?;
                self.graph = candidate;
            }
            GraphCommand::SetEdges(edges) => {
                let candidate = Graph::new(self.graph.nodes.clone(), edges);
                candidate.validate()?;
                self.graph = candidate;
            }
            GraphCommand::Replace(graph) => {
                graph.validate()?;
                self.graph = graph;
            }
            GraphCommand::AddNode(node) => {
                self.check_new_node(&node)?;
                self.graph.nodes.push(node);
            }
            GraphCommand::Connect(edge) => {
                self.check_new_edge(&edge, None)?;
                self.link_next(&edge);
                self.graph.edges.push(edge);
            }
            GraphCommand::Spawn { node, edge } => {
                self.check_new_node(&node)?;
                self.check_new_edge(&edge, Some(&node))?;
                self.graph.nodes.push(node);
                self.link_next(&edge);
                self.graph.edges.push(edge);
            }
            GraphCommand::RemoveNode(id) => {
                if !self.graph.contains_node(&id) {
                    return Err(StoreError::UnknownNode(id));
                }
                self.graph.nodes.retain(|node| node.id != id);
                self.graph
                    .edges
                    .retain(|edge| edge.source != id && edge.target != id);
                // Options that led to the removed question become terminal.
                for node in &mut self.graph.nodes {
                    if let NodeData::Option(option) = &mut node.data {
                        if option.next.as_deref() == Some(id.as_str()) {
                            option.next = None;
                        }
                    }
                }
            }
        }
        self.revision += 1;
        trace!(command = name, revision = self.revision, "graph command applied");
        Ok(())
    }

    fn check_new_node(&self, node: &Node) -> Result<(), StoreError> {
        if self.graph.contains_node(&node.id) {
            return Err(GraphError::DuplicateNode(node.id.clone()).into());
        }
        Ok(())
    }

    /// New edges run question → option (one parent per option),
    /// option → question (the option's `next`, at most one) or
    /// question → question. Option → option is refused.
    fn check_new_edge(&self, edge: &Edge, pending: Option<&Node>) -> Result<(), StoreError> {
        if self.graph.contains_edge(&edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id.clone()).into());
        }
        let source = self.endpoint(edge, &edge.source, pending)?;
        let target = self.endpoint(edge, &edge.target, pending)?;

        match (source.kind(), target.kind()) {
            (NodeKind::Question, NodeKind::Option) => {
                if let Some(parent) = self.graph.parent_of(&target.id) {
                    return Err(StoreError::SecondParent {
                        option: target.id.clone(),
                        parent: parent.to_string(),
                    });
                }
            }
            (NodeKind::Option, NodeKind::Question) => {
                if let Some(existing) = self.graph.outgoing(&source.id).next() {
                    return Err(StoreError::NextAlreadyLinked {
                        option: source.id.clone(),
                        next: existing.target.clone(),
                    });
                }
            }
            (NodeKind::Option, NodeKind::Option) => {
                return Err(StoreError::KindMismatch {
                    edge: edge.id.clone(),
                    source_id: source.id.clone(),
                    from: NodeKind::Option,
                    target: target.id.clone(),
                    to: NodeKind::Option,
                });
            }
            (NodeKind::Question, NodeKind::Question) => {}
        }
        Ok(())
    }

    fn endpoint<'a>(
        &'a self,
        edge: &Edge,
        id: &str,
        pending: Option<&'a Node>,
    ) -> Result<&'a Node, StoreError> {
        self.graph
            .node(id)
            .or_else(|| pending.filter(|node| node.id == id))
            .ok_or_else(|| {
                GraphError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: id.to_string(),
                }
                .into()
            })
    }

    /// An option → question edge is the option's `next` link.
    fn link_next(&mut self, edge: &Edge) {
        let to_question = self
            .graph
            .node(&edge.target)
            .is_some_and(|node| node.kind() == NodeKind::Question);
        if !to_question {
            return;
        }
        let source = self.graph.nodes.iter_mut().find(|node| node.id == edge.source);
        if let Some(Node {
            data: NodeData::Option(option),
            ..
        }) = source
        {
            option.next = Some(edge.target.clone());
        }
    }
}
