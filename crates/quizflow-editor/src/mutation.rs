use quizflow_model::{Edge, EdgeStyle, Node, Position};

use crate::handle::HandleKind;
use crate::ids::IdGenerator;

/// A connection drag that has started but not ended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConnection {
    pub node_id: String,
    pub handle_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    Node(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    NoPendingConnection,
    DroppedOnNode(String),
    UnknownHandle(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Spawned { node_id: String, edge_id: String },
    Ignored(IgnoreReason),
}

/// What a finished drag asks for, before any id is drawn.
pub(crate) fn classify(
    pending: Option<PendingConnection>,
    target: &DropTarget,
) -> Result<(PendingConnection, HandleKind), IgnoreReason> {
    let pending = pending.ok_or(IgnoreReason::NoPendingConnection)?;
    if let DropTarget::Node(id) = target {
        return Err(IgnoreReason::DroppedOnNode(id.clone()));
    }
    let kind = HandleKind::from_handle(&pending.handle_id)
        .ok_or_else(|| IgnoreReason::UnknownHandle(pending.handle_id.clone()))?;
    Ok((pending, kind))
}

/// Builds the node a handle spawns and the edge from the dragged handle to it.
pub fn spawn_from_handle(
    pending: &PendingConnection,
    kind: HandleKind,
    ids: &mut IdGenerator,
    position: Position,
    style: EdgeStyle,
) -> (Node, Edge) {
    let id = ids.next_id();
    let node = Node {
        data: kind.default_data(&id),
        id,
        position,
    };
    let edge = Edge::between(pending.node_id.as_str(), node.id.as_str())
        .with_handle(pending.handle_id.as_str())
        .with_style(style);
    (node, edge)
}
