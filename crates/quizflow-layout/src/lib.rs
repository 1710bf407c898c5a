use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use quizflow_model::{Edge, Node, NodeKind, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(alias = "TD")]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::LR => "LR",
            Direction::RL => "RL",
        }
    }

    fn is_vertical(&self) -> bool {
        matches!(self, Direction::TB | Direction::BT)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout direction `{0}` (expected TB, TD, BT, LR or RL)")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Direction::TB),
            "BT" => Ok(Direction::BT),
            "LR" => Ok(Direction::LR),
            "RL" => Ok(Direction::RL),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub direction: Direction,
    pub rank_sep: f32,
    pub node_sep: f32,
    pub node_width: f32,
    pub node_height: f32,
    /// Added to `node_height` for question nodes, which render a tall content panel.
    pub question_extra_height: f32,
    pub crossing_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TB,
            rank_sep: 100.0,
            node_sep: 200.0,
            node_width: 172.0,
            node_height: 36.0,
            question_extra_height: 1500.0,
            crossing_passes: 6,
        }
    }
}

impl LayoutOptions {
    pub fn with_direction(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Bounding box the layered pass reserves for `node`.
    pub fn node_size(&self, node: &Node) -> (f32, f32) {
        match node.kind() {
            NodeKind::Question => (self.node_width, self.node_height + self.question_extra_height),
            NodeKind::Option => (self.node_width, self.node_height),
        }
    }
}

#[derive(Debug, Clone)]
struct WorkNode {
    width: f32,
    height: f32,
    layer: usize,
    order: usize,
    x: f32,
    y: f32,
}

#[derive(Debug, Clone)]
struct EdgeMeta {
    from: usize,
    to: usize,
    reversed: bool,
}

#[derive(Debug, Clone)]
struct UnitEdge {
    from: usize,
    to: usize,
}

/// Returns `nodes` in their original order with `position` set to the
/// top-left corner of each node's slot. Every other field is left as is.
pub fn layout_graph(nodes: &[Node], edges: &[Edge], options: &LayoutOptions) -> Vec<Node> {
    let mut work = Vec::with_capacity(nodes.len());
    let mut node_index = HashMap::new();

    for (idx, node) in nodes.iter().enumerate() {
        let (width, height) = options.node_size(node);
        work.push(WorkNode {
            width,
            height,
            layer: 0,
            order: 0,
            x: 0.0,
            y: 0.0,
        });
        node_index.entry(node.id.as_str()).or_insert(idx);
    }

    let mut metas = Vec::new();
    for edge in edges {
        let (Some(&from), Some(&to)) = (
            node_index.get(edge.source.as_str()),
            node_index.get(edge.target.as_str()),
        ) else {
            debug!(edge = %edge.id, "skipping edge with an endpoint outside the laid out nodes");
            continue;
        };
        if from == to {
            trace!(edge = %edge.id, "skipping self loop");
            continue;
        }
        metas.push(EdgeMeta {
            from,
            to,
            reversed: false,
        });
    }

    let real_count = work.len();
    make_acyclic(&mut metas, real_count);
    assign_layers(&mut work, &metas);
    let unit_edges = insert_dummy_nodes(&mut work, &metas);
    let mut layers = build_layers(&mut work);
    reduce_crossings(&mut work, &mut layers, &unit_edges, options.crossing_passes);
    assign_coordinates(&mut work, &layers, options);
    trace!(
        nodes = real_count,
        dummies = work.len() - real_count,
        ranks = layers.len(),
        "layered layout finished"
    );

    nodes
        .iter()
        .zip(&work)
        .map(|(node, placed)| Node {
            position: Position::new(
                placed.x - options.node_width / 2.0,
                placed.y - options.node_height / 2.0,
            ),
            ..node.clone()
        })
        .collect()
}

fn make_acyclic(edges: &mut [EdgeMeta], node_count: usize) {
    let mut adjacency = vec![Vec::new(); node_count];
    for (idx, edge) in edges.iter().enumerate() {
        adjacency[edge.from].push(idx);
    }

    let mut state = vec![0u8; node_count];
    for node in 0..node_count {
        if state[node] == 0 {
            dfs_cycle_break(node, &adjacency, edges, &mut state);
        }
    }

    for edge in edges.iter_mut() {
        if edge.reversed {
            std::mem::swap(&mut edge.from, &mut edge.to);
        }
    }
}

fn dfs_cycle_break(
    node: usize,
    adjacency: &[Vec<usize>],
    edges: &mut [EdgeMeta],
    state: &mut [u8],
) {
    state[node] = 1;
    for &edge_idx in &adjacency[node] {
        let to = edges[edge_idx].to;
        match state[to] {
            0 => dfs_cycle_break(to, adjacency, edges, state),
            1 => edges[edge_idx].reversed = true,
            _ => {}
        }
    }
    state[node] = 2;
}

fn assign_layers(nodes: &mut [WorkNode], edges: &[EdgeMeta]) {
    let node_count = nodes.len();
    let mut indegree = vec![0usize; node_count];
    let mut outgoing = vec![Vec::new(); node_count];

    for edge in edges {
        outgoing[edge.from].push(edge.to);
        indegree[edge.to] += 1;
    }

    let mut queue: VecDeque<usize> = (0..node_count).filter(|&i| indegree[i] == 0).collect();
    let mut order = Vec::with_capacity(node_count);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in &outgoing[node] {
            indegree[next] -= 1;
            if indegree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    for &node in &order {
        let current = nodes[node].layer;
        for &next in &outgoing[node] {
            nodes[next].layer = nodes[next].layer.max(current + 1);
        }
    }
}

fn insert_dummy_nodes(nodes: &mut Vec<WorkNode>, edges: &[EdgeMeta]) -> Vec<UnitEdge> {
    let mut unit_edges = Vec::new();

    for edge in edges {
        let from_layer = nodes[edge.from].layer;
        let to_layer = nodes[edge.to].layer;
        if to_layer <= from_layer + 1 {
            unit_edges.push(UnitEdge {
                from: edge.from,
                to: edge.to,
            });
            continue;
        }

        let mut prev = edge.from;
        for layer in (from_layer + 1)..to_layer {
            let dummy_idx = nodes.len();
            nodes.push(WorkNode {
                width: 1.0,
                height: 1.0,
                layer,
                order: 0,
                x: 0.0,
                y: 0.0,
            });
            unit_edges.push(UnitEdge {
                from: prev,
                to: dummy_idx,
            });
            prev = dummy_idx;
        }
        unit_edges.push(UnitEdge {
            from: prev,
            to: edge.to,
        });
    }

    unit_edges
}

fn build_layers(nodes: &mut [WorkNode]) -> Vec<Vec<usize>> {
    let max_layer = nodes.iter().map(|node| node.layer).max().unwrap_or(0);
    let mut layers = vec![Vec::new(); max_layer + 1];
    for (idx, node) in nodes.iter().enumerate() {
        layers[node.layer].push(idx);
    }
    for layer in &mut layers {
        for (order, &node_idx) in layer.iter().enumerate() {
            nodes[node_idx].order = order;
        }
    }
    layers
}

fn reduce_crossings(
    nodes: &mut [WorkNode],
    layers: &mut [Vec<usize>],
    unit_edges: &[UnitEdge],
    passes: usize,
) {
    let mut down_neighbors = vec![Vec::new(); nodes.len()];
    let mut up_neighbors = vec![Vec::new(); nodes.len()];
    for edge in unit_edges {
        if nodes[edge.to].layer == nodes[edge.from].layer + 1 {
            down_neighbors[edge.from].push(edge.to);
            up_neighbors[edge.to].push(edge.from);
        }
    }

    for pass in 0..passes {
        if pass % 2 == 0 {
            for layer in 1..layers.len() {
                reorder_layer(nodes, layers, layer, &up_neighbors);
            }
        } else {
            for layer in (0..layers.len().saturating_sub(1)).rev() {
                reorder_layer(nodes, layers, layer, &down_neighbors);
            }
        }
    }
}

// Barycenter of each node's neighbours in the adjacent rank; nodes without
// neighbours keep their current slot.
fn reorder_layer(
    nodes: &mut [WorkNode],
    layers: &mut [Vec<usize>],
    layer_index: usize,
    neighbor_lists: &[Vec<usize>],
) {
    let mut scored: Vec<(usize, f32)> = layers[layer_index]
        .iter()
        .map(|&node_idx| {
            let neighbors = &neighbor_lists[node_idx];
            if neighbors.is_empty() {
                return (node_idx, nodes[node_idx].order as f32);
            }
            let sum: usize = neighbors.iter().map(|&n| nodes[n].order).sum();
            (node_idx, sum as f32 / neighbors.len() as f32)
        })
        .collect();

    scored.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| nodes[a.0].order.cmp(&nodes[b.0].order))
    });

    layers[layer_index] = scored.iter().map(|(idx, _)| *idx).collect();
    for (order, &node_idx) in layers[layer_index].iter().enumerate() {
        nodes[node_idx].order = order;
    }
}

fn assign_coordinates(nodes: &mut [WorkNode], layers: &[Vec<usize>], options: &LayoutOptions) {
    let vertical = options.direction.is_vertical();
    // (extent along the rank axis, extent across it)
    let extents = |node: &WorkNode| {
        if vertical {
            (node.height, node.width)
        } else {
            (node.width, node.height)
        }
    };

    let thickness: Vec<f32> = layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&idx| extents(&nodes[idx]).0)
                .fold(0.0f32, f32::max)
        })
        .collect();
    let breadth: Vec<f32> = layers
        .iter()
        .map(|layer| {
            let sum: f32 = layer.iter().map(|&idx| extents(&nodes[idx]).1).sum();
            sum + options.node_sep * layer.len().saturating_sub(1) as f32
        })
        .collect();
    let widest = breadth.iter().copied().fold(0.0f32, f32::max);

    let mut centers = Vec::with_capacity(layers.len());
    let mut center = 0.0f32;
    for (layer_idx, &thick) in thickness.iter().enumerate() {
        center += match layer_idx {
            0 => thick / 2.0,
            _ => thickness[layer_idx - 1] / 2.0 + options.rank_sep + thick / 2.0,
        };
        centers.push(center);
    }
    let rank_extent = centers
        .last()
        .zip(thickness.last())
        .map_or(0.0, |(center, thick)| center + thick / 2.0);

    for (layer_idx, layer) in layers.iter().enumerate() {
        let rank_center = centers[layer_idx];
        let mut cross = (widest - breadth[layer_idx]) / 2.0;
        for &node_idx in layer {
            let (_, across) = extents(&nodes[node_idx]);
            let node = &mut nodes[node_idx];
            if vertical {
                node.x = cross + across / 2.0;
                node.y = rank_center;
            } else {
                node.x = rank_center;
                node.y = cross + across / 2.0;
            }
            cross += across + options.node_sep;
        }
    }

    match options.direction {
        Direction::TB | Direction::LR => {}
        Direction::BT => nodes.iter_mut().for_each(|node| node.y = rank_extent - node.y),
        Direction::RL => nodes.iter_mut().for_each(|node| node.x = rank_extent - node.x),
    }
}
