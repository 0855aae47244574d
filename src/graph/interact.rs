use std::collections::HashSet;

use eframe::egui::Vec2;

use crate::util::format_percent;

use super::select::{SelectedEdge, SelectedSubgraph};

/// Behaviors listed on an edge hover before collapsing into a "+N more" tail.
pub const MAX_DETAIL_BEHAVIORS: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hover {
    #[default]
    None,
    Node(usize),
    Edge(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEmphasis {
    Full,
    Medium,
    Background,
    Default,
}

impl EdgeEmphasis {
    pub fn opacity(self) -> f32 {
        match self {
            Self::Full => 0.95,
            Self::Medium => 0.65,
            Self::Background => 0.04,
            Self::Default => 0.22,
        }
    }
}

/// Everything the renderer needs to emphasize or dim, derived once per pointer
/// event from the hover target. Never touches positions.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
    pub hover: Hover,
    connected: HashSet<usize>,
}

pub fn build_highlight_state(subgraph: &SelectedSubgraph, hover: Hover) -> HighlightState {
    let connected = match hover {
        Hover::Node(node) => connected_set(subgraph, node),
        Hover::Edge(_) | Hover::None => HashSet::new(),
    };
    HighlightState { hover, connected }
}

/// The hovered node plus every direct neighbor, by one linear scan of the
/// selected edges.
pub fn connected_set(subgraph: &SelectedSubgraph, node: usize) -> HashSet<usize> {
    let mut connected = HashSet::from([node]);
    for edge in &subgraph.edges {
        if edge.a == node {
            connected.insert(edge.b);
        } else if edge.b == node {
            connected.insert(edge.a);
        }
    }
    connected
}

impl HighlightState {
    pub fn edge_emphasis(&self, edge_index: usize, edge: &SelectedEdge) -> EdgeEmphasis {
        match self.hover {
            Hover::Edge(hovered) if hovered == edge_index => EdgeEmphasis::Full,
            Hover::Node(_) => {
                if self.connected.contains(&edge.a) && self.connected.contains(&edge.b) {
                    EdgeEmphasis::Medium
                } else {
                    EdgeEmphasis::Background
                }
            }
            Hover::Edge(_) | Hover::None => EdgeEmphasis::Default,
        }
    }

    /// With a node hovered only its connected set stays opaque; otherwise every
    /// node renders at full opacity.
    pub fn node_opaque(&self, node: usize) -> bool {
        match self.hover {
            Hover::Node(_) => self.connected.contains(&node),
            Hover::Edge(_) | Hover::None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDetail {
    pub label_a: String,
    pub label_b: String,
    pub weight_percent: String,
    pub behaviors: Vec<String>,
    pub hidden_behaviors: usize,
}

pub fn edge_detail(subgraph: &SelectedSubgraph, edge_index: usize) -> Option<EdgeDetail> {
    let edge = subgraph.edges.get(edge_index)?;
    Some(EdgeDetail {
        label_a: subgraph.nodes[edge.a].label.clone(),
        label_b: subgraph.nodes[edge.b].label.clone(),
        weight_percent: format_percent(edge.weight),
        behaviors: edge
            .shared_behaviors
            .iter()
            .take(MAX_DETAIL_BEHAVIORS)
            .cloned()
            .collect(),
        hidden_behaviors: edge.shared_behaviors.len().saturating_sub(MAX_DETAIL_BEHAVIORS),
    })
}

/// Nearest node whose circle contains the pointer, in layout coordinates.
pub fn node_at(positions: &[Vec2], pointer: Vec2, radius: f32) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .filter_map(|(index, position)| {
            let distance = (*position - pointer).length();
            (distance <= radius).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Nearest edge segment within `tolerance` of the pointer, if any.
pub fn edge_at(
    subgraph: &SelectedSubgraph,
    positions: &[Vec2],
    pointer: Vec2,
    tolerance: f32,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, edge) in subgraph.edges.iter().enumerate() {
        let distance = distance_to_segment(pointer, positions[edge.a], positions[edge.b]);
        if distance <= tolerance && best.is_none_or(|(_, nearest)| distance < nearest) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let span = end - start;
    let length_sq = span.length_sq();
    if length_sq <= f32::EPSILON {
        return (point - start).length();
    }
    let t = ((point - start).dot(span) / length_sq).clamp(0.0, 1.0);
    (point - (start + span * t)).length()
}
