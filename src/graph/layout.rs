use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::select::SelectedSubgraph;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub iterations: usize,
    pub repulsion: f32,
    pub attraction: f32,
    pub gravity: f32,
    pub node_radius: f32,
    pub label_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 680.0,
            padding: 48.0,
            iterations: 300,
            repulsion: 15_000.0,
            attraction: 0.012,
            gravity: 0.01,
            node_radius: 10.0,
            label_gap: 14.0,
        }
    }
}

impl LayoutConfig {
    pub fn min_separation(&self) -> f32 {
        (self.node_radius * 2.0) + self.label_gap
    }

    fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}

const POSITION_GAIN: f32 = 0.7;
const VELOCITY_RETAIN: f32 = 0.4;

/// Run the annealed force simulation and return one position per node, indexed
/// like `subgraph.nodes`. Pure and deterministic: the circle seed plus a
/// randomness-free update rule make identical inputs reproduce bit-identical
/// output. Always runs the full iteration budget.
pub fn layout(subgraph: &SelectedSubgraph, config: &LayoutConfig) -> Vec<Vec2> {
    let node_count = subgraph.nodes.len();
    if node_count == 0 {
        return Vec::new();
    }

    let mut positions = seed_positions(node_count, config);
    let mut velocities = vec![Vec2::ZERO; node_count];

    let iterations = config.iterations;
    for step in 0..iterations {
        let alpha = 1.0 - (step as f32 / iterations as f32);
        step_once(subgraph, config, alpha, &mut positions, &mut velocities);
    }

    positions
}

/// Equally spaced ring around the canvas center, in node insertion order.
fn seed_positions(node_count: usize, config: &LayoutConfig) -> Vec<Vec2> {
    let center = config.center();
    let radius = 0.35 * config.width.min(config.height);
    (0..node_count)
        .map(|index| {
            let angle = (index as f32 / node_count as f32) * TAU;
            center + vec2(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

fn step_once(
    subgraph: &SelectedSubgraph,
    config: &LayoutConfig,
    alpha: f32,
    positions: &mut [Vec2],
    velocities: &mut [Vec2],
) {
    let node_count = positions.len();
    let center = config.center();

    // Coulomb-style repulsion over all unordered pairs. Distance is floored at
    // one so coincident nodes cannot blow up the division.
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = positions[i] - positions[j];
            let distance = delta.length().max(1.0);
            let direction = delta / distance;
            let push = direction * (config.repulsion * alpha / (distance * distance));
            velocities[i] += push;
            velocities[j] -= push;
        }
    }

    // Springs along selected edges only; stiffness scales with the similarity
    // weight, so strongly similar agents cluster tighter than weak pairs.
    for edge in &subgraph.edges {
        let delta = positions[edge.a] - positions[edge.b];
        let distance = delta.length().max(1.0);
        let direction = delta / distance;
        let pull = direction * (config.attraction * alpha * distance * edge.weight);
        velocities[edge.a] -= pull;
        velocities[edge.b] += pull;
    }

    // Centering gravity keeps the whole arrangement from drifting under
    // repulsion alone.
    for index in 0..node_count {
        velocities[index] += (center - positions[index]) * (config.gravity * alpha);
    }

    for index in 0..node_count {
        positions[index] += velocities[index] * POSITION_GAIN;
        velocities[index] *= VELOCITY_RETAIN;
    }

    separate_collisions(positions, config.min_separation());
    clamp_to_canvas(positions, config);
}

/// Positional correction, deliberately not annealed: any pair closer than the
/// minimum separation is pushed apart by half the penetration depth each.
fn separate_collisions(positions: &mut [Vec2], min_separation: f32) {
    let node_count = positions.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = positions[i] - positions[j];
            let distance = delta.length();
            if distance >= min_separation {
                continue;
            }

            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                // Coincident pair: derive a stable direction from the indices.
                let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * TAU;
                vec2(angle.cos(), angle.sin())
            };

            let push = direction * ((min_separation - distance) * 0.5);
            positions[i] += push;
            positions[j] -= push;
        }
    }
}

fn clamp_to_canvas(positions: &mut [Vec2], config: &LayoutConfig) {
    let pad = config.padding;
    for position in positions.iter_mut() {
        position.x = position.x.clamp(pad, config.width - pad);
        position.y = position.y.clamp(pad, config.height - pad);
    }
}
