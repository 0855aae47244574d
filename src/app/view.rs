use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::graph::{self, EdgeEmphasis, Hover};
use crate::util::{format_score, truncate_label};

use super::{NavigateFn, ViewModel};

const EDGE_HOVER_TOLERANCE: f32 = 6.0;
const LABEL_MAX_CHARS: usize = 18;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn score_color(score: Option<f32>) -> Color32 {
    let Some(score) = score else {
        return Color32::from_rgb(120, 126, 134);
    };
    let t = score.clamp(0.0, 1.0);
    let r = (205.0 - (120.0 * t)) as u8;
    let g = (92.0 + (118.0 * t)) as u8;
    let b = (88.0 + (52.0 * t)) as u8;
    Color32::from_rgb(r, g, b)
}

fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

impl ViewModel {
    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            self.subgraph
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    fuzzy_match_score(&matcher, &node.label, query)
                        .or_else(|| fuzzy_match_score(&matcher, &node.id, query))
                        .map(|_| index)
                })
                .collect(),
        )
    }

    pub(super) fn draw_graph(&mut self, ui: &mut Ui, navigate: &mut NavigateFn) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

        let canvas = vec2(self.config.layout.width, self.config.layout.height);
        let origin = rect.center() - (canvas * 0.5);

        // Hit-test in layout coordinates: nodes win over edges.
        let pointer = response.hover_pos().map(|pos| pos - origin);
        let node_radius = self.config.layout.node_radius;
        let hover = match pointer {
            Some(pointer) => graph::node_at(&self.positions, pointer, node_radius + 2.0)
                .map(Hover::Node)
                .or_else(|| {
                    graph::edge_at(&self.subgraph, &self.positions, pointer, EDGE_HOVER_TOLERANCE)
                        .map(Hover::Edge)
                })
                .unwrap_or(Hover::None),
            None => Hover::None,
        };

        let highlight = graph::build_highlight_state(&self.subgraph, hover);
        let search_matches = self.search_matches();

        for (index, edge) in self.subgraph.edges.iter().enumerate() {
            let emphasis = highlight.edge_emphasis(index, edge);
            let alpha = (emphasis.opacity() * 255.0) as u8;
            let (line_width, line_color) = match emphasis {
                EdgeEmphasis::Full => (2.6, Color32::from_rgba_unmultiplied(140, 190, 255, alpha)),
                EdgeEmphasis::Medium => (1.9, Color32::from_rgba_unmultiplied(140, 190, 255, alpha)),
                EdgeEmphasis::Background | EdgeEmphasis::Default => {
                    (1.2, Color32::from_rgba_unmultiplied(148, 156, 168, alpha))
                }
            };

            let start = origin + self.positions[edge.a];
            let end = origin + self.positions[edge.b];
            painter.line_segment([start, end], Stroke::new(line_width, line_color));
        }

        for (index, node) in self.subgraph.nodes.iter().enumerate() {
            let position = origin + self.positions[index];
            let searched_out = search_matches
                .as_ref()
                .is_some_and(|matches| !matches.contains(&index));
            let dimmed = !highlight.node_opaque(index) || searched_out;

            let mut fill = score_color(node.score);
            let mut label_color = Color32::from_rgb(208, 214, 222);
            if dimmed {
                fill = dim_color(fill, 0.25);
                label_color = dim_color(label_color, 0.25);
            }

            painter.circle_filled(position, node_radius, fill);
            if hover == Hover::Node(index) || self.selected.as_deref() == Some(node.id.as_str()) {
                painter.circle_stroke(
                    position,
                    node_radius + 2.0,
                    Stroke::new(1.6, Color32::from_rgb(245, 206, 93)),
                );
            }

            painter.text(
                position + vec2(0.0, node_radius + 4.0),
                Align2::CENTER_TOP,
                truncate_label(&node.label, LABEL_MAX_CHARS),
                FontId::proportional(11.0),
                label_color,
            );
        }

        if hover != Hover::None {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
            response
                .clone()
                .on_hover_ui_at_pointer(|ui| self.hover_tooltip(ui, hover));
        }

        if response.clicked()
            && let Hover::Node(index) = hover
        {
            let agent_id = self.subgraph.nodes[index].id.clone();
            self.dispatch_navigation(navigate, &agent_id);
        }
    }

    fn hover_tooltip(&self, ui: &mut Ui, hover: Hover) {
        match hover {
            Hover::Node(index) => {
                let node = &self.subgraph.nodes[index];
                ui.label(egui::RichText::new(node.label.as_str()).strong());
                if node.label != node.id {
                    ui.small(node.id.as_str());
                }
                ui.label(format!("Phronesis score: {}", format_score(node.score)));
                ui.label(format!("Similarity links shown: {}", node.degree));
            }
            Hover::Edge(index) => {
                let Some(detail) = graph::edge_detail(&self.subgraph, index) else {
                    return;
                };
                ui.label(
                    egui::RichText::new(format!("{} / {}", detail.label_a, detail.label_b))
                        .strong(),
                );
                ui.label(format!("Behavioral similarity: {}", detail.weight_percent));
                if !detail.behaviors.is_empty() {
                    ui.separator();
                    ui.label("Shared behaviors:");
                    for behavior in &detail.behaviors {
                        ui.label(format!("- {behavior}"));
                    }
                    if detail.hidden_behaviors > 0 {
                        ui.small(format!("+{} more", detail.hidden_behaviors));
                    }
                }
            }
            Hover::None => {}
        }
    }
}
