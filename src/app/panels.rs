use eframe::egui::{self, RichText, Ui};

use crate::util::{format_percent, format_score};

use super::ViewModel;

impl ViewModel {
    pub(super) fn draw_panel(&mut self, ui: &mut Ui, reload_requested: &mut bool, is_reloading: bool) {
        ui.add_space(6.0);
        ui.heading("Behavioral similarity");
        ui.add_space(4.0);
        ui.label(format!("{} alumni in cohort", self.subgraph.cohort_size));
        ui.label(format!(
            "{} shown, {} similarity links",
            self.subgraph.nodes.len(),
            self.subgraph.edges.len()
        ));
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!is_reloading, egui::Button::new("Reload dataset"))
                .clicked()
            {
                *reload_requested = true;
            }
            if is_reloading {
                ui.spinner();
            }
        });

        ui.separator();
        ui.label(RichText::new("Search").strong());
        ui.text_edit_singleline(&mut self.search);

        ui.separator();
        ui.label(RichText::new("Network tuning").strong());
        self.draw_tuning(ui);

        ui.separator();
        self.draw_selected_agent(ui);
    }

    fn draw_tuning(&mut self, ui: &mut Ui) {
        let mut changed = false;

        changed |= ui
            .add(egui::Slider::new(&mut self.config.max_edges, 1..=100).text("max links"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.config.layout.iterations, 50..=1000).text("iterations"))
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.layout.repulsion, 1_000.0..=50_000.0)
                    .text("repulsion"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.layout.attraction, 0.001..=0.05)
                    .text("attraction"),
            )
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.config.layout.gravity, 0.0..=0.05).text("gravity"))
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.layout.node_radius, 4.0..=20.0)
                    .text("node radius"),
            )
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.config.layout.label_gap, 0.0..=30.0).text("label gap"))
            .changed();

        if changed {
            self.graph_dirty = true;
        }
    }

    fn draw_selected_agent(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Selected agent").strong());

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a node to inspect an agent.");
            return;
        };
        let Some(&index) = self.subgraph.index_by_id.get(&selected_id) else {
            ui.label("The selected agent is no longer in the working set.");
            return;
        };

        let node = &self.subgraph.nodes[index];
        ui.label(RichText::new(node.label.as_str()).strong());
        if node.label != node.id {
            ui.small(node.id.as_str());
        }
        ui.label(format!("Phronesis score: {}", format_score(node.score)));
        ui.label(format!("Similarity links shown: {}", node.degree));

        let neighbors: Vec<(usize, f32)> = self
            .subgraph
            .edges
            .iter()
            .filter_map(|edge| {
                if edge.a == index {
                    Some((edge.b, edge.weight))
                } else if edge.b == index {
                    Some((edge.a, edge.weight))
                } else {
                    None
                }
            })
            .collect();

        if neighbors.is_empty() {
            return;
        }

        ui.add_space(4.0);
        ui.label("Most similar agents:");
        let mut next_selection = None;
        for (neighbor, weight) in neighbors {
            let neighbor_node = &self.subgraph.nodes[neighbor];
            let label = format!("{} ({})", neighbor_node.label, format_percent(weight));
            if ui.link(label).on_hover_text(neighbor_node.id.as_str()).clicked() {
                next_selection = Some(neighbor_node.id.clone());
            }
        }
        if next_selection.is_some() {
            self.selected = next_selection;
        }
    }
}
