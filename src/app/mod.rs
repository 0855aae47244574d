use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::graph::{
    DEFAULT_MAX_EDGES, LayoutConfig, SelectedSubgraph, layout, select_subgraph,
};
use crate::similarity::{SimilarityData, load_similarity_data};

mod panels;
mod view;

/// Caller-supplied navigation hook, invoked with the agent id of a clicked
/// node. What navigation means is the host's business.
pub type NavigateFn = Box<dyn FnMut(&str)>;

#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub max_edges: Option<usize>,
    pub iterations: Option<usize>,
}

pub struct EthographApp {
    dataset_path: String,
    state: AppState,
    overrides: ConfigOverrides,
    navigate: NavigateFn,
    reload_rx: Option<Receiver<Result<SimilarityData, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<SimilarityData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct GraphConfig {
    max_edges: usize,
    layout: LayoutConfig,
}

struct ViewModel {
    data: SimilarityData,
    config: GraphConfig,
    search: String,
    selected: Option<String>,
    graph_dirty: bool,
    subgraph: SelectedSubgraph,
    positions: Vec<Vec2>,
}

impl EthographApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset_path: String,
        overrides: ConfigOverrides,
        navigate: NavigateFn,
    ) -> Self {
        let state = Self::start_load(dataset_path.clone());
        Self {
            dataset_path,
            state,
            overrides,
            navigate,
            reload_rx: None,
        }
    }

    fn spawn_load(dataset_path: String) -> Receiver<Result<SimilarityData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_similarity_data(&dataset_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }
}

impl eframe::App for EthographApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(data, self.overrides))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading similarity network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load similarity data");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.dataset_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut self.navigate, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.dataset_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(data) => {
                                    AppState::Ready(Box::new(ViewModel::new(data, self.overrides)))
                                }
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(data: SimilarityData, overrides: ConfigOverrides) -> Self {
        let mut layout_config = LayoutConfig::default();
        if let Some(iterations) = overrides.iterations {
            layout_config.iterations = iterations;
        }
        let config = GraphConfig {
            max_edges: overrides.max_edges.unwrap_or(DEFAULT_MAX_EDGES),
            layout: layout_config,
        };

        Self {
            data,
            config,
            search: String::new(),
            selected: None,
            graph_dirty: true,
            subgraph: SelectedSubgraph::default(),
            positions: Vec::new(),
        }
    }

    /// Discard the previous working set and lay the graph out again. Runs once
    /// per data or config change, never per frame; hovering cannot reach it.
    fn rebuild_graph(&mut self) {
        self.subgraph = select_subgraph(&self.data, self.config.max_edges);
        self.positions = layout(&self.subgraph, &self.config.layout);
        if let Some(selected) = &self.selected
            && !self.subgraph.index_by_id.contains_key(selected)
        {
            self.selected = None;
        }
        self.graph_dirty = false;
    }

    fn show(
        &mut self,
        ctx: &Context,
        navigate: &mut NavigateFn,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_graph();
        }

        egui::SidePanel::right("inspector")
            .min_width(300.0)
            .show(ctx, |ui| {
                self.draw_panel(ui, reload_requested, is_reloading);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.subgraph.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Not enough shared behavior");
                    ui.add_space(8.0);
                    ui.label(
                        "No similarity links were found for this cohort. The network \
                         appears once at least two agents overlap in their observed \
                         behaviors.",
                    );
                });
                return;
            }

            self.draw_graph(ui, navigate);
        });
    }

    fn dispatch_navigation(&mut self, navigate: &mut NavigateFn, agent_id: &str) {
        log::info!("navigating to agent {agent_id}");
        navigate(agent_id);
        self.selected = Some(agent_id.to_string());
    }
}
