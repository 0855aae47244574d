mod app;
mod graph;
mod similarity;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the cohort similarity dataset (JSON)
    #[arg(long)]
    edges: String,

    /// Cap on the number of similarity links shown
    #[arg(long)]
    max_edges: Option<usize>,

    /// Layout simulation iteration budget
    #[arg(long)]
    iterations: Option<usize>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1320.0, 880.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ethograph",
        options,
        Box::new(move |cc| {
            let overrides = app::ConfigOverrides {
                max_edges: args.max_edges,
                iterations: args.iterations,
            };
            let navigate: app::NavigateFn = Box::new(|agent_id| {
                log::info!("open agent profile {agent_id}");
            });
            Ok(Box::new(app::EthographApp::new(
                cc,
                args.edges.clone(),
                overrides,
                navigate,
            )))
        }),
    )
}
