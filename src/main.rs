use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use dag_viewer::config::settings::ViewerConfig;
use dag_viewer::graph_utils::loader;
use dag_viewer::gui::frontend::ViewerApp;
use dag_viewer::gui::viewer::GraphViewer;

#[derive(Parser, Debug)]
#[command(name = "dag-viewer", about = "Interactive layered viewer for directed acyclic graphs")]
struct Cli {
    /// Graph file (.json or .ron); a sample graph is shown when omitted
    graph: Option<PathBuf>,

    /// Viewer settings file, instead of the per-user settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ViewerConfig::load().unwrap_or_else(|e| {
            log::warn!("ignoring settings in {}: {}", ViewerConfig::settings_dir().display(), e);
            ViewerConfig::default()
        }),
    };

    let (graph, source) = match &cli.graph {
        Some(path) => (loader::load_from_path(path)?, path.display().to_string()),
        None => (loader::sample_graph(), "sample".to_string()),
    };

    // Reject cyclic input before any window is opened
    let mut viewer = GraphViewer::new(&config);
    viewer.set_graph(graph).with_context(|| format!("laying out {}", source))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_resizable(true),
        ..Default::default()
    };
    eframe::run_native(
        "DAG Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(&config, viewer, source)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
