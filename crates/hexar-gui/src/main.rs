#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use anyhow::Result;
use clap::Parser;

mod app;
mod components;
mod settings;
mod theme;

use app::WorkspaceApp;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Opaque project identifier to open
    #[arg(short, long)]
    project: Option<String>,

    /// Start with an empty tree instead of the demo components
    #[arg(long)]
    empty: bool,
}

fn main() -> Result<()> {
    // Log to stdout (set `RUST_LOG=debug` for more).
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Hexar Workspace"),
        ..Default::default()
    };

    eframe::run_native(
        "Hexar Workspace",
        options,
        Box::new(move |cc| Ok(Box::new(WorkspaceApp::new(cc, args.project, args.empty)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start Hexar Workspace: {e}"))
}
