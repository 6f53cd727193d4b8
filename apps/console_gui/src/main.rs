use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::worker::spawn_backend_thread;
use controller::events::UiEvent;
use ui::app::ConsoleApp;

/// Operations console for the order-tracking backend.
#[derive(Parser, Debug)]
#[command(name = "console_gui")]
struct Args {
    /// Base address of the operations backend; falls back to
    /// DORAKART_SERVER_URL, then the local default.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let server_url = args
        .server_url
        .or_else(|| std::env::var("DORAKART_SERVER_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    tracing::info!(%server_url, "starting console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    spawn_backend_thread(server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dorakart Console")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Dorakart Console",
        options,
        Box::new(move |_cc| Ok(Box::new(ConsoleApp::new(cmd_tx, ui_rx, server_url)))),
    )
}
