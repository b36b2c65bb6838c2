use std::path::PathBuf;

mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::{AppPaths, CheckInApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "checkin-gui", about = "Event check-in window")]
struct Args {
    /// Settings file (TOML). Defaults to ./checkin.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the saved attendance state.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl From<Args> for StartupConfig {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            data_dir: args.data_dir,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let startup = StartupConfig::from(Args::parse());
    let settings = checkin_core::load_settings(startup.config_path.as_deref())?;
    let paths = AppPaths::resolve(&startup, &settings)?;
    let app = CheckInApp::bootstrap(settings, &paths);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Event Check-In")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([560.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Event Check-In",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
    .context("check-in window failed")
}
