#![forbid(unsafe_code)]

mod config;
mod gui;
mod timer_model;
mod types;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::{AppConfig, ConfigSource};

/// Edit the scheduled playback timers of a media player
#[derive(Parser, Debug)]
#[command(name = "media-timers", version, about)]
struct Args {
    /// Folder the resource dialog opens in first
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: TraceLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let (config, source) = AppConfig::load_from(&config_path)?;
    match &source {
        ConfigSource::Loaded(path) => info!(path = %path.display(), "Loaded config"),
        ConfigSource::Generated(path) => info!(path = %path.display(), "Generated default config"),
        ConfigSource::Unsaved(path, e) => {
            error!(path = %path.display(), error = %e, "Failed to save default config")
        }
    }
    info!("config={:#?}", config);

    let base_dir = args.base_dir.unwrap_or_else(|| config.base_directory());

    gui::run_gui(&config, base_dir, Vec::new())
}
