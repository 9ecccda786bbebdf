//! Process wiring: configuration, logging, the input sources, and the engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::actor;
use crate::actor::cycler::{ArmedFlag, Cycler};
use crate::common::config::Config;
use crate::model::{EligibilityPolicy, MruStore};
use crate::sys::win32::single_instance::SingleInstance;
use crate::sys::win32::{Win32WindowSystem, hotkey, keyboard_hook};

#[derive(Parser, Debug)]
#[command(name = "wincycle", version, about = "Cycle through the focused application's windows")]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load(path).map_err(Into::into),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path).map_err(Into::into),
            None => Ok(Config::default()),
        },
    }
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let _instance = SingleInstance::acquire()?;
    let config = load_config(&args)?;
    info!(
        modifier = %config.modifier,
        ignore_minimized = config.ignore_minimized_windows,
        "starting"
    );

    let armed = ArmedFlag::new();
    let (events_tx, events_rx) = actor::channel();
    hotkey::spawn(config.modifier, events_tx.clone())?;
    keyboard_hook::spawn(config.modifier, armed.clone(), events_tx)?;

    let cycler = Cycler::new(
        Win32WindowSystem,
        MruStore::new(),
        EligibilityPolicy::new(config.ignore_minimized_windows),
        armed,
        events_rx,
    );
    let engine = tokio::spawn(cycler.run());

    tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
    info!("shutting down");
    engine.abort();
    Ok(())
}
