//! Entry point for the translation side panel.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Either launch the panel or hand selected text to it.

mod app;
mod cli;
mod config;
mod listener;
mod sender;
mod services;

use crate::app::run_app;
use crate::cli::{Command, parse_args};
use crate::config::load_config;
use crate::sender::send_text;
use crate::services::Services;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let command = parse_args(env::args().skip(1))?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    let services = Services::from_config(&config)?;

    match command {
        Command::Panel => {
            info!(
                origin = %config.api_origin,
                debounce_ms = config.debounce_ms,
                port = config.handoff_port,
                level = %config.log_level,
                "Starting translation panel"
            );
            run_app(config, services).context("Failed to start the GUI")?;
        }
        Command::Send { text, open_panel } => {
            send_text(&services, config.handoff_port, text, open_panel)?;
        }
    }
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
