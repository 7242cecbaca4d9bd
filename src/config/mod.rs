//! Configuration loading for the translation panel.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the panel can still launch. The language pair is not
//! part of this file; it lives in the durable store next to the other state.

mod defaults;
mod io;
mod models;

pub use io::load_config;
pub use models::{AppConfig, LogLevel, ThemeMode};
