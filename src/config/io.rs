use super::models::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let mut config: AppConfig = toml::from_str(contents).context("parsing config TOML")?;
    config.api_origin = config.api_origin.trim().trim_end_matches('/').to_string();
    if config.api_origin.is_empty() {
        config.api_origin = crate::config::defaults::default_api_origin();
    }
    config.fallback_target_lang = config.fallback_target_lang.trim().to_ascii_lowercase();
    if config.fallback_target_lang.is_empty() || config.fallback_target_lang == lingva_core::AUTO {
        warn!("fallback_target_lang must name a real language; using default");
        config.fallback_target_lang = crate::config::defaults::default_fallback_target_lang();
    }
    Ok(config)
}
