//! Long-lived collaborators shared by the panel and the `send` command.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use lingva_core::{CatalogCache, ConfigStore, FileStore, LingvaClient, Mailbox, system_ui_language};
use std::path::Path;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Services {
    pub client: LingvaClient,
    pub catalog: CatalogCache<FileStore>,
    pub config_store: ConfigStore<FileStore>,
    pub mailbox: Mailbox<FileStore>,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = LingvaClient::new(config.api_origin.clone())
            .context("Failed to build translation HTTP client")?;
        let durable = FileStore::toml(Path::new(&config.data_dir).join("store"));
        let session = FileStore::session();
        let fallback_target =
            system_ui_language().unwrap_or_else(|| config.fallback_target_lang.clone());
        debug!(
            durable = %durable.root().display(),
            session = %session.root().display(),
            %fallback_target,
            "Opened panel storage"
        );

        Ok(Self {
            client,
            catalog: CatalogCache::new(session),
            config_store: ConfigStore::new(durable.clone(), fallback_target),
            mailbox: Mailbox::new(durable),
        })
    }
}
