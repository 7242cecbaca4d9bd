//! Durable record of the last language pair.
//!
//! Stored under the `config` key with `sourceLang`/`targetLang` fields.
//! Absent or unusable fields fall back to `auto` and the configured fallback
//! target, so a fresh profile still starts with a valid pair.

use crate::error::StorageError;
use crate::model::{AUTO, LanguagePair};
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const CONFIG_KEY: &str = "config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(rename = "sourceLang", default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    #[serde(rename = "targetLang", default, skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore<S> {
    store: S,
    fallback_target: String,
}

impl<S: KeyValueStore> ConfigStore<S> {
    pub fn new(store: S, fallback_target: impl Into<String>) -> Self {
        Self {
            store,
            fallback_target: fallback_target.into(),
        }
    }

    pub fn load(&self) -> LanguagePair {
        let stored = match self.store.get::<SessionConfig>(CONFIG_KEY) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                warn!("Falling back to default language pair: {err}");
                SessionConfig::default()
            }
        };
        let source = stored
            .source_lang
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| AUTO.to_string());
        let target = stored
            .target_lang
            .filter(|code| !code.trim().is_empty() && code != AUTO)
            .unwrap_or_else(|| self.fallback_target.clone());
        debug!(%source, %target, "Loaded language pair");
        LanguagePair { source, target }
    }

    pub fn save(&self, pair: &LanguagePair) -> Result<(), StorageError> {
        let record = SessionConfig {
            source_lang: Some(pair.source.clone()),
            target_lang: Some(pair.target.clone()),
        };
        self.store.put(CONFIG_KEY, &record)?;
        debug!(source = %pair.source, target = %pair.target, "Saved language pair");
        Ok(())
    }
}

/// Primary language subtag of a POSIX locale value such as `de_DE.UTF-8`.
pub fn locale_language(value: &str) -> Option<String> {
    let base = value.split(['.', '@']).next()?.trim();
    let primary = base.split(['_', '-']).next()?.trim().to_ascii_lowercase();
    if primary.is_empty() || primary == "c" || primary == "posix" {
        return None;
    }
    if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(primary)
}

/// Language of the user's interface, read from the usual locale variables.
pub fn system_ui_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| locale_language(&value))
}
