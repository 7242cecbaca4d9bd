//! Small file-backed key-value stores.
//!
//! Each key is one document on disk. Durable state (the language pair and a
//! pending handoff) is kept as TOML under the data directory; session state
//! (the language catalog) is kept as JSON under the per-login runtime
//! directory so it disappears on logout or reboot.

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_DIR_NAME: &str = "lingva-panel";

pub trait KeyValueStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;
    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    format: Format,
}

impl FileStore {
    pub fn toml(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: Format::Toml,
        }
    }

    pub fn json(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            format: Format::Json,
        }
    }

    /// JSON store scoped to the current login session.
    pub fn session() -> Self {
        Self::json(session_dir())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{}", self.format.extension()))
    }

    fn encode<T: Serialize>(&self, key: &str, value: &T) -> Result<String, StorageError> {
        let encoded = match self.format {
            Format::Toml => toml::to_string(value).map_err(|e| e.to_string()),
            Format::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
        };
        encoded.map_err(|reason| StorageError::Encode {
            key: key.to_string(),
            reason,
        })
    }

    fn decode<T: DeserializeOwned>(&self, key: &str, data: &str) -> Result<T, StorageError> {
        let decoded = match self.format {
            Format::Toml => toml::from_str(data).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(data).map_err(|e| e.to_string()),
        };
        decoded.map_err(|reason| StorageError::Decode {
            key: key.to_string(),
            reason,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let data = match fs::read_to_string(self.path_for(key)) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                });
            }
        };
        self.decode(key, &data).map(Some)
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let contents = self.encode(key, value)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_err)?;
        let path = self.path_for(key);
        let staging = path.with_extension("tmp");
        fs::write(&staging, contents).map_err(io_err)?;
        fs::rename(&staging, &path).map_err(io_err)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

fn session_dir() -> PathBuf {
    match std::env::var_os("XDG_RUNTIME_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir).join(SESSION_DIR_NAME),
        _ => std::env::temp_dir().join(format!("{SESSION_DIR_NAME}-session")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        text: String,
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::toml(dir.path());
        assert_eq!(store.get::<Entry>("absent").unwrap(), None);
        store.remove("absent").unwrap();
    }

    #[test]
    fn toml_store_persists_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::toml(dir.path().join("nested"));
        let entry = Entry {
            text: "bonjour".to_string(),
        };

        store.put("textToTranslate", &entry).unwrap();
        let reopened = FileStore::toml(dir.path().join("nested"));
        assert_eq!(reopened.get("textToTranslate").unwrap(), Some(entry));

        reopened.remove("textToTranslate").unwrap();
        assert_eq!(store.get::<Entry>("textToTranslate").unwrap(), None);
    }

    #[test]
    fn corrupt_document_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::json(dir.path());
        fs::write(dir.path().join("languages.json"), "{not json").unwrap();
        assert!(matches!(
            store.get::<Entry>("languages"),
            Err(StorageError::Decode { .. })
        ));
    }
}
