use crate::model::LanguageKind;
use thiserror::Error;

/// Outcome of a translation or language-list call that did not yield a body.
///
/// `Cancelled` is never shown to the user; every other variant is a network
/// failure that is surfaced once and not retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("request cancelled")]
    Cancelled,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TranslateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TranslateError::Cancelled)
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TranslateError::Malformed(err.to_string())
        } else {
            TranslateError::Network(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to fetch {kind} languages: {source}")]
    Fetch {
        kind: LanguageKind,
        #[source]
        source: TranslateError,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for key `{key}`: {reason}")]
    Encode { key: String, reason: String },

    #[error("failed to decode value for key `{key}`: {reason}")]
    Decode { key: String, reason: String },
}
