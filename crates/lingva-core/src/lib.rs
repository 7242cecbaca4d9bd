//! UI-independent core of the translation side panel.
//!
//! The panel binary owns rendering and the event loop; everything that
//! decides *when* to translate, which completion is still relevant and what
//! gets persisted lives here so it can be exercised without a window.

pub mod api;
pub mod cancellation;
pub mod catalog;
pub mod config_store;
pub mod error;
pub mod handoff;
pub mod model;
pub mod session;
pub mod storage;

pub use api::{DEFAULT_API_ORIGIN, LanguageSource, LingvaClient};
pub use cancellation::CancellationToken;
pub use catalog::CatalogCache;
pub use config_store::{ConfigStore, system_ui_language};
pub use error::{CatalogError, StorageError, TranslateError};
pub use handoff::{Delivery, HandoffPayload, InboundMessage, Mailbox};
pub use model::{
    AUTO, Language, LanguageCatalog, LanguageKind, LanguagePair, RequestToken, TranslationRequest,
    UiState,
};
pub use session::{
    CatalogStatus, ControlState, ERROR_PREFIX, Effect, Event, LOADING_PLACEHOLDER, SessionController,
};
pub use storage::{FileStore, KeyValueStore};
