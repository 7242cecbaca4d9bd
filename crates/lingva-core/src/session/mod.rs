//! Translation session controller.
//!
//! A single instance owns the input/output text, the language pair, the
//! catalog status and the request bookkeeping (`pending` timer token and
//! `active` request token). Every user or runtime event goes through
//! [`SessionController::handle`], which mutates the state and returns the
//! [`Effect`]s the host must perform. Completions carry the token they were
//! issued with; anything that no longer matches is dropped.

mod projection;
mod reducer;

pub use projection::{ControlState, ERROR_PREFIX, LOADING_PLACEHOLDER};

use crate::error::TranslateError;
use crate::handoff::HandoffPayload;
use crate::model::{LanguageCatalog, LanguagePair, RequestToken, TranslationRequest, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready(LanguageCatalog),
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub enum Event {
    InputChanged(String),
    SourceSelected(String),
    TargetSelected(String),
    Swap,
    Clear,
    Handoff(HandoffPayload),
    DebounceElapsed(RequestToken),
    TranslationFinished {
        token: RequestToken,
        result: Result<String, TranslateError>,
    },
    CatalogLoaded(Result<LanguageCatalog, String>),
    RetryCatalog,
}

/// Work the host performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire [`Event::DebounceElapsed`] with this token after the quiet period.
    StartTimer(RequestToken),
    /// Signal the in-flight call for this token to abort.
    CancelRequest(RequestToken),
    /// Run the request and report back with [`Event::TranslationFinished`].
    Translate(TranslationRequest),
    /// Write the pair through to durable storage.
    SavePair(LanguagePair),
    /// The controller replaced the input text; refresh the editor.
    ReplaceInput(String),
    /// Fetch (or reuse) the language catalog and report [`Event::CatalogLoaded`].
    FetchCatalog,
}

pub struct SessionController {
    input: String,
    output: String,
    output_is_text: bool,
    pair: LanguagePair,
    fallback_target: String,
    catalog: CatalogStatus,
    ui: UiState,
    next_token: u64,
    pending: Option<RequestToken>,
    active: Option<RequestToken>,
    awaiting_catalog: bool,
}

impl SessionController {
    pub fn new(pair: LanguagePair, fallback_target: impl Into<String>) -> (Self, Vec<Effect>) {
        let controller = Self {
            input: String::new(),
            output: String::new(),
            output_is_text: false,
            pair,
            fallback_target: fallback_target.into(),
            catalog: CatalogStatus::Loading,
            ui: UiState::Idle,
            next_token: 0,
            pending: None,
            active: None,
            awaiting_catalog: false,
        };
        (controller, vec![Effect::FetchCatalog])
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog
    }

    pub fn catalog(&self) -> Option<&LanguageCatalog> {
        match &self.catalog {
            CatalogStatus::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn active_token(&self) -> Option<RequestToken> {
        self.active
    }

    pub fn controls(&self) -> ControlState {
        projection::project(
            &self.ui,
            &self.pair,
            &self.catalog,
            &self.output,
            self.output_is_text,
        )
    }

    fn issue_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }
}
