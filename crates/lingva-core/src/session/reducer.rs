use super::projection::{ERROR_PREFIX, LOADING_PLACEHOLDER};
use super::{CatalogStatus, Effect, Event, SessionController};
use crate::error::TranslateError;
use crate::handoff::HandoffPayload;
use crate::model::{AUTO, LanguageCatalog, LanguagePair, RequestToken, TranslationRequest, UiState};
use tracing::{debug, info, warn};

impl SessionController {
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            Event::InputChanged(text) => self.handle_input_changed(text, &mut effects),
            Event::SourceSelected(code) => self.handle_source_selected(code, &mut effects),
            Event::TargetSelected(code) => self.handle_target_selected(code, &mut effects),
            Event::Swap => self.handle_swap(&mut effects),
            Event::Clear => self.handle_clear(&mut effects),
            Event::Handoff(payload) => self.handle_handoff(payload, &mut effects),
            Event::DebounceElapsed(token) => self.handle_debounce_elapsed(token, &mut effects),
            Event::TranslationFinished { token, result } => {
                self.handle_translation_finished(token, result)
            }
            Event::CatalogLoaded(result) => self.handle_catalog_loaded(result, &mut effects),
            Event::RetryCatalog => self.handle_retry_catalog(&mut effects),
        }

        effects
    }

    fn handle_input_changed(&mut self, text: String, effects: &mut Vec<Effect>) {
        if text == self.input {
            return;
        }
        self.input = text;
        self.schedule(effects);
    }

    fn handle_source_selected(&mut self, code: String, effects: &mut Vec<Effect>) {
        if code == self.pair.source {
            return;
        }
        let known = self
            .catalog()
            .is_some_and(|catalog| catalog.source_language(&code).is_some());
        if !known {
            warn!(%code, "Ignoring unknown source language");
            return;
        }
        info!(from = %self.pair.source, to = %code, "Source language changed");
        self.pair.source = code;
        effects.push(Effect::SavePair(self.pair.clone()));
        self.schedule(effects);
    }

    fn handle_target_selected(&mut self, code: String, effects: &mut Vec<Effect>) {
        if code == self.pair.target {
            return;
        }
        let known = code != AUTO
            && self
                .catalog()
                .is_some_and(|catalog| catalog.target_language(&code).is_some());
        if !known {
            warn!(%code, "Ignoring unusable target language");
            return;
        }
        info!(from = %self.pair.target, to = %code, "Target language changed");
        self.pair.target = code;
        effects.push(Effect::SavePair(self.pair.clone()));
        self.schedule(effects);
    }

    fn handle_swap(&mut self, effects: &mut Vec<Effect>) {
        if !self.controls().swap_enabled {
            debug!(source = %self.pair.source, "Swap ignored while disabled");
            return;
        }
        let Some(swapped) = self.pair.swapped() else {
            return;
        };
        self.pair = swapped;
        if self.output_is_text {
            std::mem::swap(&mut self.input, &mut self.output);
        } else {
            self.output.clear();
        }
        info!(source = %self.pair.source, target = %self.pair.target, "Swapped languages");
        effects.push(Effect::ReplaceInput(self.input.clone()));
        effects.push(Effect::SavePair(self.pair.clone()));
        self.schedule(effects);
    }

    fn handle_clear(&mut self, effects: &mut Vec<Effect>) {
        self.invalidate(effects);
        self.input.clear();
        self.output.clear();
        self.output_is_text = false;
        self.ui = UiState::Idle;
        effects.push(Effect::ReplaceInput(String::new()));
    }

    fn handle_handoff(&mut self, payload: HandoffPayload, effects: &mut Vec<Effect>) {
        info!(chars = payload.text.chars().count(), "Received text handoff");
        if !self.pair.is_auto_source() {
            self.pair.source = AUTO.to_string();
            effects.push(Effect::SavePair(self.pair.clone()));
        }
        self.input = payload.text;
        effects.push(Effect::ReplaceInput(self.input.clone()));
        self.schedule(effects);
    }

    /// Supersede whatever is pending or in flight and restart the quiet period.
    fn schedule(&mut self, effects: &mut Vec<Effect>) {
        self.invalidate(effects);
        let token = self.issue_token();
        self.pending = Some(token);
        self.ui = UiState::Pending(self.input.clone());
        debug!(%token, "Scheduled translation");
        effects.push(Effect::StartTimer(token));
    }

    fn invalidate(&mut self, effects: &mut Vec<Effect>) {
        if let Some(token) = self.pending.take() {
            debug!(%token, "Superseded pending timer");
        }
        if let Some(token) = self.active.take() {
            debug!(%token, "Cancelling in-flight translation");
            effects.push(Effect::CancelRequest(token));
        }
        if self.ui.is_loading() {
            self.output.clear();
        }
        self.awaiting_catalog = false;
    }

    fn handle_debounce_elapsed(&mut self, token: RequestToken, effects: &mut Vec<Effect>) {
        if self.pending != Some(token) {
            debug!(%token, "Discarding stale debounce timer");
            return;
        }
        self.pending = None;

        if self.input.trim().is_empty() {
            self.output.clear();
            self.output_is_text = false;
            self.ui = UiState::Idle;
            return;
        }
        if self.catalog().is_none() {
            debug!(%token, "Deferring translation until the language catalog is available");
            self.awaiting_catalog = true;
            return;
        }

        // Text and pair are read now, not when the trigger was scheduled.
        let request = TranslationRequest {
            text: self.input.clone(),
            pair: self.pair.clone(),
            token,
        };
        self.active = Some(token);
        self.output = LOADING_PLACEHOLDER.to_string();
        self.output_is_text = false;
        self.ui = UiState::Loading(request.clone());
        info!(
            %token,
            source = %request.pair.source,
            target = %request.pair.target,
            "Issuing translation request"
        );
        effects.push(Effect::Translate(request));
    }

    fn handle_translation_finished(
        &mut self,
        token: RequestToken,
        result: Result<String, TranslateError>,
    ) {
        if self.active != Some(token) {
            debug!(%token, "Discarding stale translation result");
            return;
        }
        self.active = None;

        match result {
            Ok(translation) => {
                debug!(%token, chars = translation.chars().count(), "Translation received");
                self.output = translation.clone();
                self.output_is_text = true;
                self.ui = UiState::Success(translation);
            }
            Err(err) if err.is_cancelled() => {
                self.output.clear();
                self.output_is_text = false;
                self.ui = UiState::Idle;
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(%token, %reason, "Translation failed");
                self.output = format!("{ERROR_PREFIX} {reason}");
                self.output_is_text = false;
                self.ui = UiState::Error(reason);
            }
        }
    }

    fn handle_catalog_loaded(
        &mut self,
        result: Result<LanguageCatalog, String>,
        effects: &mut Vec<Effect>,
    ) {
        let catalog = match result {
            Ok(catalog) => catalog,
            Err(reason) => {
                warn!(%reason, "Language catalog unavailable");
                self.catalog = CatalogStatus::Unavailable(reason);
                return;
            }
        };

        let reconciled = reconcile_pair(&self.pair, &catalog, &self.fallback_target);
        if reconciled != self.pair {
            info!(
                source = %reconciled.source,
                target = %reconciled.target,
                "Replaced stored languages missing from the catalog"
            );
            self.pair = reconciled;
            effects.push(Effect::SavePair(self.pair.clone()));
        }
        self.catalog = CatalogStatus::Ready(catalog);

        if self.awaiting_catalog {
            self.schedule(effects);
        }
    }

    fn handle_retry_catalog(&mut self, effects: &mut Vec<Effect>) {
        if matches!(self.catalog, CatalogStatus::Unavailable(_)) {
            self.catalog = CatalogStatus::Loading;
            effects.push(Effect::FetchCatalog);
        }
    }
}

fn reconcile_pair(pair: &LanguagePair, catalog: &LanguageCatalog, fallback: &str) -> LanguagePair {
    let source = if catalog.source_language(&pair.source).is_some() {
        pair.source.clone()
    } else {
        AUTO.to_string()
    };
    let target = if catalog.target_language(&pair.target).is_some() {
        pair.target.clone()
    } else if catalog.target_language(fallback).is_some() {
        fallback.to_string()
    } else {
        catalog
            .target
            .first()
            .map(|lang| lang.code.clone())
            .unwrap_or_else(|| pair.target.clone())
    };
    LanguagePair { source, target }
}
