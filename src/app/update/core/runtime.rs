use super::super::super::messages::Message;
use super::super::super::state::{App, InFlight};
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::widget::text_editor;
use iced::window;
use lingva_core::{CancellationToken, Effect as SessionEffect, RequestToken, TranslationRequest};
use std::time::Duration;
use tracing::{debug, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::Session(effect) => self.run_session_effect(effect),
            Effect::CopyToClipboard(text) => {
                debug!(chars = text.chars().count(), "Copying translation");
                iced::clipboard::write(text)
            }
            Effect::ConsumeMailbox => match self.services.mailbox.take() {
                Ok(Some(payload)) => Task::done(Message::HandoffReceived(payload)),
                Ok(None) => Task::none(),
                Err(err) => {
                    warn!("Failed to read stored handoff: {err}");
                    Task::none()
                }
            },
        }
    }

    fn run_session_effect(&mut self, effect: SessionEffect) -> Task<Message> {
        match effect {
            SessionEffect::StartTimer(token) => {
                let quiet = Duration::from_millis(self.config.debounce_ms);
                Task::perform(tokio::time::sleep(quiet), move |_| {
                    Message::DebounceElapsed(token)
                })
            }
            SessionEffect::CancelRequest(token) => {
                self.cancel_in_flight(token);
                Task::none()
            }
            SessionEffect::Translate(request) => self.start_translation(request),
            SessionEffect::SavePair(pair) => {
                if let Err(err) = self.services.config_store.save(&pair) {
                    warn!("Failed to persist language pair: {err}");
                }
                Task::none()
            }
            SessionEffect::ReplaceInput(text) => {
                self.input = text_editor::Content::with_text(&text);
                Task::none()
            }
            SessionEffect::FetchCatalog => {
                let catalog = self.services.catalog.clone();
                let client = self.services.client.clone();
                Task::perform(
                    async move {
                        catalog
                            .get_catalog(&client)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    Message::CatalogLoaded,
                )
            }
        }
    }

    fn cancel_in_flight(&mut self, token: RequestToken) {
        if self.in_flight.as_ref().is_some_and(|f| f.token == token) {
            if let Some(in_flight) = self.in_flight.take() {
                debug!(%token, "Cancelling in-flight translation");
                in_flight.cancel.cancel();
            }
        }
    }

    fn start_translation(&mut self, request: TranslationRequest) -> Task<Message> {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel.cancel();
        }
        let token = request.token;
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            token,
            cancel: cancel.clone(),
        });

        let client = self.services.client.clone();
        Task::perform(
            async move {
                client
                    .translate(&request.text, &request.pair, &cancel)
                    .await
            },
            move |result| Message::TranslationFinished { token, result },
        )
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    _status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    match event {
        Event::Window(window::Event::Focused) => Some(Message::PanelActivated),
        _ => None,
    }
}
