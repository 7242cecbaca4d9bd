use crate::config::AppConfig;
use crate::services::Services;
use iced::Task;
use iced::widget::text_editor;
use lingva_core::{CancellationToken, RequestToken, SessionController};
use tracing::info;

use super::messages::Message;
use super::update::Effect;

/// The request currently on the wire and the handle that aborts it.
pub(in crate::app) struct InFlight {
    pub(in crate::app) token: RequestToken,
    pub(in crate::app) cancel: CancellationToken,
}

/// Panel state: the session controller plus the widget-side mirrors of it.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) services: Services,
    pub(super) session: SessionController,
    pub(super) input: text_editor::Content,
    pub(super) in_flight: Option<InFlight>,
}

impl App {
    pub fn bootstrap(config: AppConfig, services: Services) -> (Self, Task<Message>) {
        let pair = services.config_store.load();
        info!(
            source = %pair.source,
            target = %pair.target,
            "Opening translation panel"
        );
        // A locale-derived target missing from the catalog falls back to the configured one.
        let (session, startup) =
            SessionController::new(pair, config.fallback_target_lang.clone());
        let mut app = App {
            config,
            services,
            session,
            input: text_editor::Content::new(),
            in_flight: None,
        };

        let mut effects: Vec<Effect> = startup.into_iter().map(Effect::Session).collect();
        effects.push(Effect::ConsumeMailbox);
        let tasks: Vec<Task<Message>> = effects
            .into_iter()
            .map(|effect| app.run_effect(effect))
            .collect();
        (app, Task::batch(tasks))
    }
}
