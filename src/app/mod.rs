mod messages;
mod state;
mod update;
mod view;

pub use messages::Message;
pub use state::App;

use crate::config::{AppConfig, ThemeMode};
use crate::services::Services;
use iced::{Size, Theme, window};

/// Launch the panel window.
pub fn run_app(config: AppConfig, services: Services) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        min_size: Some(Size::new(320.0, 400.0)),
        ..window::Settings::default()
    };

    iced::application("Translate", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, services))
}
