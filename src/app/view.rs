use super::messages::Message;
use super::state::App;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, column, container, horizontal_space, pick_list, row, scrollable, text,
    text_editor,
};
use iced::{Element, Length};
use lingva_core::{CatalogStatus, Language};

const INPUT_HEIGHT: f32 = 160.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let controls = self.session.controls();
        let pair = self.session.pair();
        let catalog = self.session.catalog();

        let source_selector = language_selector(
            catalog.map(|c| c.source.as_slice()),
            catalog.and_then(|c| c.source_language(&pair.source)),
            &pair.source,
            controls.source_enabled,
            Message::SourceSelected,
        );
        let target_selector = language_selector(
            catalog.map(|c| c.target.as_slice()),
            catalog.and_then(|c| c.target_language(&pair.target)),
            &pair.target,
            controls.target_enabled,
            Message::TargetSelected,
        );
        let swap_button = button("Swap").on_press_maybe(
            controls
                .swap_enabled
                .then_some(Message::SwapLanguages),
        );
        let languages = row![source_selector, swap_button, target_selector]
            .spacing(8)
            .align_y(Vertical::Center);

        let mut editor = text_editor(&self.input)
            .placeholder("Enter text to translate")
            .height(Length::Fixed(INPUT_HEIGHT));
        if controls.input_enabled {
            editor = editor.on_action(Message::InputEdited);
        }

        let clear_button = button("Clear").on_press_maybe(
            controls.clear_enabled.then_some(Message::ClearText),
        );
        let copy_button = button("Copy").on_press_maybe(
            controls.copy_enabled.then_some(Message::CopyTranslation),
        );
        let mut actions = row![clear_button, copy_button]
            .spacing(8)
            .align_y(Vertical::Center);
        if controls.loading_indicator {
            actions = actions.push(horizontal_space()).push(text("Loading...").size(14));
        }

        let output = container(scrollable(text(controls.output).size(16)).height(Length::Fill))
            .padding(8)
            .width(Length::Fill)
            .height(Length::Fill);

        let catalog_notice = match self.session.catalog_status() {
            CatalogStatus::Loading => Some(row![text("Loading languages...").size(14)]),
            CatalogStatus::Unavailable(reason) => Some(
                row![
                    text(format!("Languages unavailable: {reason}")).size(14),
                    horizontal_space(),
                    button("Retry").on_press_maybe(
                        controls.retry_catalog.then_some(Message::RetryCatalog),
                    ),
                ]
                .spacing(8)
                .align_y(Vertical::Center),
            ),
            CatalogStatus::Ready(_) => None,
        };

        let content: Column<'_, Message> = column![languages]
            .push_maybe(catalog_notice)
            .push(editor)
            .push(actions)
            .push(output)
            .spacing(12)
            .padding(12);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// A pick list while selectable, otherwise a disabled button showing the
/// current choice so the row keeps its shape.
fn language_selector<'a>(
    options: Option<&'a [Language]>,
    selected: Option<&'a Language>,
    code: &str,
    enabled: bool,
    on_selected: fn(Language) -> Message,
) -> Element<'a, Message> {
    match options {
        Some(options) if enabled => pick_list(options, selected, on_selected)
            .width(Length::Fill)
            .into(),
        _ => {
            let label = selected
                .map(|language| language.display_name.clone())
                .unwrap_or_else(|| code.to_string());
            button(text(label)).width(Length::Fill).into()
        }
    }
}
