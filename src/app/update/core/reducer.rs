use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::widget::text_editor;
use lingva_core::Event;
use tracing::{debug, info};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::InputEdited(action) => self.handle_input_edited(action, &mut effects),
            Message::SourceSelected(language) => {
                self.dispatch(Event::SourceSelected(language.code), &mut effects)
            }
            Message::TargetSelected(language) => {
                self.dispatch(Event::TargetSelected(language.code), &mut effects)
            }
            Message::SwapLanguages => self.dispatch(Event::Swap, &mut effects),
            Message::ClearText => self.dispatch(Event::Clear, &mut effects),
            Message::CopyTranslation => self.handle_copy_translation(&mut effects),
            Message::RetryCatalog => self.dispatch(Event::RetryCatalog, &mut effects),
            Message::DebounceElapsed(token) => {
                self.dispatch(Event::DebounceElapsed(token), &mut effects)
            }
            Message::TranslationFinished { token, result } => {
                if self.in_flight.as_ref().is_some_and(|f| f.token == token) {
                    self.in_flight = None;
                }
                self.dispatch(Event::TranslationFinished { token, result }, &mut effects);
            }
            Message::CatalogLoaded(result) => {
                self.dispatch(Event::CatalogLoaded(result), &mut effects)
            }
            Message::HandoffReceived(payload) => {
                info!(
                    chars = payload.text.chars().count(),
                    "Received text from another context"
                );
                self.dispatch(Event::Handoff(payload), &mut effects);
            }
            Message::PanelActivated => effects.push(Effect::ConsumeMailbox),
        }

        effects
    }

    fn dispatch(&mut self, event: Event, effects: &mut Vec<Effect>) {
        effects.extend(self.session.handle(event).into_iter().map(Effect::Session));
    }

    fn handle_input_edited(&mut self, action: text_editor::Action, effects: &mut Vec<Effect>) {
        let is_edit = action.is_edit();
        if is_edit && !self.session.controls().input_enabled {
            debug!("Ignoring edit while input is locked");
            return;
        }
        self.input.perform(action);
        if is_edit {
            let text = editor_text(&self.input);
            self.dispatch(Event::InputChanged(text), effects);
        }
    }

    fn handle_copy_translation(&mut self, effects: &mut Vec<Effect>) {
        if !self.session.controls().copy_enabled {
            return;
        }
        effects.push(Effect::CopyToClipboard(self.session.output().to_string()));
    }
}

/// Editor contents without the trailing newline the widget always reports.
pub(super) fn editor_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_text_drops_widget_newline() {
        let content = text_editor::Content::with_text("hola\nmundo");
        assert_eq!(editor_text(&content), "hola\nmundo");
        assert_eq!(editor_text(&text_editor::Content::new()), "");
    }
}
