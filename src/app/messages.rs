use iced::widget::text_editor;
use lingva_core::{HandoffPayload, Language, LanguageCatalog, RequestToken, TranslateError};

/// Messages emitted by the UI and the background tasks it spawns.
#[derive(Debug, Clone)]
pub enum Message {
    InputEdited(text_editor::Action),
    SourceSelected(Language),
    TargetSelected(Language),
    SwapLanguages,
    ClearText,
    CopyTranslation,
    RetryCatalog,
    DebounceElapsed(RequestToken),
    TranslationFinished {
        token: RequestToken,
        result: Result<String, TranslateError>,
    },
    CatalogLoaded(Result<LanguageCatalog, String>),
    HandoffReceived(HandoffPayload),
    /// The window gained focus; anything parked in the mailbox is now ours.
    PanelActivated,
}
