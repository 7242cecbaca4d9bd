use serde::{Deserialize, Serialize};

/// Source code asking the service to detect the input language.
pub const AUTO: &str = "auto";

/// Which side of the language list endpoint a catalog half came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageKind {
    Source,
    Target,
}

impl LanguageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageKind::Source => "source",
            LanguageKind::Target => "target",
        }
    }
}

impl std::fmt::Display for LanguageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A supported language as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.code == AUTO
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Both language lists, already in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageCatalog {
    pub source: Vec<Language>,
    pub target: Vec<Language>,
}

impl LanguageCatalog {
    pub fn source_language(&self, code: &str) -> Option<&Language> {
        self.source.iter().find(|lang| lang.code == code)
    }

    pub fn target_language(&self, code: &str) -> Option<&Language> {
        self.target.iter().find(|lang| lang.code == code)
    }
}

/// The active source/target selection. `target` is never [`AUTO`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn is_auto_source(&self) -> bool {
        self.source == AUTO
    }

    /// Exchanged pair, or `None` when the source is still being detected.
    pub fn swapped(&self) -> Option<LanguagePair> {
        if self.is_auto_source() {
            return None;
        }
        Some(LanguagePair {
            source: self.target.clone(),
            target: self.source.clone(),
        })
    }
}

/// Handle identifying one scheduled translation. Later tokens compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub pair: LanguagePair,
    pub token: RequestToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Pending(String),
    Loading(TranslationRequest),
    Success(String),
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_refused_for_detected_source() {
        let pair = LanguagePair::new(AUTO, "es");
        assert_eq!(pair.swapped(), None);
    }

    #[test]
    fn swapping_twice_restores_pair() {
        let pair = LanguagePair::new("en", "es");
        let twice = pair.swapped().and_then(|p| p.swapped());
        assert_eq!(twice, Some(pair));
    }

    #[test]
    fn language_deserializes_from_service_shape() {
        let lang: Language = serde_json::from_str(r#"{"code":"de","name":"German"}"#).unwrap();
        assert_eq!(lang, Language::new("de", "German"));
        assert_eq!(lang.to_string(), "German");
    }
}
