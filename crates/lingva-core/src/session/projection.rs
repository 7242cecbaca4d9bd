use super::CatalogStatus;
use crate::model::{LanguagePair, UiState};

pub const LOADING_PLACEHOLDER: &str = "Translating...";
pub const ERROR_PREFIX: &str = "Error fetching translation.";

/// Enabled flags and visible text for every panel control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub loading_indicator: bool,
    pub input_enabled: bool,
    pub source_enabled: bool,
    pub target_enabled: bool,
    pub swap_enabled: bool,
    pub copy_enabled: bool,
    pub clear_enabled: bool,
    pub retry_catalog: bool,
    pub output: String,
}

pub(super) fn project(
    ui: &UiState,
    pair: &LanguagePair,
    catalog: &CatalogStatus,
    output: &str,
    output_is_text: bool,
) -> ControlState {
    let loading = ui.is_loading();
    let interactive = !loading && matches!(catalog, CatalogStatus::Ready(_));

    ControlState {
        loading_indicator: loading,
        input_enabled: interactive,
        source_enabled: interactive,
        target_enabled: interactive,
        // Swapping out of detection would need the detected language.
        swap_enabled: interactive && !pair.is_auto_source(),
        copy_enabled: !loading && output_is_text && !output.is_empty(),
        clear_enabled: true,
        retry_catalog: matches!(catalog, CatalogStatus::Unavailable(_)),
        output: output.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AUTO, LanguageCatalog, RequestToken, TranslationRequest};

    fn ready() -> CatalogStatus {
        CatalogStatus::Ready(LanguageCatalog::default())
    }

    fn loading_state(pair: &LanguagePair) -> UiState {
        UiState::Loading(TranslationRequest {
            text: "hello".to_string(),
            pair: pair.clone(),
            token: RequestToken(1),
        })
    }

    #[test]
    fn loading_disables_everything_but_clear() {
        let pair = LanguagePair::new("en", "es");
        let controls = project(&loading_state(&pair), &pair, &ready(), LOADING_PLACEHOLDER, false);

        assert!(controls.loading_indicator);
        assert!(controls.clear_enabled);
        assert!(!controls.input_enabled);
        assert!(!controls.source_enabled);
        assert!(!controls.target_enabled);
        assert!(!controls.swap_enabled);
        assert!(!controls.copy_enabled);
        assert_eq!(controls.output, LOADING_PLACEHOLDER);
    }

    #[test]
    fn success_reenables_controls() {
        let pair = LanguagePair::new("en", "es");
        let controls = project(
            &UiState::Success("hola".to_string()),
            &pair,
            &ready(),
            "hola",
            true,
        );

        assert!(!controls.loading_indicator);
        assert!(controls.input_enabled);
        assert!(controls.swap_enabled);
        assert!(controls.copy_enabled);
    }

    #[test]
    fn swap_follows_auto_source_independently() {
        let pair = LanguagePair::new(AUTO, "es");
        let controls = project(&UiState::Idle, &pair, &ready(), "", false);
        assert!(controls.source_enabled);
        assert!(!controls.swap_enabled);
    }

    #[test]
    fn unavailable_catalog_blocks_translation_controls() {
        let pair = LanguagePair::new("en", "es");
        let status = CatalogStatus::Unavailable("HTTP error! status: 503".to_string());
        let controls = project(&UiState::Idle, &pair, &status, "", false);

        assert!(!controls.input_enabled);
        assert!(!controls.source_enabled);
        assert!(!controls.swap_enabled);
        assert!(controls.clear_enabled);
        assert!(controls.retry_catalog);
    }
}
