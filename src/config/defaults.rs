use super::models::LogLevel;
use lingva_core::DEFAULT_API_ORIGIN;

pub(crate) fn default_api_origin() -> String {
    DEFAULT_API_ORIGIN.to_string()
}

pub(crate) fn default_debounce_ms() -> u64 {
    500
}

pub(crate) fn default_fallback_target_lang() -> String {
    "en".to_string()
}

pub(crate) fn default_handoff_port() -> u16 {
    47615
}

pub(crate) fn default_data_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_window_width() -> f32 {
    420.0
}

pub(crate) fn default_window_height() -> f32 {
    720.0
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}
