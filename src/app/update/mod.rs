mod core;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    Session(lingva_core::Effect),
    CopyToClipboard(String),
    ConsumeMailbox,
}
