//! One-shot transfer of externally selected text into the panel.
//!
//! A visible panel receives the payload directly. Otherwise it is parked in
//! durable storage under `textToTranslate` and taken exactly once on the next
//! activation.

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const HANDOFF_KEY: &str = "textToTranslate";
pub const TRANSLATE_ACTION: &str = "translate-text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffPayload {
    pub text: String,
}

/// Wire shape of a message sent to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub action: String,
    #[serde(default)]
    pub text: String,
}

impl InboundMessage {
    pub fn translate(text: impl Into<String>) -> Self {
        Self {
            action: TRANSLATE_ACTION.to_string(),
            text: text.into(),
        }
    }

    pub fn into_payload(self) -> Option<HandoffPayload> {
        if self.action != TRANSLATE_ACTION || self.text.is_empty() {
            return None;
        }
        Some(HandoffPayload { text: self.text })
    }
}

/// Parse one newline-delimited JSON message; anything else is ignored.
pub fn parse_inbound(line: &str) -> Option<HandoffPayload> {
    match serde_json::from_str::<InboundMessage>(line.trim()) {
        Ok(message) => {
            let action = message.action.clone();
            let payload = message.into_payload();
            if payload.is_none() {
                debug!(%action, "Ignoring inbound message");
            }
            payload
        }
        Err(err) => {
            debug!("Ignoring unparsable inbound message: {err}");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Direct(HandoffPayload),
    Stored,
}

#[derive(Debug, Clone)]
pub struct Mailbox<S> {
    store: S,
}

impl<S: KeyValueStore> Mailbox<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn put(&self, payload: &HandoffPayload) -> Result<(), StorageError> {
        self.store.put(HANDOFF_KEY, payload)?;
        info!(chars = payload.text.chars().count(), "Stored handoff for next activation");
        Ok(())
    }

    /// Route a payload: hand it straight back for a visible panel, park it otherwise.
    pub fn post(&self, payload: HandoffPayload, visible: bool) -> Result<Delivery, StorageError> {
        if visible {
            return Ok(Delivery::Direct(payload));
        }
        self.put(&payload)?;
        Ok(Delivery::Stored)
    }

    /// Remove and return the parked payload. It is only returned once the
    /// stored copy is gone, so it can never be replayed.
    pub fn take(&self) -> Result<Option<HandoffPayload>, StorageError> {
        let Some(payload) = self.store.get::<HandoffPayload>(HANDOFF_KEY)? else {
            return Ok(None);
        };
        self.store.remove(HANDOFF_KEY)?;
        info!(chars = payload.text.chars().count(), "Consumed stored handoff");
        Ok(Some(payload))
    }

    pub fn take_if_visible(&self, visible: bool) -> Result<Option<HandoffPayload>, StorageError> {
        if !visible {
            return Ok(None);
        }
        self.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;

    fn payload(text: &str) -> HandoffPayload {
        HandoffPayload {
            text: text.to_string(),
        }
    }

    #[test]
    fn hidden_panel_payload_is_consumed_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = Mailbox::new(FileStore::toml(dir.path()));

        let delivery = mailbox.post(payload("bonjour"), false).unwrap();
        assert_eq!(delivery, Delivery::Stored);
        assert_eq!(mailbox.take_if_visible(false).unwrap(), None);

        let reopened = Mailbox::new(FileStore::toml(dir.path()));
        assert_eq!(
            reopened.take_if_visible(true).unwrap(),
            Some(payload("bonjour"))
        );
        assert_eq!(reopened.take_if_visible(true).unwrap(), None);
    }

    #[test]
    fn visible_panel_bypasses_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mailbox = Mailbox::new(FileStore::toml(dir.path()));

        let delivery = mailbox.post(payload("hola"), true).unwrap();

        assert_eq!(delivery, Delivery::Direct(payload("hola")));
        assert_eq!(mailbox.take().unwrap(), None);
    }

    #[test]
    fn inbound_parsing_accepts_only_translate_action() {
        assert_eq!(
            parse_inbound(r#"{"action":"translate-text","text":"bonjour"}"#),
            Some(payload("bonjour"))
        );
        assert_eq!(parse_inbound(r#"{"action":"open","text":"bonjour"}"#), None);
        assert_eq!(parse_inbound(r#"{"action":"translate-text","text":""}"#), None);
        assert_eq!(parse_inbound(r#"{"action":"translate-text"}"#), None);
        assert_eq!(parse_inbound("garbage"), None);
    }

    #[test]
    fn translate_message_round_trips_through_parser() {
        let line = serde_json::to_string(&InboundMessage::translate("guten tag")).unwrap();
        assert_eq!(parse_inbound(&line), Some(payload("guten tag")));
    }
}
