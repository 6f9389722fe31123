//! Internal payload deserialization structs
//!
//! Wire shape of one decoded `data:` payload:
//! `{"event": "<kind>", "data": {"token": "...", "node": "...", ...}}`.
//! The `data` object is absent for event kinds that carry no payload, and
//! unknown fields are ignored.

use serde::Deserialize;

/// Event kind that carries an incremental output token.
pub(crate) const EVENT_CHAT_MODEL_STREAM: &str = "on_chat_model_stream";

/// Event kind announcing which graph node starts producing output.
pub(crate) const EVENT_CHAIN_START: &str = "on_chain_start";

/// Envelope around one streamed event.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventEnvelope {
    /// Discriminator for the event kind.
    pub event: String,
    /// Kind-specific payload; absent for bare events.
    #[serde(default)]
    pub data: Option<EventPayload>,
}

/// Payload fields this client consumes. Extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct EventPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
}
