//! SSE event types and definitions
//!
//! Contains the `StreamEvent` enum with the event variants the IntelliAgent
//! streaming API emits, and the decoder's error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed events decoded from the streaming API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// One incremental fragment of assistant output. An empty `text` is a
    /// valid no-op delta and is still emitted.
    TokenDelta { text: String },
    /// Which backend processing stage is producing the next output.
    /// Informational only; `None` clears the indicator.
    NodeTransition { name: Option<String> },
    /// A frame whose tag or payload was not understood. Carried for
    /// diagnostics, never folded into content.
    Unrecognized { raw: String },
}

impl StreamEvent {
    /// Returns the event type name as a string for logging purposes.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            StreamEvent::TokenDelta { .. } => "token_delta",
            StreamEvent::NodeTransition { .. } => "node_transition",
            StreamEvent::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Frame decoding errors.
///
/// These never abort the stream: the caller downgrades the offending frame
/// to `StreamEvent::Unrecognized` and continues with the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The `data:` payload was not valid JSON of the expected shape.
    InvalidJson { message: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidJson { message } => {
                write!(f, "Invalid JSON in event payload: {}", message)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
