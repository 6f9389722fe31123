//! Frame-to-event decoding
//!
//! Decodes one complete frame into a typed `StreamEvent`. Decoding is
//! tolerant: unknown event kinds and frames without a payload line map to
//! `StreamEvent::Unrecognized`, and malformed JSON is reported as a
//! `DecodeError` the caller downgrades to `Unrecognized` as well. A bad
//! frame never aborts processing of subsequent frames.

use crate::sse::events::{DecodeError, StreamEvent};
use crate::sse::payloads::{EventEnvelope, EVENT_CHAIN_START, EVENT_CHAT_MODEL_STREAM};

/// Decode one frame into a `StreamEvent`.
///
/// Only lines beginning with the `data:` field prefix carry payload;
/// multiple `data:` lines are joined with `\n` per the SSE convention.
/// Returns:
/// - `Ok(TokenDelta)` for `on_chat_model_stream` (an absent or empty token
///   is an empty delta, still emitted)
/// - `Ok(NodeTransition)` for `on_chain_start` (an absent node clears the
///   indicator)
/// - `Ok(Unrecognized)` for any other kind, or a frame with no `data:` line
/// - `Err(DecodeError)` if the payload is not structurally valid JSON
pub fn decode_frame(frame: &str) -> Result<StreamEvent, DecodeError> {
    let mut data_lines = Vec::new();
    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.trim());
        }
    }

    if data_lines.is_empty() {
        return Ok(StreamEvent::Unrecognized {
            raw: frame.to_string(),
        });
    }

    let payload = data_lines.join("\n");
    let envelope: EventEnvelope =
        serde_json::from_str(&payload).map_err(|e| DecodeError::InvalidJson {
            message: e.to_string(),
        })?;

    let event = match envelope.event.as_str() {
        EVENT_CHAT_MODEL_STREAM => StreamEvent::TokenDelta {
            text: envelope
                .data
                .and_then(|data| data.token)
                .unwrap_or_default(),
        },
        EVENT_CHAIN_START => StreamEvent::NodeTransition {
            name: envelope.data.and_then(|data| data.node),
        },
        other => {
            tracing::debug!(event = other, "ignoring unknown stream event kind");
            StreamEvent::Unrecognized {
                raw: frame.to_string(),
            }
        }
    };

    Ok(event)
}
