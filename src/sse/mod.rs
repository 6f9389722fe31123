//! SSE (Server-Sent Events) stream processing
//!
//! Parses the SSE format emitted by the IntelliAgent streaming API. Each
//! event is a text block whose payload line is `data: <json>`, and events
//! are separated by a blank line (two consecutive line terminators).
//!
//! # Module structure
//! - `events` - Event type definitions (`StreamEvent` enum, `DecodeError`)
//! - `payloads` - Internal payload deserialization structs
//! - `splitter` - Chunk-boundary-safe frame reassembly (`FrameSplitter`)
//! - `decoder` - Frame-to-event decoding (`decode_frame`)

mod decoder;
mod events;
mod payloads;
mod splitter;

// Re-export public types
pub use decoder::decode_frame;
pub use events::{DecodeError, StreamEvent};
pub use splitter::FrameSplitter;
