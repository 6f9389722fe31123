//! The conversation state machine
//!
//! All mutable state of one conversation lives in `ConversationState` and is
//! transitioned only through the methods below, so inconsistent combinations
//! of status, buffer, and node indicator cannot be represented. The
//! invariant maintained throughout: `history` only ever gains complete
//! messages; a stream that fails mid-flight never contributes a partial
//! assistant message.

use crate::error::StateError;
use crate::models::Message;
use crate::sse::StreamEvent;

/// Status of the conversation's single logical stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationStatus {
    /// No stream in flight.
    #[default]
    Idle,
    /// A stream is in flight; tokens accumulate in the buffer.
    Streaming,
    /// The last stream failed; cleared by `acknowledge_error`.
    Error,
}

/// State of one conversation instance.
///
/// Created once per active session and mutated only by the transition
/// methods, in response to stream events and stream termination.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    history: Vec<Message>,
    streaming_buffer: String,
    current_node: Option<String>,
    status: ConversationStatus,
}

impl ConversationState {
    /// Create a new idle conversation state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The completed messages, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Assistant output accumulated by the in-flight stream.
    pub fn streaming_buffer(&self) -> &str {
        &self.streaming_buffer
    }

    /// Label of the backend stage currently producing output, if any.
    pub fn current_node(&self) -> Option<&str> {
        self.current_node.as_deref()
    }

    /// Current stream status.
    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// Whether a stream is currently in flight.
    pub fn is_streaming(&self) -> bool {
        self.status == ConversationStatus::Streaming
    }

    /// Start a new query: appends the user message and enters streaming.
    ///
    /// Rejected with `StateError::Busy` unless the state is idle; callers
    /// must block new submissions while a stream is in flight.
    pub fn begin_query(&mut self, query: &str) -> Result<(), StateError> {
        if self.status != ConversationStatus::Idle {
            return Err(StateError::Busy);
        }
        self.history.push(Message::user(query));
        self.streaming_buffer.clear();
        self.current_node = None;
        self.status = ConversationStatus::Streaming;
        Ok(())
    }

    /// Fold one decoded event into the state.
    ///
    /// Token deltas append to the buffer (an empty delta is a no-op), node
    /// transitions move the stage indicator, and unrecognized events leave
    /// the state untouched. Events arriving outside an active stream are
    /// dropped.
    pub fn apply(&mut self, event: StreamEvent) {
        if self.status != ConversationStatus::Streaming {
            tracing::debug!(
                event = event.event_type_name(),
                "dropping event received outside an active stream"
            );
            return;
        }
        match event {
            StreamEvent::TokenDelta { text } => {
                self.streaming_buffer.push_str(&text);
            }
            StreamEvent::NodeTransition { name } => {
                self.current_node = name;
            }
            StreamEvent::Unrecognized { .. } => {}
        }
    }

    /// Finalize a stream that ended normally.
    ///
    /// A non-empty buffer is flushed into a new assistant message; the
    /// buffer and node indicator are cleared and the state returns to idle.
    pub fn finish_stream(&mut self) {
        if self.status != ConversationStatus::Streaming {
            return;
        }
        if !self.streaming_buffer.is_empty() {
            let content = std::mem::take(&mut self.streaming_buffer);
            self.history.push(Message::assistant(content));
        }
        self.current_node = None;
        self.status = ConversationStatus::Idle;
    }

    /// Record a stream failure.
    ///
    /// The buffered partial output is discarded without appending any
    /// message; the state moves to `Error` until acknowledged.
    pub fn fail_stream(&mut self) {
        if self.status != ConversationStatus::Streaming {
            return;
        }
        self.streaming_buffer.clear();
        self.current_node = None;
        self.status = ConversationStatus::Error;
    }

    /// Clear the error status, returning to idle.
    pub fn acknowledge_error(&mut self) {
        if self.status == ConversationStatus::Error {
            self.status = ConversationStatus::Idle;
        }
    }

    /// Abort the in-flight stream without appending a partial message.
    pub fn cancel_stream(&mut self) {
        if self.status != ConversationStatus::Streaming {
            return;
        }
        self.streaming_buffer.clear();
        self.current_node = None;
        self.status = ConversationStatus::Idle;
    }

    /// Append a synthetic assistant message describing a failure.
    ///
    /// Kept separate from `fail_stream` so the failure path itself never
    /// appends anything derived from the discarded buffer.
    pub fn push_error_notice(&mut self, text: &str) {
        self.history.push(Message::assistant(text));
    }
}
