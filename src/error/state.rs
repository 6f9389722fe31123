//! Conversation-state error types.
//!
//! These errors represent invalid transitions requested by the caller, such
//! as submitting a new query while a stream is already in flight.

use std::fmt;

/// State-transition error variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A stream is already in flight for this conversation. Exactly one
    /// stream may run at a time; callers must block new submissions while
    /// the state is streaming.
    Busy,
}

impl StateError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StateError::Busy => {
                "A response is still streaming. Please wait for it to finish.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StateError::Busy => "E_STATE_BUSY",
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Busy => write!(f, "A stream is already in flight"),
        }
    }
}

impl std::error::Error for StateError {}
