//! Conversation state management.
//!
//! # Module structure
//! - `conversation` - The conversation state machine (`ConversationState`)

mod conversation;

pub use conversation::{ConversationState, ConversationStatus};
