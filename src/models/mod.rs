//! Data model types shared across the crate.
//!
//! # Module structure
//! - `message` - Conversation messages (`Message`, `Role`)
//! - `request` - The streaming request body (`StreamRequest`)

mod message;
mod request;

pub use message::{Message, Role};
pub use request::StreamRequest;
