//! Unified error handling for IntelliChat.
//!
//! This module provides the error architecture for the crate:
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Auth, Network, and State errors
//! - **Unified Error Type**: `ChatError` consolidates all error types
//! - **Result Type Alias**: `ChatResult<T>` for consistent return types
//!
//! # Example
//!
//! ```ignore
//! use intellichat::error::{ChatResult, ChatError};
//!
//! match session.submit("hello").await {
//!     Ok(outcome) => println!("{:?}", outcome),
//!     Err(err) => {
//!         eprintln!("Error: {}", err.user_message());
//!         if err.requires_reauth() {
//!             // route back to authentication
//!         }
//!     }
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, transport | Yes |
//! | Auth | Authentication issues | No |
//! | Server | Backend errors (5xx) | Yes |
//! | User | User action required | No |

mod auth;
mod category;
mod chat_error;
mod network;
mod result;
mod state;

// Re-export all public types
pub use auth::AuthError;
pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use network::NetworkError;
pub use result::ChatResult;
pub use state::StateError;
