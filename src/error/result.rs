//! Result type alias for IntelliChat operations.

use super::chat_error::ChatError;

/// Type alias for Results using ChatError.
///
/// Use this type for functions that can fail with any chat-related error.
///
/// # Example
///
/// ```ignore
/// use intellichat::error::ChatResult;
///
/// async fn run_query(query: &str) -> ChatResult<()> {
///     // Implementation that may return various error types
///     Ok(())
/// }
/// ```
pub type ChatResult<T> = Result<T, ChatError>;
