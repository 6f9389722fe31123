//! Unified error type for IntelliChat.
//!
//! This module defines the main `ChatError` enum that unifies all error types
//! in the crate, providing consistent handling, categorization, and user
//! messaging.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use super::state::StateError;

/// Unified error type for IntelliChat operations.
///
/// `ChatError` consolidates all domain-specific error types into a single
/// enum, enabling:
/// - Consistent error handling across the crate
/// - Uniform categorization and retry logic
/// - User-friendly error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Network/transport errors (connections, HTTP, timeouts).
    Network(NetworkError),

    /// Authentication/authorization errors.
    Auth(AuthError),

    /// Conversation state-transition errors.
    State(StateError),
}

impl ChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => {
                    ErrorCategory::Server
                }
                _ => ErrorCategory::Network,
            },
            ChatError::Auth(_) => ErrorCategory::Auth,
            ChatError::State(_) => ErrorCategory::User,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Network(err) => err.is_retryable(),
            ChatError::Auth(_) => false,
            ChatError::State(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Network(err) => err.user_message(),
            ChatError::Auth(err) => err.user_message(),
            ChatError::State(err) => err.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Network(err) => err.error_code(),
            ChatError::Auth(err) => err.error_code(),
            ChatError::State(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Check if this error requires re-authentication.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ChatError::Auth(err) => err.requires_reauth(),
            _ => false,
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(err) => write!(f, "{}", err),
            ChatError::Auth(err) => write!(f, "{}", err),
            ChatError::State(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatError::Network(err) => Some(err),
            ChatError::Auth(err) => Some(err),
            ChatError::State(err) => Some(err),
        }
    }
}

impl From<NetworkError> for ChatError {
    fn from(err: NetworkError) -> Self {
        ChatError::Network(err)
    }
}

impl From<AuthError> for ChatError {
    fn from(err: AuthError) -> Self {
        ChatError::Auth(err)
    }
}

impl From<StateError> for ChatError {
    fn from(err: StateError) -> Self {
        ChatError::State(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let err: ChatError = NetworkError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);

        let err: ChatError = NetworkError::ConnectionFailed {
            url: "test".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Network);

        let err: ChatError = AuthError::SessionExpired { status: 401 }.into();
        assert_eq!(err.category(), ErrorCategory::Auth);

        let err: ChatError = StateError::Busy.into();
        assert_eq!(err.category(), ErrorCategory::User);
    }

    #[test]
    fn test_requires_reauth() {
        let err: ChatError = AuthError::SessionExpired { status: 403 }.into();
        assert!(err.requires_reauth());

        let err: ChatError = NetworkError::Other {
            message: "boom".to_string(),
        }
        .into();
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;
        let err: ChatError = AuthError::NotAuthenticated.into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_recovery_hint_follows_category() {
        let err: ChatError = StateError::Busy.into();
        assert_eq!(err.recovery_hint(), ErrorCategory::User.recovery_hint());
    }
}
