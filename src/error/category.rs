//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling, recovery strategies, and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Categories enable consistent:
/// - Retry policies (transient vs. permanent errors)
/// - User messaging (technical vs. user-actionable)
/// - Recovery strategies (automatic vs. manual intervention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, timeout, transport).
    /// Generally transient and retryable.
    Network,

    /// Authentication/authorization errors.
    /// Require re-authentication.
    Auth,

    /// Backend/server-side errors (HTTP 5xx, service unavailable).
    /// Generally transient and retryable after delay.
    Server,

    /// User action required (busy state, invalid input).
    /// Not retryable until the user takes corrective action.
    User,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Try signing out and signing back in",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::User => "Please wait or check your input and try again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Network.as_str(), "network");
        assert_eq!(ErrorCategory::Auth.as_str(), "auth");
        assert_eq!(ErrorCategory::Server.as_str(), "server");
        assert_eq!(ErrorCategory::User.as_str(), "user");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Auth), "auth");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("internet"));
        assert!(ErrorCategory::Auth.recovery_hint().contains("signing"));
        assert!(ErrorCategory::Server.recovery_hint().contains("try again"));
    }
}
