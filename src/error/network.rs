//! Network-related error types.
//!
//! This module defines errors that occur while opening the streaming request
//! or reading its response body.

use std::fmt;

/// Network-specific error variants.
///
/// These errors represent transport failures: the stream could not be opened,
/// the server answered with a non-2xx status, or the body failed mid-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String, message: String },

    /// HTTP status error (non-2xx response other than 401/403).
    HttpStatus { status: u16, message: String },

    /// The response body failed while being read.
    Io { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                // Retry server errors and some specific client errors
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::Io { .. } => true,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { operation, .. } => {
                format!(
                    "The {} operation timed out. The server may be slow or unreachable.",
                    operation
                )
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please try again.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!(
                    "The server returned an error (HTTP {}). Please try again.",
                    status
                ),
            },
            NetworkError::Io { .. } => {
                "The connection was interrupted while receiving the response.".to_string()
            }
            NetworkError::Other { message } => {
                format!("Network error: {}", message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::Io { .. } => "E_NET_IO",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation, message } => {
                write!(f, "{} timed out: {}", operation, message)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::Io { message } => {
                write!(f, "Response body error: {}", message)
            }
            NetworkError::Other { message } => {
                write!(f, "Network error: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}
