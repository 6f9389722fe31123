//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction over the streaming POST request,
//! enabling dependency injection and mocking in tests. The response body is
//! exposed as a stream of byte chunks: it ends with a terminal `None` and
//! may fail with a transport error at any point.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// A stream of raw response-body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// The server rejected the credential (401/403). No body is read.
    Unauthorized { status: u16 },
    /// Server returned a non-2xx error status (other than 401/403)
    ServerError { status: u16, message: String },
    /// IO error while reading the response body
    Io(String),
    /// Other error
    Other(String),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Unauthorized { status } => {
                write!(f, "Authorization rejected (HTTP {})", status)
            }
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for the streaming HTTP boundary.
///
/// Implementations include the production reqwest-based client and mock
/// clients for testing.
///
/// # Example
///
/// ```ignore
/// use intellichat::traits::{Headers, HttpClient};
///
/// async fn open<C: HttpClient>(client: &C) -> Result<(), HttpError> {
///     let mut chunks = client
///         .post_stream("https://api.example.com/stream", "{}", &Headers::new())
///         .await?;
///     // read chunks...
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body as a byte stream.
    ///
    /// The status line is checked before the stream is returned:
    /// 401/403 yield `HttpError::Unauthorized` without reading the body,
    /// and any other non-2xx status yields `HttpError::ServerError` with
    /// the body text as the message.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("timeout".to_string()).to_string(),
            "Connection failed: timeout"
        );
        assert_eq!(
            HttpError::Unauthorized { status: 401 }.to_string(),
            "Authorization rejected (HTTP 401)"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 500,
                message: "Internal Error".to_string()
            }
            .to_string(),
            "Server error (500): Internal Error"
        );
        assert_eq!(
            HttpError::Io("read failed".to_string()).to_string(),
            "IO error: read failed"
        );
        assert_eq!(
            HttpError::Other("unknown".to_string()).to_string(),
            "HTTP error: unknown"
        );
    }

    #[test]
    fn test_http_error_clone() {
        let err = HttpError::Unauthorized { status: 403 };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }

    #[test]
    fn test_http_error_implements_error_trait() {
        let err = HttpError::Timeout("30s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
