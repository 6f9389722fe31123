//! Streaming API client.
//!
//! This module provides the HTTP client for the IntelliAgent backend's
//! streaming endpoint. It opens the authorized POST request, checks the
//! status line, and exposes the response body as a pull-based stream of
//! decoded events: bytes are reassembled into frames across chunk
//! boundaries, and each frame is decoded tolerantly.

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::{AuthError, ChatError, NetworkError};
use crate::models::StreamRequest;
use crate::sse::{decode_frame, FrameSplitter, StreamEvent};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Default base URL for the IntelliAgent backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path of the streaming chat endpoint.
const STREAM_PATH: &str = "/api/v1/chat/stream";

/// A pull-based stream of decoded events.
///
/// `Err` items are transport failures only; decode failures surface as
/// `StreamEvent::Unrecognized` and never abort the stream.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, ChatError>> + Send>>;

/// Client for the IntelliAgent streaming API.
pub struct ChatClient {
    /// Base URL for the backend
    base_url: String,
    /// Injected HTTP boundary
    http: Arc<dyn HttpClient>,
}

impl ChatClient {
    /// Create a client against the default base URL.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), http)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: String, http: Arc<dyn HttpClient>) -> Self {
        Self { base_url, http }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Open the streaming request and return the decoded event stream.
    ///
    /// Sends `POST {base_url}/api/v1/chat/stream` with the bearer token.
    /// A 401/403 before any frame is seen maps to
    /// `AuthError::SessionExpired`; other failures to open map to
    /// `NetworkError`. Once open, frames are decoded and yielded strictly
    /// in byte-arrival order.
    pub async fn stream(
        &self,
        request: &StreamRequest,
        token: &str,
    ) -> Result<EventStream, ChatError> {
        let url = format!("{}{}", self.base_url, STREAM_PATH);

        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: format!("could not encode request body: {}", e),
        })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));

        let bytes = self
            .http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(|e| map_http_error(e, &url))?;

        Ok(decode_byte_stream(bytes, url))
    }
}

/// Fold state threaded through the unfold below.
struct StreamFold {
    bytes: ByteStream,
    splitter: FrameSplitter,
    pending: VecDeque<String>,
    url: String,
    done: bool,
}

/// Turn a raw byte stream into a stream of decoded events.
///
/// Complete frames are emitted in arrival order; an incomplete trailing
/// fragment at end-of-stream is discarded with a truncation warning.
fn decode_byte_stream(bytes: ByteStream, url: String) -> EventStream {
    let fold = StreamFold {
        bytes,
        splitter: FrameSplitter::new(),
        pending: VecDeque::new(),
        url,
        done: false,
    };

    let events = stream::unfold(fold, |mut fold| async move {
        loop {
            // Drain frames completed by previous chunks first
            if let Some(frame) = fold.pending.pop_front() {
                let event = match decode_frame(&frame) {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::debug!(error = %err, "skipping undecodable frame");
                        StreamEvent::Unrecognized { raw: frame }
                    }
                };
                return Some((Ok(event), fold));
            }

            if fold.done {
                return None;
            }

            match fold.bytes.next().await {
                Some(Ok(chunk)) => match std::str::from_utf8(&chunk) {
                    Ok(text) => fold.pending.extend(fold.splitter.push(text)),
                    Err(err) => {
                        tracing::debug!(error = %err, "skipping non-UTF-8 chunk");
                    }
                },
                Some(Err(err)) => {
                    fold.done = true;
                    let mapped = map_http_error(err, &fold.url);
                    return Some((Err(mapped), fold));
                }
                None => {
                    fold.done = true;
                    if let Some(fragment) = fold.splitter.finish() {
                        tracing::warn!(
                            discarded_bytes = fragment.len(),
                            "stream ended mid-frame; discarding truncated fragment"
                        );
                    }
                }
            }
        }
    });

    Box::pin(events)
}

/// Map a boundary-level HTTP error into the unified error type.
fn map_http_error(err: HttpError, url: &str) -> ChatError {
    match err {
        HttpError::Unauthorized { status } => ChatError::Auth(AuthError::SessionExpired { status }),
        HttpError::ConnectionFailed(message) => ChatError::Network(NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        }),
        HttpError::Timeout(message) => ChatError::Network(NetworkError::Timeout {
            operation: "chat stream".to_string(),
            message,
        }),
        HttpError::ServerError { status, message } => {
            ChatError::Network(NetworkError::HttpStatus { status, message })
        }
        HttpError::Io(message) => ChatError::Network(NetworkError::Io { message }),
        HttpError::Other(message) => ChatError::Network(NetworkError::Other { message }),
    }
}
