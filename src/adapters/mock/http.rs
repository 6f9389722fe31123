//! Mock HTTP client with scripted streaming responses.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// One scripted response for a `post_stream` call.
#[derive(Debug, Clone)]
pub enum StreamScript {
    /// 200 with the given body chunks, then clean end-of-stream.
    Chunks(Vec<Bytes>),
    /// 200 with the given chunks, then a mid-stream transport error.
    ChunksThenError(Vec<Bytes>, HttpError),
    /// 200 with the given chunks, then a body that never completes.
    /// Used to test cancellation while a stream is in flight.
    ChunksThenPending(Vec<Bytes>),
    /// A non-2xx status before any frame is seen.
    Status(u16, String),
}

impl StreamScript {
    /// Script a clean stream from string chunks.
    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StreamScript::Chunks(
            chunks
                .into_iter()
                .map(|c| Bytes::from(c.into()))
                .collect(),
        )
    }
}

/// A request observed by the mock, for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
    pub headers: Headers,
}

/// HTTP client mock that replays scripted responses in order.
///
/// # Example
///
/// ```ignore
/// let http = MockHttpClient::new();
/// http.enqueue(StreamScript::from_chunks(["data: ...\n\n"]));
/// ```
#[derive(Debug, Default)]
pub struct MockHttpClient {
    scripts: Mutex<VecDeque<StreamScript>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next scripted response.
    pub fn enqueue(&self, script: StreamScript) {
        self.scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(script);
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                url: url.to_string(),
                body: body.to_string(),
                headers: headers.clone(),
            });

        let script = self
            .scripts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| HttpError::Other("no scripted response".to_string()))?;

        match script {
            StreamScript::Chunks(chunks) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                Ok(Box::pin(stream::iter(items)))
            }
            StreamScript::ChunksThenError(chunks, err) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(err)))
                    .collect();
                Ok(Box::pin(stream::iter(items)))
            }
            StreamScript::ChunksThenPending(chunks) => {
                let items: Vec<Result<Bytes, HttpError>> = chunks.into_iter().map(Ok).collect();
                Ok(Box::pin(stream::iter(items).chain(stream::pending())))
            }
            StreamScript::Status(status, message) => {
                if status == 401 || status == 403 {
                    Err(HttpError::Unauthorized { status })
                } else {
                    Err(HttpError::ServerError { status, message })
                }
            }
        }
    }
}
