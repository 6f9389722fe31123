//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures and helpers for exercising the
//! streaming pipeline end-to-end against mock adapters.

use std::sync::Arc;

use intellichat::adapters::mock::{InMemorySessionStore, MockHttpClient, StreamScript};
use intellichat::client::ChatClient;
use intellichat::session::{ChatSession, SessionGate};
use intellichat::traits::{ACCESS_TOKEN_KEY, USERNAME_KEY};

/// Build an SSE frame carrying one output token.
pub fn token_frame(token: &str) -> String {
    format!(
        "data: {{\"event\":\"on_chat_model_stream\",\"data\":{{\"token\":\"{}\"}}}}\n\n",
        token
    )
}

/// Build an SSE frame announcing a node transition.
pub fn node_frame(node: &str) -> String {
    format!(
        "data: {{\"event\":\"on_chain_start\",\"data\":{{\"node\":\"{}\"}}}}\n\n",
        node
    )
}

/// Split a wire stream into chunks of at most `size` bytes.
///
/// The inputs in these tests are ASCII, so any byte partition is a valid
/// text partition.
pub fn chunked(stream: &str, size: usize) -> Vec<String> {
    assert!(size > 0);
    stream
        .as_bytes()
        .chunks(size)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect()
}

/// A session store holding a valid test credential.
pub fn signed_in_store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::with_entries([
        (ACCESS_TOKEN_KEY, "test-access-token-12345"),
        (USERNAME_KEY, "test-user"),
    ]))
}

/// A chat session wired to the given mock, signed in, with its store
/// exposed for assertions.
pub fn test_session(mock: Arc<MockHttpClient>) -> (ChatSession, Arc<InMemorySessionStore>) {
    let store = signed_in_store();
    let client = ChatClient::with_base_url("http://test".to_string(), mock);
    let session = ChatSession::new(client, SessionGate::new(store.clone()));
    (session, store)
}

/// Queue a clean stream assembled from the given frames, pre-split into
/// chunks of `chunk_size` bytes.
pub fn enqueue_frames(mock: &MockHttpClient, frames: &[String], chunk_size: usize) {
    let stream: String = frames.concat();
    mock.enqueue(StreamScript::from_chunks(chunked(&stream, chunk_size)));
}
