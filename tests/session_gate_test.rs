//! Integration tests for session gating, failure handling, and
//! cancellation.

mod common;

use std::sync::Arc;

use bytes::Bytes;
use common::{test_session, token_frame};
use intellichat::adapters::mock::{InMemorySessionStore, MockHttpClient, StreamScript};
use intellichat::client::ChatClient;
use intellichat::error::{AuthError, ChatError};
use intellichat::models::Role;
use intellichat::session::{ChatSession, SessionGate, SubmitOutcome};
use intellichat::sse::StreamEvent;
use intellichat::state::ConversationStatus;
use intellichat::traits::{HttpError, SessionStore, ACCESS_TOKEN_KEY, USERNAME_KEY};

/// Precondition failure: without a credential the stream is never opened.
#[tokio::test]
async fn missing_credential_prevents_network_call() {
    let mock = Arc::new(MockHttpClient::new());
    let client = ChatClient::with_base_url("http://test".to_string(), mock.clone());
    let store = Arc::new(InMemorySessionStore::new());
    let mut session = ChatSession::new(client, SessionGate::new(store));

    let err = session.submit("hello").await.err().unwrap();

    assert_eq!(err, ChatError::Auth(AuthError::NotAuthenticated));
    assert!(err.requires_reauth());
    assert_eq!(mock.request_count(), 0);
    assert!(session.state().history().is_empty());
    assert_eq!(session.state().status(), ConversationStatus::Idle);
}

/// Authorization failure: a 401 before any frame clears the stored session
/// and surfaces no synthetic notice.
#[tokio::test]
async fn unauthorized_clears_stored_session() {
    let mock = Arc::new(MockHttpClient::new());
    mock.enqueue(StreamScript::Status(401, String::new()));

    let (mut session, store) = test_session(mock);
    assert!(store.get(USERNAME_KEY).is_some());

    let err = session.submit("q").await.err().unwrap();

    assert_eq!(err, ChatError::Auth(AuthError::SessionExpired { status: 401 }));
    assert!(store.get(ACCESS_TOKEN_KEY).is_none());
    assert!(store.get(USERNAME_KEY).is_none());
    assert_eq!(session.state().history().len(), 1);
    assert_eq!(session.state().status(), ConversationStatus::Idle);
}

/// Error discard: a transport error after tokens were folded leaves no
/// partial assistant message, only the synthetic notice.
#[tokio::test]
async fn transport_error_discards_folded_tokens() {
    let mock = Arc::new(MockHttpClient::new());
    let chunks: Vec<Bytes> = (0..5)
        .map(|i| Bytes::from(token_frame(&format!("tok{} ", i))))
        .collect();
    mock.enqueue(StreamScript::ChunksThenError(
        chunks,
        HttpError::Io("broken pipe".to_string()),
    ));

    let (mut session, _store) = test_session(mock);
    let err = session.submit("q").await.err().unwrap();

    assert!(matches!(err, ChatError::Network(_)));
    assert!(session.state().streaming_buffer().is_empty());

    let history = session.state().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
    // The notice is fixed text, never derived from the discarded buffer
    assert!(!history[1].content.contains("tok0"));
}

/// A non-auth server rejection keeps the stored session but posts the
/// synthetic notice.
#[tokio::test]
async fn server_error_keeps_session_and_posts_notice() {
    let mock = Arc::new(MockHttpClient::new());
    mock.enqueue(StreamScript::Status(503, "maintenance".to_string()));

    let (mut session, store) = test_session(mock);
    let err = session.submit("q").await.err().unwrap();

    assert!(err.is_retryable());
    assert!(store.get(ACCESS_TOKEN_KEY).is_some());
    assert_eq!(session.state().history().len(), 2);
}

/// Cancellation: the byte source is released and the state returns to idle
/// without a partial message.
#[tokio::test]
async fn cancellation_releases_stream_without_partial_message() {
    let mock = Arc::new(MockHttpClient::new());
    // Two tokens arrive, then the body hangs until cancelled
    mock.enqueue(StreamScript::ChunksThenPending(vec![
        Bytes::from(token_frame("half ")),
        Bytes::from(token_frame("done")),
    ]));

    let (mut session, _store) = test_session(mock);
    let cancel = session.cancel_handle();

    let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
    session.set_observer(Box::new(move |event| {
        if let StreamEvent::TokenDelta { text } = event {
            let _ = seen_tx.send(text.clone());
        }
    }));

    let task = tokio::spawn(async move {
        let outcome = session.submit("q").await;
        (session, outcome)
    });

    // Wait until both tokens have been folded, then cancel
    assert_eq!(seen_rx.recv().await.unwrap(), "half ");
    assert_eq!(seen_rx.recv().await.unwrap(), "done");
    cancel.cancel();

    let (session, outcome) = task.await.unwrap();
    assert_eq!(outcome.unwrap(), SubmitOutcome::Cancelled);
    assert_eq!(session.state().status(), ConversationStatus::Idle);
    assert!(session.state().streaming_buffer().is_empty());
    // Only the user message survives
    assert_eq!(session.state().history().len(), 1);
    assert_eq!(session.state().history()[0].role, Role::User);
}

/// After a completed stream the session accepts the next query; histories
/// from both turns accumulate in order.
#[tokio::test]
async fn consecutive_submissions_accumulate_history() {
    let mock = Arc::new(MockHttpClient::new());
    mock.enqueue(StreamScript::from_chunks([token_frame("first answer")]));
    mock.enqueue(StreamScript::from_chunks([token_frame("second answer")]));

    let (mut session, _store) = test_session(mock);
    session.submit("one").await.unwrap();
    session.submit("two").await.unwrap();

    let history = session.state().history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].content, "one");
    assert_eq!(history[1].content, "first answer");
    assert_eq!(history[2].content, "two");
    assert_eq!(history[3].content, "second answer");
}

/// The bearer credential from the store is what reaches the wire.
#[tokio::test]
async fn stored_token_is_sent_as_bearer_header() {
    let mock = Arc::new(MockHttpClient::new());
    mock.enqueue(StreamScript::from_chunks(Vec::<String>::new()));

    let (mut session, _store) = test_session(mock.clone());
    session.submit("q").await.unwrap();

    let recorded = &mock.requests()[0];
    assert_eq!(
        recorded.headers.get("Authorization").map(String::as_str),
        Some("Bearer test-access-token-12345")
    );
}
