//! One-conversation driver.
//!
//! `ChatSession` ties the pieces together: the gate authorizes, the client
//! opens the stream, and each decoded event is folded into the conversation
//! state strictly in arrival order. The model is single-threaded
//! cooperative: exactly one stream is in flight at a time, and chunk reads
//! are the only suspension points.

use tokio::sync::watch;
use uuid::Uuid;

use crate::client::ChatClient;
use crate::error::{ChatError, ChatResult};
use crate::models::StreamRequest;
use crate::session::gate::{GateSignal, SessionGate};
use crate::sse::StreamEvent;
use crate::state::ConversationState;

use futures_util::StreamExt;

/// Synthetic message surfaced in history when a stream fails in transport.
const STREAM_FAILURE_NOTICE: &str = "Sorry, I encountered an error. Please try again.";

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The stream ran to end-of-stream and the answer was finalized.
    Completed,
    /// The stream was cancelled; no partial message was kept.
    Cancelled,
}

/// Handle for cancelling an in-flight submission from another task.
#[derive(Clone)]
pub struct CancelHandle {
    tx: watch::Sender<u64>,
}

impl CancelHandle {
    /// Cancel the submission currently in flight. A cancellation issued
    /// while no stream is active has no effect.
    pub fn cancel(&self) {
        self.tx.send_modify(|n| *n = n.wrapping_add(1));
    }
}

/// Observer invoked for every decoded event before it is folded, letting an
/// embedding UI render incremental output without touching the state.
type EventObserver = Box<dyn Fn(&StreamEvent) + Send>;

/// Drives one conversation against the streaming backend.
pub struct ChatSession {
    state: ConversationState,
    client: ChatClient,
    gate: SessionGate,
    project_id: Uuid,
    cancel_tx: watch::Sender<u64>,
    observer: Option<EventObserver>,
}

impl ChatSession {
    /// Create a session over a client and gate.
    pub fn new(client: ChatClient, gate: SessionGate) -> Self {
        let (cancel_tx, _) = watch::channel(0);
        Self {
            state: ConversationState::new(),
            client,
            gate,
            project_id: Uuid::nil(),
            cancel_tx,
            observer: None,
        }
    }

    /// Scope subsequent queries to a project.
    pub fn set_project_id(&mut self, project_id: Uuid) {
        self.project_id = project_id;
    }

    /// Register an observer for decoded events.
    pub fn set_observer(&mut self, observer: EventObserver) {
        self.observer = Some(observer);
    }

    /// Handle for cancelling an in-flight submission.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// The conversation state.
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// The session gate.
    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Submit a query and drive the stream to completion.
    ///
    /// Control flow: authorize -> append user message -> open stream ->
    /// fold events in arrival order -> finalize. On transport failure the
    /// buffered partial output is discarded and a synthetic error notice is
    /// appended; on 401/403 the stored session is cleared instead and the
    /// caller should route to re-authentication. On cancellation the byte
    /// source is released and the state returns to idle with no partial
    /// message.
    pub async fn submit(&mut self, query: &str) -> ChatResult<SubmitOutcome> {
        let token = self.gate.authorize()?;
        self.state.begin_query(query)?;

        let request = StreamRequest::new(query).with_project_id(self.project_id);

        // Subscribing here marks earlier cancellations as seen, so the
        // handle only affects the submission now in flight.
        let mut cancel_rx = self.cancel_tx.subscribe();

        let mut events = match self.client.stream(&request, &token).await {
            Ok(events) => events,
            Err(err) => return Err(self.handle_stream_failure(err)),
        };

        loop {
            tokio::select! {
                biased;
                _ = cancel_rx.changed() => {
                    drop(events);
                    self.state.cancel_stream();
                    tracing::info!("stream cancelled; response body released");
                    return Ok(SubmitOutcome::Cancelled);
                }
                item = events.next() => match item {
                    Some(Ok(event)) => {
                        if let StreamEvent::Unrecognized { raw } = &event {
                            tracing::debug!(bytes = raw.len(), "dropping unrecognized stream event");
                        }
                        if let Some(observer) = &self.observer {
                            observer(&event);
                        }
                        self.state.apply(event);
                    }
                    Some(Err(err)) => {
                        drop(events);
                        return Err(self.handle_stream_failure(err));
                    }
                    None => {
                        self.state.finish_stream();
                        return Ok(SubmitOutcome::Completed);
                    }
                }
            }
        }
    }

    /// Common failure path: discard the buffer, then either clear the
    /// session (authorization failure) or surface a synthetic error notice
    /// (transport failure).
    fn handle_stream_failure(&mut self, err: ChatError) -> ChatError {
        tracing::warn!(code = err.error_code(), error = %err, "stream failed");
        self.state.fail_stream();
        self.state.acknowledge_error();

        if err.requires_reauth() {
            let GateSignal::Reauthenticate = self.gate.invalidate();
        } else {
            self.state.push_error_notice(STREAM_FAILURE_NOTICE);
        }
        err
    }
}
