//! IntelliChat - a streaming chat client for the IntelliAgent backend
//!
//! This library consumes the backend's SSE streaming endpoint: it reassembles
//! frames from an arbitrarily-chunked response body, decodes them into typed
//! events, and folds those events into a single explicit conversation state.
//! The modules are exposed for use in integration tests and embedding
//! applications.

pub mod adapters;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod sse;
pub mod state;
pub mod traits;
