//! Trait abstractions for injected boundaries.
//!
//! These traits decouple the streaming core from the network and from the
//! credential storage medium, enabling dependency injection and mocking in
//! tests. Production adapters live in `crate::adapters`.

pub mod http;
pub mod session_store;

pub use http::{ByteStream, Headers, HttpClient, HttpError};
pub use session_store::{SessionStore, ACCESS_TOKEN_KEY, USERNAME_KEY};
