//! Concrete implementations of trait abstractions.
//!
//! This module provides production-ready adapters implementing the traits
//! defined in `crate::traits`, plus test doubles.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSessionStore`] - File-based session storage
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted streaming responses
//! - [`mock::InMemorySessionStore`] - In-memory session storage

pub mod file_session;
pub mod mock;
pub mod reqwest_http;

pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
