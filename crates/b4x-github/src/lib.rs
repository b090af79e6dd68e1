//! GitHub backend for repository sync
//!
//! Implements [`b4x_core::RemoteStore`] on top of the GitHub REST contents
//! API. Calls are synchronous; `exists` and `list` give up after
//! [`PROBE_TIMEOUT`], mutations wait as long as the server needs.

pub mod api;
pub mod client;
pub mod error;

pub use client::{DEFAULT_API_BASE, GitHubClient, PROBE_TIMEOUT, USER_AGENT};
pub use error::{Error, Result};
