//! Testing utilities.
//!
//! Provides a recording mock of the consumed GitHub API for testing
//! applications that use this crate without network access.

mod mock;

pub use mock::{MockCall, MockGitHubApi, MockResponse};
