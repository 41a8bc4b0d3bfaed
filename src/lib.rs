//! Client layer for publishing repositories and files to GitHub.
//!
//! Wraps the GitHub REST API operations for creating repositories, writing
//! files, and updating issues, pull requests, and repository settings. Every
//! operation returns a uniform success/failure envelope instead of an error,
//! and two workflows compose them: batch file upload, and
//! create-repository-then-upload.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use github_put::{FileEntry, GitHubPutClient, RepoConfig};
//!
//! let client = GitHubPutClient::from_env()?;
//!
//! let result = client
//!     .create_repo_and_upload_docs(
//!         &RepoConfig::new("demo").description("A demo repository"),
//!         &[FileEntry::new("README.md", "# demo")],
//!         None,
//!     )
//!     .await;
//!
//! if let Some(repo) = result.repo_info() {
//!     println!("created {}", repo.repo_url);
//! }
//! ```

pub mod api;
pub mod client;
pub mod encoding;
pub mod error;
pub mod ops;
pub mod testing;
pub mod transport;
pub mod types;
pub mod workflow;

// Re-exports
pub use api::{GitHubApi, RestGitHubApi};
pub use client::{ClientOptions, GitHubPutClient};
pub use error::{ApiError, Error, ValidationIssue};
pub use transport::{HttpTransport, RetryConfig};
pub use types::{
    BatchReport, ContentEncoding, FileEntry, FileOutcome, FileWritten, OperationError, Outcome,
    RepoConfig, RepoCreated, WorkflowResult,
};
pub use workflow::DEFAULT_COMMIT_MESSAGE;
