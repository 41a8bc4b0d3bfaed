//! Data model types for the `github-put` client.

pub mod files;
pub mod repos;
pub mod results;

// Re-exports
pub use files::{ContentEncoding, FileEntry};
pub use repos::RepoConfig;
pub use results::{
    BatchReport, FileOutcome, FileWritten, OperationError, Outcome, RepoCreated, WorkflowResult,
};
