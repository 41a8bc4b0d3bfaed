//! Result envelopes returned by operations and workflows.
//!
//! Every public operation returns an [`Outcome`] instead of an `Err`: remote
//! failures are caught at the wrapper boundary and callers branch on the
//! success discriminant. Envelopes serialize to JSON with an explicit
//! `success` field.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ApiError, ValidationIssue};

/// Normalized failure payload for an operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationError {
    /// Human-readable error message
    pub message: String,
    /// HTTP status, absent for local validation and network failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Ordered structured validation errors; empty when the response had none
    pub details: Vec<ValidationIssue>,
}

impl OperationError {
    /// A failure produced locally, before any network call.
    #[must_use]
    pub fn local(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: None,
            details: Vec::new(),
        }
    }
}

impl From<ApiError> for OperationError {
    fn from(error: ApiError) -> Self {
        Self {
            message: error.message().to_string(),
            status: error.status(),
            details: error.validation_issues().to_vec(),
        }
    }
}

/// The uniform success/failure envelope.
///
/// Exactly one of the two shapes is populated; `is_success` is the
/// discriminant.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// Operation succeeded
    Success(T),
    /// Operation failed, locally or remotely
    Failure(OperationError),
}

impl<T> Outcome<T> {
    /// Whether the operation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    #[must_use]
    pub fn error(&self) -> Option<&OperationError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, OperationError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(data) => {
                let mut value = serde_json::to_value(data).map_err(serde::ser::Error::custom)?;
                if let Value::Object(ref mut map) = value {
                    map.insert("success".to_string(), Value::Bool(true));
                } else {
                    value = serde_json::json!({ "success": true, "data": value });
                }
                value.serialize(serializer)
            }
            Self::Failure(error) => {
                serde_json::json!({ "success": false, "error": error }).serialize(serializer)
            }
        }
    }
}

/// Success payload of a repository creation.
#[derive(Debug, Clone, Serialize)]
pub struct RepoCreated {
    /// Full repository payload from the API
    pub data: Value,
    /// Browser URL of the repository
    pub repo_url: String,
    /// HTTPS clone URL
    pub clone_url: String,
    /// Login of the resulting owner (user or organization)
    pub owner: String,
    /// Resulting repository name
    pub repo: String,
}

/// Success payload of a contents write.
#[derive(Debug, Clone, Serialize)]
pub struct FileWritten {
    /// Full contents-write payload from the API
    pub data: Value,
    /// The commit created by the write
    pub commit: Value,
    /// Updated file metadata
    pub content: Value,
}

/// Per-file outcome within a batch upload, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Repo-relative path of the entry
    pub path: String,
    /// Envelope of the write for that entry
    pub result: Outcome<FileWritten>,
}

/// Aggregate report of a batch upload.
///
/// A completed batch is a success even when some files failed; callers
/// inspect `results[i].result` for per-file failures.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Number of requested file operations
    pub total: usize,
    /// Number of per-file writes that succeeded
    pub success_count: usize,
    /// One outcome per input entry, `results[i]` matching `files[i]`
    pub results: Vec<FileOutcome>,
}

/// Result of the create-repo-and-upload workflow.
///
/// Step failures are returned verbatim; there is no rollback, so an upload
/// failure still reports the repository created in step 1.
#[derive(Debug, Clone)]
pub enum WorkflowResult {
    /// Repository creation failed; the upload was never attempted.
    RepoFailed(Outcome<RepoCreated>),
    /// The repository was created but the batch failed its preconditions.
    /// The repository is left in place.
    UploadFailed {
        repo_info: RepoCreated,
        upload_info: Outcome<BatchReport>,
    },
    /// Both steps succeeded.
    Completed {
        repo_info: RepoCreated,
        upload_info: BatchReport,
        /// Human-readable summary embedding the repository URL
        message: String,
    },
}

impl Serialize for WorkflowResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // A failed first step is returned verbatim as its own envelope.
            Self::RepoFailed(outcome) => outcome.serialize(serializer),
            Self::UploadFailed {
                repo_info,
                upload_info,
            } => serde_json::json!({
                "success": false,
                "repo_info": repo_info,
                "upload_info": upload_info,
            })
            .serialize(serializer),
            Self::Completed {
                repo_info,
                upload_info,
                message,
            } => serde_json::json!({
                "success": true,
                "repo_info": repo_info,
                "upload_info": upload_info,
                "message": message,
            })
            .serialize(serializer),
        }
    }
}

impl WorkflowResult {
    /// Whether the whole workflow succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// The created repository, when step 1 got that far.
    #[must_use]
    pub fn repo_info(&self) -> Option<&RepoCreated> {
        match self {
            Self::RepoFailed(_) => None,
            Self::UploadFailed { repo_info, .. } | Self::Completed { repo_info, .. } => {
                Some(repo_info)
            }
        }
    }

    /// The batch report, when the upload completed.
    #[must_use]
    pub fn upload_info(&self) -> Option<&BatchReport> {
        match self {
            Self::Completed { upload_info, .. } => Some(upload_info),
            _ => None,
        }
    }
}
