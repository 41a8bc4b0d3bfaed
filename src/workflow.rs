//! Workflow orchestration.
//!
//! Composes the operation wrappers into two multi-step workflows: batch file
//! upload, and create-repository-then-upload. Steps run strictly
//! sequentially; a failing step short-circuits, a failing file within a
//! batch does not.

use tracing::{debug, info};

use crate::client::GitHubPutClient;
use crate::types::{
    BatchReport, FileEntry, FileOutcome, OperationError, Outcome, RepoConfig, WorkflowResult,
};

/// Commit message used when the workflow caller does not supply one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initialize project with documentation";

impl GitHubPutClient {
    /// Upload a sequence of files, one commit per file, in input order.
    ///
    /// An empty `files` sequence fails locally with zero upload calls. Each
    /// entry must have a non-empty path and content; a violating entry
    /// aborts the whole batch with a local failure (earlier uploads in the
    /// sequence are not rolled back). Per-file remote failures do not fail
    /// the batch: the report is a success whose `results` carry one envelope
    /// per entry, `results[i]` matching `files[i]`, and callers inspect
    /// those for partial failure.
    pub async fn batch_upload_files(
        &self,
        owner: &str,
        repo: &str,
        files: &[FileEntry],
        message: &str,
    ) -> Outcome<BatchReport> {
        if files.is_empty() {
            return Outcome::Failure(OperationError::local("file list must not be empty"));
        }

        debug!(owner, repo, total = files.len(), "starting batch upload");

        let mut results = Vec::with_capacity(files.len());

        for entry in files {
            if entry.path.is_empty() {
                return Outcome::Failure(OperationError::local("every file must have a path"));
            }
            if entry.content.is_empty() {
                return Outcome::Failure(OperationError::local("every file must have content"));
            }

            let result = self
                .create_or_update_file(owner, repo, entry, message)
                .await;
            results.push(FileOutcome {
                path: entry.path.clone(),
                result,
            });
        }

        let success_count = results.iter().filter(|r| r.result.is_success()).count();

        Outcome::Success(BatchReport {
            total: files.len(),
            success_count,
            results,
        })
    }

    /// Create a repository, then upload documentation into it.
    ///
    /// Step failures are returned verbatim: a failed creation means the
    /// upload is never attempted, and a failed batch leaves the created
    /// repository in place (fail-forward, no compensating delete). The
    /// owner and name threaded into the upload come from the creation
    /// payload, so organization repositories upload under the organization
    /// login.
    pub async fn create_repo_and_upload_docs(
        &self,
        repo_config: &RepoConfig,
        docs: &[FileEntry],
        commit_message: Option<&str>,
    ) -> WorkflowResult {
        let message = commit_message.unwrap_or(DEFAULT_COMMIT_MESSAGE);

        let repo_info = match self.create_repo(repo_config).await {
            Outcome::Success(repo_info) => repo_info,
            Outcome::Failure(error) => {
                return WorkflowResult::RepoFailed(Outcome::Failure(error))
            }
        };

        match self
            .batch_upload_files(&repo_info.owner, &repo_info.repo, docs, message)
            .await
        {
            Outcome::Success(upload_info) => {
                let summary = format!(
                    "Repository created and documentation uploaded: {}",
                    repo_info.repo_url
                );
                info!(
                    repo_url = %repo_info.repo_url,
                    uploaded = upload_info.success_count,
                    total = upload_info.total,
                    "workflow completed"
                );
                WorkflowResult::Completed {
                    repo_info,
                    upload_info,
                    message: summary,
                }
            }
            Outcome::Failure(error) => WorkflowResult::UploadFailed {
                repo_info,
                upload_info: Outcome::Failure(error),
            },
        }
    }
}
