//! Operation wrappers.
//!
//! One method per remote capability. Each wraps exactly one [`GitHubApi`]
//! call and normalizes the outcome into an [`Outcome`] envelope: any remote
//! failure is caught and converted, never propagated, and nothing is
//! retried here.
//!
//! [`GitHubApi`]: crate::api::GitHubApi

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::client::GitHubPutClient;
use crate::encoding::transport_encode;
use crate::types::{FileEntry, FileWritten, OperationError, Outcome, RepoConfig, RepoCreated};

impl GitHubPutClient {
    /// Create a repository.
    ///
    /// An empty name fails locally with no network call. When `config.org`
    /// is set the repository is created in that organization, otherwise
    /// under the authenticated user. The success envelope carries the
    /// browser URL, clone URL, owner login, and resulting name alongside the
    /// full payload.
    pub async fn create_repo(&self, config: &RepoConfig) -> Outcome<RepoCreated> {
        if config.name.is_empty() {
            return Outcome::Failure(OperationError::local("repository name is required"));
        }

        debug!(name = %config.name, org = ?config.org, "creating repository");

        let result = match &config.org {
            Some(org) => {
                self.api()
                    .create_repo_in_org(
                        org,
                        &config.name,
                        &config.description,
                        config.private,
                        config.auto_init,
                    )
                    .await
            }
            None => {
                self.api()
                    .create_repo_for_user(
                        &config.name,
                        &config.description,
                        config.private,
                        config.auto_init,
                    )
                    .await
            }
        };

        match result {
            Ok(data) => Outcome::Success(RepoCreated {
                repo_url: str_field(&data, &["html_url"]),
                clone_url: str_field(&data, &["clone_url"]),
                owner: str_field(&data, &["owner", "login"]),
                repo: str_field(&data, &["name"]),
                data,
            }),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Create or update one file.
    ///
    /// The entry's content is transport-encoded according to its declared
    /// encoding. The commit message is the entry's own `message` when set,
    /// else `message`. Overwriting an existing path without the current
    /// `sha` fails at the service with a conflict, surfaced as an ordinary
    /// failure envelope.
    pub async fn create_or_update_file(
        &self,
        owner: &str,
        repo: &str,
        entry: &FileEntry,
        message: &str,
    ) -> Outcome<FileWritten> {
        let content = transport_encode(&entry.content, entry.encoding);
        let commit_message = entry.message.as_deref().unwrap_or(message);

        debug!(owner, repo, path = %entry.path, "writing file contents");

        let result = self
            .api()
            .create_or_update_file_contents(
                owner,
                repo,
                &entry.path,
                commit_message,
                &content,
                entry.sha.as_deref(),
            )
            .await;

        match result {
            Ok(data) => Outcome::Success(FileWritten {
                commit: data.get("commit").cloned().unwrap_or(Value::Null),
                content: data.get("content").cloned().unwrap_or(Value::Null),
                data,
            }),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Update repository settings with a partial payload.
    pub async fn update_repo_settings(
        &self,
        owner: &str,
        repo: &str,
        settings: &HashMap<String, Value>,
    ) -> Outcome<Value> {
        debug!(owner, repo, "updating repository settings");

        match self.api().update_repository(owner, repo, settings).await {
            Ok(data) => Outcome::Success(data),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Update an issue with a partial payload.
    pub async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Outcome<Value> {
        debug!(owner, repo, issue_number, "updating issue");

        match self
            .api()
            .update_issue(owner, repo, issue_number, fields)
            .await
        {
            Ok(data) => Outcome::Success(data),
            Err(error) => Outcome::Failure(error.into()),
        }
    }

    /// Update a pull request with a partial payload.
    pub async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Outcome<Value> {
        debug!(owner, repo, pull_number, "updating pull request");

        match self
            .api()
            .update_pull_request(owner, repo, pull_number, fields)
            .await
        {
            Ok(data) => Outcome::Success(data),
            Err(error) => Outcome::Failure(error.into()),
        }
    }
}

/// Extract a nested string field from a payload, empty when absent.
fn str_field(data: &Value, path: &[&str]) -> String {
    let mut current = data;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    current.as_str().unwrap_or_default().to_string()
}
