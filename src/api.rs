//! The consumed GitHub API surface.
//!
//! [`GitHubApi`] is the narrow call interface the rest of the crate depends
//! on; it is always passed in explicitly, so tests can substitute the
//! recording mock in [`crate::testing`]. [`RestGitHubApi`] is the production
//! implementation over [`HttpTransport`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::HttpTransport;

/// The remote API calls this crate consumes.
///
/// Each call maps to one REST endpoint and returns the raw JSON payload;
/// failures carry the message, status, and any structured validation errors
/// the service reported.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `POST /user/repos` — create a repository for the authenticated user.
    async fn create_repo_for_user(
        &self,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError>;

    /// `POST /orgs/{org}/repos` — create a repository in an organization.
    async fn create_repo_in_org(
        &self,
        org: &str,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError>;

    /// `PUT /repos/{owner}/{repo}/contents/{path}` — create or update a file.
    ///
    /// `content` must already be transport-encoded; `sha` is required only
    /// when overwriting an existing path.
    async fn create_or_update_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<Value, ApiError>;

    /// `PATCH /repos/{owner}/{repo}` — partial repository settings update.
    async fn update_repository(
        &self,
        owner: &str,
        repo: &str,
        settings: &HashMap<String, Value>,
    ) -> Result<Value, ApiError>;

    /// `PATCH /repos/{owner}/{repo}/issues/{issue_number}` — partial issue update.
    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError>;

    /// `PATCH /repos/{owner}/{repo}/pulls/{pull_number}` — partial pull request update.
    async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError>;
}

/// REST implementation of [`GitHubApi`] over the shared transport.
pub struct RestGitHubApi {
    transport: Arc<HttpTransport>,
}

impl RestGitHubApi {
    /// Create a REST API client over a transport.
    #[must_use]
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Get the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    fn repo_body(name: &str, description: &str, private: bool, auto_init: bool) -> Value {
        serde_json::json!({
            "name": name,
            "description": description,
            "private": private,
            "auto_init": auto_init,
        })
    }
}

#[async_trait]
impl GitHubApi for RestGitHubApi {
    async fn create_repo_for_user(
        &self,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError> {
        let body = Self::repo_body(name, description, private, auto_init);
        self.transport
            .request("POST", "/user/repos", Some(&body))
            .await
    }

    async fn create_repo_in_org(
        &self,
        org: &str,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError> {
        let body = Self::repo_body(name, description, private, auto_init);
        self.transport
            .request("POST", &format!("/orgs/{org}/repos"), Some(&body))
            .await
    }

    async fn create_or_update_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut body: HashMap<String, Value> = HashMap::new();
        body.insert("message".to_string(), Value::String(message.to_string()));
        body.insert("content".to_string(), Value::String(content.to_string()));
        if let Some(sha) = sha {
            body.insert("sha".to_string(), Value::String(sha.to_string()));
        }

        self.transport
            .request(
                "PUT",
                &format!("/repos/{owner}/{repo}/contents/{path}"),
                Some(&body),
            )
            .await
    }

    async fn update_repository(
        &self,
        owner: &str,
        repo: &str,
        settings: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.transport
            .request("PATCH", &format!("/repos/{owner}/{repo}"), Some(settings))
            .await
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.transport
            .request(
                "PATCH",
                &format!("/repos/{owner}/{repo}/issues/{issue_number}"),
                Some(fields),
            )
            .await
    }

    async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.transport
            .request(
                "PATCH",
                &format!("/repos/{owner}/{repo}/pulls/{pull_number}"),
                Some(fields),
            )
            .await
    }
}
