//! Mock GitHub API for testing.
//!
//! Provides a [`MockGitHubApi`] that implements the consumed API trait
//! without making network calls, records every call, and can be configured
//! to return canned payloads or errors per endpoint.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::api::GitHubApi;
use crate::error::ApiError;

/// Record of a method call.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Method name (e.g., "create_repo_for_user")
    pub method: String,
    /// Arguments passed to the method
    pub args: Vec<String>,
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,
}

impl MockCall {
    /// Create a new mock call record.
    #[must_use]
    pub fn new(method: &str, args: Vec<String>) -> Self {
        Self {
            method: method.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    /// The payload to return; a realistic default is used when unset
    pub data: Option<Value>,
    /// Error to return instead of a payload
    pub error: Option<ApiError>,
    /// Number of times this response has been used
    pub call_count: u32,
}

impl MockResponse {
    /// Create a mock response with a payload.
    #[must_use]
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
            call_count: 0,
        }
    }

    /// Create a mock response with an error.
    #[must_use]
    pub fn with_error(error: ApiError) -> Self {
        Self {
            data: None,
            error: Some(error),
            call_count: 0,
        }
    }

    /// Get the result, returning either the configured payload or error.
    fn get_result(&mut self, default: Value) -> Result<Value, ApiError> {
        self.call_count += 1;
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.data.clone().unwrap_or(default))
    }
}

/// Mock implementation of [`GitHubApi`].
///
/// Every endpoint has a configurable [`MockResponse`]; contents writes can
/// additionally be failed per path, which is how batch tests simulate
/// partial failure. All calls are recorded for zero-call assertions.
#[derive(Default)]
pub struct MockGitHubApi {
    calls: Mutex<Vec<MockCall>>,
    create_user_repo_response: Mutex<MockResponse>,
    create_org_repo_response: Mutex<MockResponse>,
    file_contents_response: Mutex<MockResponse>,
    update_repository_response: Mutex<MockResponse>,
    update_issue_response: Mutex<MockResponse>,
    update_pull_request_response: Mutex<MockResponse>,
    contents_failures: Mutex<HashMap<String, ApiError>>,
}

impl MockGitHubApi {
    /// Create a mock with default (successful) responses everywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response for `create_repo_for_user` calls.
    pub fn configure_create_repo_for_user(&self, response: MockResponse) {
        *self
            .create_user_repo_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `create_repo_in_org` calls.
    pub fn configure_create_repo_in_org(&self, response: MockResponse) {
        *self
            .create_org_repo_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `create_or_update_file_contents` calls.
    pub fn configure_file_contents(&self, response: MockResponse) {
        *self
            .file_contents_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `update_repository` calls.
    pub fn configure_update_repository(&self, response: MockResponse) {
        *self
            .update_repository_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `update_issue` calls.
    pub fn configure_update_issue(&self, response: MockResponse) {
        *self
            .update_issue_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Configure the response for `update_pull_request` calls.
    pub fn configure_update_pull_request(&self, response: MockResponse) {
        *self
            .update_pull_request_response
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = response;
    }

    /// Fail contents writes for one specific path with the given error,
    /// leaving other paths on the configured response.
    pub fn fail_contents_for_path(&self, path: &str, error: ApiError) {
        self.contents_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), error);
    }

    /// Get all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Count recorded calls to one method.
    #[must_use]
    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(MockCall::new(method, args));
    }

    /// Realistic default payload for a repository creation.
    fn default_repo_payload(owner: &str, name: &str) -> Value {
        serde_json::json!({
            "id": 1,
            "name": name,
            "full_name": format!("{owner}/{name}"),
            "owner": { "login": owner },
            "html_url": format!("https://github.com/{owner}/{name}"),
            "clone_url": format!("https://github.com/{owner}/{name}.git"),
            "private": false,
            "default_branch": "main",
        })
    }

    /// Realistic default payload for a contents write.
    fn default_contents_payload(path: &str) -> Value {
        serde_json::json!({
            "content": {
                "name": path.rsplit('/').next().unwrap_or(path),
                "path": path,
                "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3",
            },
            "commit": {
                "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
                "message": "mock commit",
            },
        })
    }
}

#[async_trait]
impl GitHubApi for MockGitHubApi {
    async fn create_repo_for_user(
        &self,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError> {
        self.record_call(
            "create_repo_for_user",
            vec![
                name.to_string(),
                description.to_string(),
                private.to_string(),
                auto_init.to_string(),
            ],
        );

        self.create_user_repo_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(Self::default_repo_payload("mock-owner", name))
    }

    async fn create_repo_in_org(
        &self,
        org: &str,
        name: &str,
        description: &str,
        private: bool,
        auto_init: bool,
    ) -> Result<Value, ApiError> {
        self.record_call(
            "create_repo_in_org",
            vec![
                org.to_string(),
                name.to_string(),
                description.to_string(),
                private.to_string(),
                auto_init.to_string(),
            ],
        );

        self.create_org_repo_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(Self::default_repo_payload(org, name))
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
        self.record_call(
            "create_or_update_file_contents",
            vec![
                owner.to_string(),
                repo.to_string(),
                path.to_string(),
                message.to_string(),
                content.to_string(),
                format!("{sha:?}"),
            ],
        );

        if let Some(error) = self
            .contents_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
        {
            return Err(error.clone());
        }

        self.file_contents_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(Self::default_contents_payload(path))
    }

    async fn update_repository(
        &self,
        owner: &str,
        repo: &str,
        settings: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.record_call(
            "update_repository",
            vec![
                owner.to_string(),
                repo.to_string(),
                format!("{settings:?}"),
            ],
        );

        self.update_repository_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(Self::default_repo_payload(owner, repo))
    }

    async fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.record_call(
            "update_issue",
            vec![
                owner.to_string(),
                repo.to_string(),
                issue_number.to_string(),
                format!("{fields:?}"),
            ],
        );

        self.update_issue_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(serde_json::json!({
                "number": issue_number,
                "state": "open",
                "title": "mock issue",
            }))
    }

    async fn update_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        fields: &HashMap<String, Value>,
    ) -> Result<Value, ApiError> {
        self.record_call(
            "update_pull_request",
            vec![
                owner.to_string(),
                repo.to_string(),
                pull_number.to_string(),
                format!("{fields:?}"),
            ],
        );

        self.update_pull_request_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_result(serde_json::json!({
                "number": pull_number,
                "state": "open",
                "title": "mock pull request",
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockGitHubApi::new();

        mock.create_repo_for_user("demo", "", false, false)
            .await
            .expect("default response should succeed");

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "create_repo_for_user");
        assert_eq!(calls[0].args[0], "demo");
        assert_eq!(mock.call_count("create_repo_for_user"), 1);
        assert_eq!(mock.call_count("create_repo_in_org"), 0);
    }

    #[tokio::test]
    async fn test_mock_default_repo_payload() {
        let mock = MockGitHubApi::new();

        let payload = mock
            .create_repo_for_user("demo", "", false, false)
            .await
            .expect("default response should succeed");

        assert_eq!(payload["name"], "demo");
        assert_eq!(payload["owner"]["login"], "mock-owner");
        assert_eq!(payload["html_url"], "https://github.com/mock-owner/demo");
    }

    #[tokio::test]
    async fn test_mock_configured_error() {
        let mock = MockGitHubApi::new();
        mock.configure_create_repo_for_user(MockResponse::with_error(ApiError::Validation {
            message: "Repository creation failed.".to_string(),
            status: 422,
            errors: vec![],
        }));

        let result = mock.create_repo_for_user("demo", "", false, false).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_mock_per_path_contents_failure() {
        let mock = MockGitHubApi::new();
        mock.fail_contents_for_path(
            "broken.md",
            ApiError::Conflict {
                message: "sha does not match".to_string(),
                status: 409,
            },
        );

        let ok = mock
            .create_or_update_file_contents("o", "r", "fine.md", "m", "Yw==", None)
            .await;
        assert!(ok.is_ok());

        let err = mock
            .create_or_update_file_contents("o", "r", "broken.md", "m", "Yw==", None)
            .await;
        assert!(matches!(err, Err(ApiError::Conflict { .. })));
    }
}
