//! Main client.
//!
//! Construction requires either a personal access token or a pre-configured
//! [`GitHubApi`] implementation; supplying neither is a synchronous
//! configuration error.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{GitHubApi, RestGitHubApi};
use crate::error::Error;
use crate::transport::{HttpTransport, RetryConfig};

/// Default base URL for the GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent header sent with every request; GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("github-put/", env!("CARGO_PKG_VERSION"));

/// Options for constructing a [`GitHubPutClient`].
#[derive(Default)]
pub struct ClientOptions {
    /// Personal access token
    pub token: Option<String>,
    /// Pre-configured API implementation; takes precedence over `token`
    pub api: Option<Arc<dyn GitHubApi>>,
    /// Base URL override (default: <https://api.github.com>)
    pub base_url: Option<String>,
    /// Request timeout (default: 30 seconds)
    pub timeout: Option<Duration>,
    /// Transport retry configuration
    pub retry_config: Option<RetryConfig>,
}

/// Client for publishing repositories and files to GitHub.
///
/// Wraps each remote call in a uniform success/failure envelope and composes
/// them into the batch-upload and create-and-upload workflows.
///
/// # Example
///
/// ```rust,ignore
/// use github_put::{FileEntry, GitHubPutClient, RepoConfig};
///
/// let client = GitHubPutClient::from_token("ghp_...")?;
///
/// let result = client
///     .create_repo_and_upload_docs(
///         &RepoConfig::new("demo"),
///         &[FileEntry::new("README.md", "# demo")],
///         None,
///     )
///     .await;
/// assert!(result.is_success());
/// ```
pub struct GitHubPutClient {
    api: Arc<dyn GitHubApi>,
}

impl GitHubPutClient {
    /// Create a client from options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when neither a token nor an API
    /// implementation is supplied, and [`Error::Http`] when the transport
    /// cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        if let Some(api) = options.api {
            return Ok(Self { api });
        }

        let token = options
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "a personal access token or a pre-configured GitHubApi instance is required"
                        .to_string(),
                )
            })?;

        let base_url = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let timeout = options
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let transport = Arc::new(HttpTransport::new(
            base_url,
            &token,
            USER_AGENT,
            timeout,
            options.retry_config,
        )?);

        Ok(Self {
            api: Arc::new(RestGitHubApi::new(transport)),
        })
    }

    /// Create a client from a personal access token with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the token is empty.
    pub fn from_token(token: &str) -> Result<Self, Error> {
        Self::new(ClientOptions {
            token: Some(token.to_string()),
            ..ClientOptions::default()
        })
    }

    /// Create a client over a pre-configured API implementation.
    #[must_use]
    pub fn with_api(api: Arc<dyn GitHubApi>) -> Self {
        Self { api }
    }

    /// Create a client from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GITHUB_TOKEN` - Personal access token (required)
    /// * `GITHUB_API_BASE_URL` - Base URL override (optional)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `GITHUB_TOKEN` is not set.
    pub fn from_env() -> Result<Self, Error> {
        let token = env::var("GITHUB_TOKEN").map_err(|_| {
            Error::Configuration("GITHUB_TOKEN environment variable not set".to_string())
        })?;

        Self::new(ClientOptions {
            token: Some(token),
            base_url: env::var("GITHUB_API_BASE_URL").ok(),
            ..ClientOptions::default()
        })
    }

    /// Get the underlying API implementation.
    #[must_use]
    pub fn api(&self) -> &Arc<dyn GitHubApi> {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGitHubApi;

    #[test]
    fn test_client_requires_token_or_api() {
        let result = GitHubPutClient::new(ClientOptions::default());

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_client_rejects_empty_token() {
        let result = GitHubPutClient::from_token("");

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_client_from_token() {
        GitHubPutClient::from_token("ghp_testtoken").expect("Client creation should succeed");
    }

    #[test]
    fn test_client_with_injected_api() {
        let mock = Arc::new(MockGitHubApi::new());
        let _client = GitHubPutClient::with_api(mock);
    }

    #[test]
    fn test_injected_api_takes_precedence() {
        let mock = Arc::new(MockGitHubApi::new());
        GitHubPutClient::new(ClientOptions {
            token: Some("ghp_testtoken".to_string()),
            api: Some(mock),
            ..ClientOptions::default()
        })
        .expect("Client creation should succeed");
    }
}
