//! HTTP transport for the GitHub REST API.
//!
//! Handles authenticated requests, retry with exponential backoff, and
//! parsing of GitHub error bodies into typed errors. Retry lives entirely in
//! this layer; the operation wrappers above it never retry.

use std::time::Duration;

use rand::thread_rng;
use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, Error, ValidationIssue};

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

/// Token-authenticated HTTP transport with retry.
///
/// Handles:
/// - `Authorization: Bearer` header from the personal access token
/// - GitHub media-type and API-version headers
/// - Exponential backoff with jitter for retryable statuses
/// - Retry-After header respect for rate limiting
/// - Error response parsing into typed errors
pub struct HttpTransport {
    base_url: String,
    client: Client,
    token: String,
    retry_config: RetryConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (e.g., "<https://api.github.com>")
    /// * `token` - Personal access token used as a bearer credential
    /// * `user_agent` - User-Agent header value (required by GitHub)
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: &str,
        token: &str,
        user_agent: &str,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: token.to_string(),
            retry_config: retry_config.unwrap_or_default(),
        })
    }

    /// Make an authenticated request with automatic retry.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, PUT, PATCH, DELETE)
    /// * `path` - API path (e.g., "/user/repos")
    /// * `body` - Optional JSON request body
    ///
    /// # Returns
    ///
    /// Parsed JSON response payload
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for remote failures, after retryable ones have
    /// exhausted the configured attempts.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..=self.retry_config.max_retries {
            match self.send_once(method, &url, body).await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        // 204s and other empty bodies parse as null.
                        let text = response
                            .text()
                            .await
                            .map_err(|e| ApiError::Network {
                                message: format!("Failed to read response: {e}"),
                            })?;
                        if text.is_empty() {
                            return Ok(Value::Null);
                        }
                        return serde_json::from_str(&text).map_err(|e| ApiError::Network {
                            message: format!("Failed to parse response: {e}"),
                        });
                    }

                    let error = Self::parse_error_response(response).await;

                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    let retry_after = error.retry_after();
                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    warn!(
                        status = status.as_u16(),
                        attempt,
                        wait_time,
                        "retryable GitHub API failure, backing off"
                    );
                    last_error = Some(error);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable.
                    if attempt >= self.retry_config.max_retries {
                        return Err(e);
                    }

                    let wait_time = self.get_backoff_time(attempt, None);
                    last_error = Some(e);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ApiError::Server {
            message: "Request failed after maximum retries".to_string(),
            status: 500,
        }))
    }

    /// Issue a single HTTP request without retry.
    async fn send_once(
        &self,
        method: &str,
        url: &str,
        body: Option<&impl Serialize>,
    ) -> Result<Response, ApiError> {
        debug!(method, url, "GitHub API request");

        let mut request = match method.to_uppercase().as_str() {
            "POST" => self.client.post(url),
            "PUT" => self.client.put(url),
            "PATCH" => self.client.patch(url),
            "DELETE" => self.client.delete(url),
            _ => self.client.get(url),
        };

        request = request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(b) = body {
            request = request.json(b);
        }

        request.send().await.map_err(|e| ApiError::Network {
            message: e.to_string(),
        })
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra);
            }
        }

        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        let wait_time = if self.retry_config.jitter > 0.0 {
            let jitter_range = base_wait * self.retry_config.jitter;
            let mut rng = thread_rng();
            let jitter = rng.gen_range(-jitter_range..jitter_range);
            base_wait + jitter
        } else {
            base_wait
        };

        wait_time.min(self.retry_config.max_backoff)
    }

    /// Parse an error response into a typed error.
    ///
    /// GitHub error bodies look like
    /// `{"message": "...", "errors": [...], "documentation_url": "..."}`;
    /// a missing or unparseable body never fails the parse, it just yields an
    /// error with a synthesized message and no validation details.
    async fn parse_error_response(response: Response) -> ApiError {
        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let data: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        let message = data
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or(&format!("HTTP {}", status.as_u16()))
            .to_string();
        let errors: Vec<ValidationIssue> = data
            .get("errors")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let status_code = status.as_u16();
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Authentication {
                message,
                status: status_code,
            },
            StatusCode::FORBIDDEN => ApiError::Authorization {
                message,
                status: status_code,
            },
            StatusCode::NOT_FOUND => ApiError::NotFound {
                message,
                status: status_code,
            },
            StatusCode::CONFLICT => ApiError::Conflict {
                message,
                status: status_code,
            },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                message,
                status: status_code,
                retry_after: retry_after.unwrap_or(60),
            },
            s if s.is_server_error() => ApiError::Server {
                message,
                status: status_code,
            },
            _ => ApiError::Validation {
                message,
                status: status_code,
                errors,
            },
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
