//! Error types for the `github-put` client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for client construction and transport plumbing.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing token, bad options)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// GitHub API error
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One structured validation error from a GitHub error body.
///
/// GitHub reports 422 rejections as a list of these under `errors`; every
/// field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Resource the error applies to (e.g., "Repository")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Field the error applies to (e.g., "name")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Error code (e.g., "already_exists", "custom")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message, present for "custom" codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Typed errors for remote GitHub API failures.
///
/// Each variant corresponds to an error category of the REST API; every
/// variant keeps the raw message and, where the response carried one, the
/// ordered list of structured validation errors.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Bad or missing credentials (401).
    #[error("{message}")]
    Authentication { message: String, status: u16 },

    /// Access denied (403).
    #[error("{message}")]
    Authorization { message: String, status: u16 },

    /// Resource not found (404).
    #[error("{message}")]
    NotFound { message: String, status: u16 },

    /// Conflict, e.g. a contents write missing the current file sha (409).
    #[error("{message}")]
    Conflict { message: String, status: u16 },

    /// Rate limited (429).
    #[error("{message} (retry after {retry_after}s)")]
    RateLimited {
        message: String,
        status: u16,
        retry_after: u32,
    },

    /// Validation rejection (400/422), with GitHub's structured errors.
    #[error("{message}")]
    Validation {
        message: String,
        status: u16,
        errors: Vec<ValidationIssue>,
    },

    /// Server error (5xx).
    #[error("{message}")]
    Server { message: String, status: u16 },

    /// Network-level failure before any HTTP status was received.
    #[error("{message}")]
    Network { message: String },
}

impl ApiError {
    /// Get the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Authentication { message, .. }
            | Self::Authorization { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Network { message } => message,
        }
    }

    /// Get the HTTP status, if the failure got far enough to have one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Authorization { status, .. }
            | Self::NotFound { status, .. }
            | Self::Conflict { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Validation { status, .. }
            | Self::Server { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }

    /// Get the structured validation errors; empty for non-validation failures.
    #[must_use]
    pub fn validation_issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Get the retry-after value for rate limited errors.
    #[must_use]
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Check if this error is retryable at the transport level.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Server { .. } | Self::Network { .. }
        )
    }
}
