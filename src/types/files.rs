//! File entries for contents writes and batch upload.

use serde::{Deserialize, Serialize};

/// How a [`FileEntry`]'s content is encoded.
///
/// Callers declare the encoding explicitly; the client base64-encodes `Raw`
/// content before submission and passes `Base64` content through untouched,
/// so nothing is ever double-encoded and nothing is guessed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentEncoding {
    /// Raw text; will be base64-encoded for transport
    #[default]
    Raw,
    /// Already base64-encoded; submitted as-is
    Base64,
}

/// One file to create or update in a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Repo-relative path; must be non-empty
    pub path: String,
    /// File content; must be non-empty
    pub content: String,
    /// Declared encoding of `content`
    #[serde(default)]
    pub encoding: ContentEncoding,
    /// Current blob sha, required only when overwriting an existing path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Per-file commit message, overriding the batch-level message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileEntry {
    /// Create an entry with raw text content.
    #[must_use]
    pub fn new(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
            encoding: ContentEncoding::Raw,
            sha: None,
            message: None,
        }
    }

    /// Create an entry whose content is already base64-encoded.
    #[must_use]
    pub fn pre_encoded(path: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            content: content.to_string(),
            encoding: ContentEncoding::Base64,
            sha: None,
            message: None,
        }
    }

    /// Set the current blob sha for an overwrite.
    #[must_use]
    pub fn sha(mut self, sha: &str) -> Self {
        self.sha = Some(sha.to_string());
        self
    }

    /// Set a per-file commit message.
    #[must_use]
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }
}
