//! Repository creation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for creating a repository.
///
/// `org` decides routing: when present the repository is created in that
/// organization, otherwise under the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository name; must be non-empty before a create call is attempted
    pub name: String,
    /// Repository description
    #[serde(default)]
    pub description: String,
    /// Whether the repository is private
    #[serde(default)]
    pub private: bool,
    /// Organization to create the repository in, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Whether to create an initial commit with an empty README
    #[serde(default)]
    pub auto_init: bool,
}

impl RepoConfig {
    /// Create a config with the given name and defaults for everything else.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            private: false,
            org: None,
            auto_init: false,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Mark the repository private.
    #[must_use]
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Create the repository in an organization instead of the user account.
    #[must_use]
    pub fn org(mut self, org: &str) -> Self {
        self.org = Some(org.to_string());
        self
    }

    /// Initialize the repository with an empty first commit.
    #[must_use]
    pub fn auto_init(mut self, auto_init: bool) -> Self {
        self.auto_init = auto_init;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepoConfig::new("demo");

        assert_eq!(config.name, "demo");
        assert_eq!(config.description, "");
        assert!(!config.private);
        assert_eq!(config.org, None);
        assert!(!config.auto_init);
    }

    #[test]
    fn test_builder_chain() {
        let config = RepoConfig::new("demo")
            .description("A demo repository")
            .private(true)
            .org("acme")
            .auto_init(true);

        assert_eq!(config.org.as_deref(), Some("acme"));
        assert!(config.private);
        assert!(config.auto_init);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RepoConfig =
            serde_json::from_str(r#"{"name": "demo"}"#).expect("Should deserialize");

        assert_eq!(config.name, "demo");
        assert!(!config.private);
        assert_eq!(config.org, None);
    }
}
