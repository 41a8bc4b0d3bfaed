//! Behavior tests for operations and workflows, run against the recording
//! mock so every remote outcome can be scripted and every call counted.

use std::collections::HashMap;
use std::sync::Arc;

use github_put::testing::{MockGitHubApi, MockResponse};
use github_put::{ApiError, FileEntry, GitHubPutClient, RepoConfig, ValidationIssue};

/// Build a client over a fresh mock, returning both.
fn client_with_mock() -> (GitHubPutClient, Arc<MockGitHubApi>) {
    let mock = Arc::new(MockGitHubApi::new());
    let client = GitHubPutClient::with_api(Arc::clone(&mock) as Arc<dyn github_put::GitHubApi>);
    (client, mock)
}

fn conflict() -> ApiError {
    ApiError::Conflict {
        message: "\"sha\" wasn't supplied".to_string(),
        status: 409,
    }
}

mod create_repo {
    use super::*;

    #[tokio::test]
    async fn test_empty_name_fails_locally_with_no_network_call() {
        let (client, mock) = client_with_mock();

        let result = client.create_repo(&RepoConfig::new("")).await;

        assert!(!result.is_success());
        let error = result.error().expect("failure envelope");
        assert_eq!(error.status, None);
        assert!(error.details.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_user_repo_dispatch_and_convenience_fields() {
        let (client, mock) = client_with_mock();

        let result = client.create_repo(&RepoConfig::new("demo")).await;

        let repo = result.success().expect("success envelope");
        assert_eq!(repo.owner, "mock-owner");
        assert_eq!(repo.repo, "demo");
        assert_eq!(repo.repo_url, "https://github.com/mock-owner/demo");
        assert_eq!(repo.clone_url, "https://github.com/mock-owner/demo.git");
        assert_eq!(repo.data["full_name"], "mock-owner/demo");
        assert_eq!(mock.call_count("create_repo_for_user"), 1);
        assert_eq!(mock.call_count("create_repo_in_org"), 0);
    }

    #[tokio::test]
    async fn test_org_presence_routes_to_org_creation() {
        let (client, mock) = client_with_mock();

        let result = client
            .create_repo(&RepoConfig::new("demo").org("acme"))
            .await;

        let repo = result.success().expect("success envelope");
        assert_eq!(repo.owner, "acme");
        assert_eq!(mock.call_count("create_repo_in_org"), 1);
        assert_eq!(mock.call_count("create_repo_for_user"), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_populates_error_details() {
        let mock_api = MockGitHubApi::new();
        mock_api.configure_create_repo_for_user(MockResponse::with_error(ApiError::Validation {
            message: "Repository creation failed.".to_string(),
            status: 422,
            errors: vec![ValidationIssue {
                resource: Some("Repository".to_string()),
                field: Some("name".to_string()),
                code: Some("already_exists".to_string()),
                message: None,
            }],
        }));
        let client = GitHubPutClient::with_api(Arc::new(mock_api));

        let result = client.create_repo(&RepoConfig::new("demo")).await;

        let error = result.error().expect("failure envelope");
        assert_eq!(error.message, "Repository creation failed.");
        assert_eq!(error.status, Some(422));
        assert_eq!(error.details.len(), 1);
        assert_eq!(error.details[0].code.as_deref(), Some("already_exists"));
    }

    #[tokio::test]
    async fn test_remote_failure_without_details_yields_empty_list() {
        let mock_api = MockGitHubApi::new();
        mock_api.configure_create_repo_for_user(MockResponse::with_error(ApiError::Network {
            message: "connection reset by peer".to_string(),
        }));
        let client = GitHubPutClient::with_api(Arc::new(mock_api));

        let result = client.create_repo(&RepoConfig::new("demo")).await;

        let error = result.error().expect("failure envelope");
        assert_eq!(error.status, None);
        assert!(error.details.is_empty());
    }
}

mod file_contents {
    use super::*;

    #[tokio::test]
    async fn test_raw_content_is_base64_encoded_for_transport() {
        let (client, mock) = client_with_mock();
        let entry = FileEntry::new("README.md", "# demo");

        let result = client
            .create_or_update_file("octocat", "demo", &entry, "docs: add readme")
            .await;

        assert!(result.is_success());
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        // args: owner, repo, path, message, content, sha
        assert_eq!(calls[0].args[4], "IyBkZW1v");
    }

    #[tokio::test]
    async fn test_pre_encoded_content_is_not_reencoded() {
        let (client, mock) = client_with_mock();
        let entry = FileEntry::pre_encoded("README.md", "IyBkZW1v");

        client
            .create_or_update_file("octocat", "demo", &entry, "docs: add readme")
            .await;

        assert_eq!(mock.calls()[0].args[4], "IyBkZW1v");
    }

    #[tokio::test]
    async fn test_success_carries_commit_and_content() {
        let (client, _mock) = client_with_mock();
        let entry = FileEntry::new("README.md", "# demo");

        let result = client
            .create_or_update_file("octocat", "demo", &entry, "docs: add readme")
            .await;

        let written = result.success().expect("success envelope");
        assert!(written.commit["sha"].is_string());
        assert_eq!(written.content["path"], "README.md");
    }

    #[tokio::test]
    async fn test_overwrite_without_sha_surfaces_conflict() {
        let (client, mock) = client_with_mock();
        let entry = FileEntry::new("README.md", "# demo");

        // First write lands.
        let first = client
            .create_or_update_file("octocat", "demo", &entry, "docs: add readme")
            .await;
        assert!(first.is_success());

        // Second write of the same path without the resulting sha: the
        // service rejects it with a conflict, surfaced as a failure envelope.
        mock.configure_file_contents(MockResponse::with_error(conflict()));
        let second = client
            .create_or_update_file("octocat", "demo", &entry, "docs: update readme")
            .await;

        assert!(!second.is_success());
        assert_eq!(second.error().expect("failure").status, Some(409));
    }

    #[tokio::test]
    async fn test_entry_message_overrides_fallback() {
        let (client, mock) = client_with_mock();
        let entry = FileEntry::new("README.md", "# demo").message("custom message");

        client
            .create_or_update_file("octocat", "demo", &entry, "fallback message")
            .await;

        assert_eq!(mock.calls()[0].args[3], "custom message");
    }
}

mod updates {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_update_repo_settings_envelope() {
        let (client, mock) = client_with_mock();
        let mut settings: HashMap<String, Value> = HashMap::new();
        settings.insert("has_issues".to_string(), Value::Bool(false));

        let result = client
            .update_repo_settings("octocat", "demo", &settings)
            .await;

        assert!(result.is_success());
        assert_eq!(mock.call_count("update_repository"), 1);
    }

    #[tokio::test]
    async fn test_update_issue_envelope() {
        let (client, mock) = client_with_mock();
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert("state".to_string(), Value::String("closed".to_string()));

        let result = client.update_issue("octocat", "demo", 7, &fields).await;

        let data = result.success().expect("success envelope");
        assert_eq!(data["number"], 7);
        assert_eq!(mock.calls()[0].args[2], "7");
    }

    #[tokio::test]
    async fn test_update_pull_request_failure_envelope() {
        let mock_api = MockGitHubApi::new();
        mock_api.configure_update_pull_request(MockResponse::with_error(ApiError::NotFound {
            message: "Not Found".to_string(),
            status: 404,
        }));
        let client = GitHubPutClient::with_api(Arc::new(mock_api));

        let result = client
            .update_pull_request("octocat", "demo", 42, &HashMap::new())
            .await;

        assert_eq!(result.error().expect("failure").status, Some(404));
    }
}

mod batch_upload {
    use super::*;

    #[tokio::test]
    async fn test_empty_file_list_fails_locally_with_zero_calls() {
        let (client, mock) = client_with_mock();

        let result = client
            .batch_upload_files("octocat", "demo", &[], "docs")
            .await;

        assert!(!result.is_success());
        assert_eq!(mock.call_count("create_or_update_file_contents"), 0);
    }

    #[tokio::test]
    async fn test_results_preserve_input_order_and_length() {
        let (client, _mock) = client_with_mock();
        let files = vec![
            FileEntry::new("README.md", "# demo"),
            FileEntry::new("docs/guide.md", "guide"),
            FileEntry::new("LICENSE", "MIT"),
        ];

        let result = client
            .batch_upload_files("octocat", "demo", &files, "docs")
            .await;

        let report = result.success().expect("success envelope");
        assert_eq!(report.total, 3);
        assert_eq!(report.success_count, 3);
        let paths: Vec<&str> = report.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["README.md", "docs/guide.md", "LICENSE"]);
    }

    #[tokio::test]
    async fn test_per_file_failure_does_not_fail_the_batch() {
        let (client, mock) = client_with_mock();
        mock.fail_contents_for_path("docs/guide.md", conflict());
        let files = vec![
            FileEntry::new("README.md", "# demo"),
            FileEntry::new("docs/guide.md", "guide"),
            FileEntry::new("LICENSE", "MIT"),
        ];

        let result = client
            .batch_upload_files("octocat", "demo", &files, "docs")
            .await;

        let report = result.success().expect("batch completes despite a failed file");
        assert_eq!(report.total, 3);
        assert_eq!(report.success_count, 2);
        assert!(report.results[0].result.is_success());
        assert!(!report.results[1].result.is_success());
        assert!(report.results[2].result.is_success());
    }

    #[tokio::test]
    async fn test_invalid_entry_aborts_whole_batch_without_rollback() {
        let (client, mock) = client_with_mock();
        let files = vec![
            FileEntry::new("README.md", "# demo"),
            FileEntry::new("", "orphan content"),
            FileEntry::new("LICENSE", "MIT"),
        ];

        let result = client
            .batch_upload_files("octocat", "demo", &files, "docs")
            .await;

        assert!(!result.is_success());
        // The first entry was already uploaded and stays uploaded; the third
        // was never attempted.
        assert_eq!(mock.call_count("create_or_update_file_contents"), 1);
    }

    #[tokio::test]
    async fn test_empty_content_aborts_batch() {
        let (client, mock) = client_with_mock();
        let files = vec![FileEntry::new("README.md", "")];

        let result = client
            .batch_upload_files("octocat", "demo", &files, "docs")
            .await;

        assert!(!result.is_success());
        assert_eq!(mock.call_count("create_or_update_file_contents"), 0);
    }

    #[tokio::test]
    async fn test_batch_message_used_when_entry_has_none() {
        let (client, mock) = client_with_mock();
        let files = vec![
            FileEntry::new("README.md", "# demo"),
            FileEntry::new("LICENSE", "MIT").message("chore: add license"),
        ];

        client
            .batch_upload_files("octocat", "demo", &files, "docs: initial import")
            .await;

        let calls = mock.calls();
        assert_eq!(calls[0].args[3], "docs: initial import");
        assert_eq!(calls[1].args[3], "chore: add license");
    }
}

mod create_and_upload {
    use super::*;

    #[tokio::test]
    async fn test_failed_create_short_circuits_upload() {
        let mock_api = MockGitHubApi::new();
        mock_api.configure_create_repo_for_user(MockResponse::with_error(ApiError::Validation {
            message: "Repository creation failed.".to_string(),
            status: 422,
            errors: vec![],
        }));
        let mock = Arc::new(mock_api);
        let client = GitHubPutClient::with_api(Arc::clone(&mock) as Arc<dyn github_put::GitHubApi>);

        let result = client
            .create_repo_and_upload_docs(
                &RepoConfig::new("demo"),
                &[FileEntry::new("README.md", "# demo")],
                None,
            )
            .await;

        assert!(!result.is_success());
        assert!(result.repo_info().is_none());
        assert_eq!(mock.call_count("create_or_update_file_contents"), 0);
    }

    #[tokio::test]
    async fn test_partial_file_failure_still_succeeds_overall() {
        let (client, mock) = client_with_mock();
        mock.fail_contents_for_path(
            "docs/guide.md",
            ApiError::Server {
                message: "Internal Server Error".to_string(),
                status: 500,
            },
        );
        let docs = vec![
            FileEntry::new("README.md", "# demo"),
            FileEntry::new("docs/guide.md", "guide"),
            FileEntry::new("LICENSE", "MIT"),
        ];

        let result = client
            .create_repo_and_upload_docs(&RepoConfig::new("demo"), &docs, None)
            .await;

        assert!(result.is_success());
        let report = result.upload_info().expect("upload report");
        assert_eq!(report.total, 3);
        assert_eq!(report.success_count, 2);
    }

    #[tokio::test]
    async fn test_upload_precondition_failure_keeps_created_repo() {
        let (client, mock) = client_with_mock();

        // Empty docs: the batch fails locally after the repository exists.
        let result = client
            .create_repo_and_upload_docs(&RepoConfig::new("demo"), &[], None)
            .await;

        assert!(!result.is_success());
        // Fail-forward: the created repository is reported, not rolled back.
        let repo = result.repo_info().expect("created repository");
        assert_eq!(repo.repo, "demo");
        assert_eq!(mock.call_count("create_repo_for_user"), 1);
        assert_eq!(mock.call_count("create_or_update_file_contents"), 0);
    }

    #[tokio::test]
    async fn test_owner_and_repo_threaded_from_creation_payload() {
        let (client, mock) = client_with_mock();

        client
            .create_repo_and_upload_docs(
                &RepoConfig::new("demo").org("acme"),
                &[FileEntry::new("README.md", "# demo")],
                None,
            )
            .await;

        let calls = mock.calls();
        let upload = calls
            .iter()
            .find(|c| c.method == "create_or_update_file_contents")
            .expect("upload call");
        assert_eq!(upload.args[0], "acme");
        assert_eq!(upload.args[1], "demo");
    }

    #[tokio::test]
    async fn test_default_commit_message_applied() {
        let (client, mock) = client_with_mock();

        client
            .create_repo_and_upload_docs(
                &RepoConfig::new("demo"),
                &[FileEntry::new("README.md", "# demo")],
                None,
            )
            .await;

        let calls = mock.calls();
        let upload = calls
            .iter()
            .find(|c| c.method == "create_or_update_file_contents")
            .expect("upload call");
        assert_eq!(upload.args[3], github_put::DEFAULT_COMMIT_MESSAGE);
    }

    #[tokio::test]
    async fn test_end_to_end_demo_scenario() {
        let (client, _mock) = client_with_mock();

        let result = client
            .create_repo_and_upload_docs(
                &RepoConfig::new("demo"),
                &[FileEntry::new("README.md", "# demo")],
                Some("docs: initial import"),
            )
            .await;

        assert!(result.is_success());
        let repo = result.repo_info().expect("repo info");
        assert!(!repo.repo_url.is_empty());
        let report = result.upload_info().expect("upload report");
        assert_eq!(report.total, 1);
        assert_eq!(report.success_count, 1);

        match &result {
            github_put::WorkflowResult::Completed { message, .. } => {
                assert!(message.contains(&repo.repo_url));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }
}
