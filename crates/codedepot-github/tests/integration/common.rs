//! Shared test helpers for GitHub contents API integration tests
//!
//! Each helper mounts the mock endpoints a test needs. Paths follow the
//! `/repos/octocat/depot/contents/code/<key>/...` layout.

use codedepot_core::domain::{AccessKey, FileName, Namespace, RepositoryId};
use codedepot_core::ports::Credentials;
use codedepot_github::client::GitHubClient;
use codedepot_github::provider::GitHubRemoteStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "ghp_test_token";
pub const KEY: &str = "k1";

/// Starts a mock server and returns a store pointing at it
pub async fn setup_github_mock() -> (MockServer, GitHubRemoteStore) {
    let server = MockServer::start().await;
    let client = GitHubClient::with_base_url(server.uri()).expect("client");
    (server, GitHubRemoteStore::new(client))
}

pub fn credentials() -> Credentials {
    let repo: RepositoryId = "octocat/depot".parse().unwrap();
    Credentials::new(TOKEN, repo)
}

pub fn namespace() -> Namespace {
    Namespace::new(AccessKey::new(KEY.to_string()).unwrap())
}

pub fn file_name(name: &str) -> FileName {
    FileName::new(name.to_string()).unwrap()
}

/// API path of the namespace folder
pub fn dir_api_path() -> String {
    format!("/repos/octocat/depot/contents/code/{KEY}")
}

/// API path of one file (segment must already be percent-encoded)
pub fn file_api_path(encoded_name: &str) -> String {
    format!("{}/{encoded_name}", dir_api_path())
}

/// One listing entry for a file served from `/raw/<name>`
pub fn file_entry(server: &MockServer, name: &str, sha: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "path": format!("code/{KEY}/{name}"),
        "type": "file",
        "sha": sha,
        "download_url": format!("{}/raw/{name}", server.uri())
    })
}

/// Mounts `GET /raw/<name>` returning `body`
pub async fn mount_raw(server: &MockServer, name: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/raw/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Mounts an error response with a GitHub-style `{message}` body
pub async fn mount_error(server: &MockServer, http_method: &str, api_path: &str, status: u16, message: &str) {
    Mock::given(method(http_method))
        .and(path(api_path))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "message": message,
                "documentation_url": "https://docs.github.com/rest"
            })),
        )
        .mount(server)
        .await;
}
