//! Integration tests for status classification and transport failures

use codedepot_core::domain::ContentSha;
use codedepot_core::ports::{DirectoryEntry, EntryKind, IRemoteStore, RemoteStoreError, WriteRequest};
use codedepot_github::client::GitHubClient;
use codedepot_github::provider::GitHubRemoteStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

fn write(sha: Option<&str>) -> WriteRequest {
    WriteRequest {
        message: "Save app.py".to_string(),
        content: "YQ==".to_string(),
        sha: sha.map(|s| ContentSha::new(s.to_string()).unwrap()),
    }
}

#[tokio::test]
async fn test_unauthorized_listing() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(&server, "GET", &common::dir_api_path(), 401, "Bad credentials").await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert_eq!(err, RemoteStoreError::Unauthorized("Bad credentials".to_string()));
}

#[tokio::test]
async fn test_forbidden_listing() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(
        &server,
        "GET",
        &common::dir_api_path(),
        403,
        "Resource not accessible by personal access token",
    )
    .await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::Forbidden(_)));
}

#[tokio::test]
async fn test_missing_folder_is_not_found() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(&server, "GET", &common::dir_api_path(), 404, "Not Found").await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert_eq!(err, RemoteStoreError::NotFound);
}

#[tokio::test]
async fn test_stale_sha_is_conflict() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(
        &server,
        "PUT",
        &common::file_api_path("app.py"),
        409,
        "app.py does not match abc",
    )
    .await;

    let ns = common::namespace();
    let err = store
        .put_file(
            &common::credentials(),
            &ns.file_path(&common::file_name("app.py")),
            &write(Some("abc")),
        )
        .await
        .unwrap_err();
    assert_eq!(err, RemoteStoreError::Conflict("app.py does not match abc".to_string()));
}

#[tokio::test]
async fn test_create_over_existing_file_is_conflict() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(
        &server,
        "PUT",
        &common::file_api_path("app.py"),
        422,
        "Invalid request.\n\n\"sha\" wasn't supplied.",
    )
    .await;

    let ns = common::namespace();
    let err = store
        .put_file(
            &common::credentials(),
            &ns.file_path(&common::file_name("app.py")),
            &write(None),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::Conflict(_)));
}

#[tokio::test]
async fn test_unprocessable_update_is_conflict() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(
        &server,
        "PUT",
        &common::file_api_path("app.py"),
        422,
        "Invalid request.\n\n\"sha\" does not match.",
    )
    .await;

    let ns = common::namespace();
    let err = store
        .put_file(
            &common::credentials(),
            &ns.file_path(&common::file_name("app.py")),
            &write(Some("abc")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn test_update_of_removed_file_is_conflict() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(&server, "PUT", &common::file_api_path("app.py"), 404, "Not Found").await;

    let ns = common::namespace();
    let err = store
        .put_file(
            &common::credentials(),
            &ns.file_path(&common::file_name("app.py")),
            &write(Some("abc")),
        )
        .await
        .unwrap_err();
    assert_eq!(err, RemoteStoreError::Conflict("Not Found".to_string()));
}

#[tokio::test]
async fn test_create_in_missing_repository_is_not_found() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(&server, "PUT", &common::file_api_path("app.py"), 404, "Not Found").await;

    let ns = common::namespace();
    let err = store
        .put_file(
            &common::credentials(),
            &ns.file_path(&common::file_name("app.py")),
            &write(None),
        )
        .await
        .unwrap_err();
    assert_eq!(err, RemoteStoreError::NotFound);
}

#[tokio::test]
async fn test_server_error_message_is_verbatim() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_error(&server, "GET", &common::dir_api_path(), 503, "Service unavailable, try later").await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RemoteStoreError::Remote {
            status: 503,
            message: "Service unavailable, try later".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_without_json_body_uses_reason_phrase() {
    let (server, store) = common::setup_github_mock().await;
    Mock::given(method("GET"))
        .and(path(common::dir_api_path()))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RemoteStoreError::Remote {
            status: 500,
            message: "Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_utf8_download_is_invalid_response() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_raw(&server, "blob.bin", &[0xff, 0xfe, 0x00, 0x80]).await;

    let entry = DirectoryEntry {
        name: "blob.bin".to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("{}/raw/blob.bin", server.uri())),
        sha: None,
    };
    let err = store
        .fetch_content(&common::credentials(), &entry)
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_entry_without_download_url() {
    let (_server, store) = common::setup_github_mock().await;
    let entry = DirectoryEntry {
        name: "sub".to_string(),
        kind: EntryKind::Dir,
        download_url: None,
        sha: None,
    };
    let err = store
        .fetch_content(&common::credentials(), &entry)
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = GitHubClient::with_base_url(format!("http://127.0.0.1:{port}")).unwrap();
    let store = GitHubRemoteStore::new(client);
    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::Network(_)), "{err:?}");
}
