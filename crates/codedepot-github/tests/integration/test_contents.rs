//! Integration tests for contents operations (list, fetch, probe, write, delete)

use codedepot_core::domain::ContentSha;
use codedepot_core::ports::{
    DeleteRequest, DirectoryEntry, EntryKind, IRemoteStore, RemoteStoreError, WriteRequest,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

// ============================================================================
// Listing and download
// ============================================================================

#[tokio::test]
async fn test_list_directory_returns_all_entry_kinds() {
    let (server, store) = common::setup_github_mock().await;

    let listing = serde_json::json!([
        common::file_entry(&server, "app.py", "sha-app"),
        {
            "name": "nested",
            "path": "code/k1/nested",
            "type": "dir",
            "sha": "sha-dir",
            "download_url": null
        }
    ]);
    Mock::given(method("GET"))
        .and(path(common::dir_api_path()))
        .and(header("authorization", "Bearer ghp_test_token"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .mount(&server)
        .await;

    let entries = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .expect("listing failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "app.py");
    assert_eq!(entries[0].kind, EntryKind::File);
    assert_eq!(entries[0].sha.as_ref().unwrap().as_str(), "sha-app");
    assert_eq!(entries[1].kind, EntryKind::Dir);
    assert!(entries[1].download_url.is_none());
}

#[tokio::test]
async fn test_list_directory_rejects_file_response() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("GET"))
        .and(path(common::dir_api_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::file_entry(&server, "k1", "s")),
        )
        .mount(&server)
        .await;

    let err = store
        .list_directory(&common::credentials(), &common::namespace().dir_path())
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteStoreError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_fetch_content_downloads_raw_text() {
    let (server, store) = common::setup_github_mock().await;

    let listing = serde_json::json!([common::file_entry(&server, "notes.md", "sha-notes")]);
    Mock::given(method("GET"))
        .and(path(common::dir_api_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(&server)
        .await;
    common::mount_raw(&server, "notes.md", "# Title\nünïcode\n".as_bytes()).await;

    let creds = common::credentials();
    let entries = store
        .list_directory(&creds, &common::namespace().dir_path())
        .await
        .unwrap();
    let content = store.fetch_content(&creds, &entries[0]).await.unwrap();

    assert_eq!(content, "# Title\nünïcode\n");
}

#[tokio::test]
async fn test_fetch_content_empty_file() {
    let (server, store) = common::setup_github_mock().await;
    common::mount_raw(&server, "empty.txt", b"").await;

    let entry = DirectoryEntry {
        name: "empty.txt".to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("{}/raw/empty.txt", server.uri())),
        sha: None,
    };

    let content = store
        .fetch_content(&common::credentials(), &entry)
        .await
        .unwrap();
    assert!(content.is_empty());
}

#[tokio::test]
async fn test_fetch_content_from_api_origin_is_authorized() {
    let (server, store) = common::setup_github_mock().await;
    Mock::given(method("GET"))
        .and(path("/raw/private.py"))
        .and(header("authorization", format!("Bearer {}", common::TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret = 1"))
        .expect(1)
        .mount(&server)
        .await;

    let entry = DirectoryEntry {
        name: "private.py".to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("{}/raw/private.py", server.uri())),
        sha: None,
    };
    let content = store
        .fetch_content(&common::credentials(), &entry)
        .await
        .unwrap();
    assert_eq!(content, "secret = 1");
}

#[tokio::test]
async fn test_fetch_content_from_other_origin_sends_no_token() {
    let (_server, store) = common::setup_github_mock().await;
    let raw_host = MockServer::start().await;
    common::mount_raw(&raw_host, "app.py", b"print(1)").await;

    let entry = DirectoryEntry {
        name: "app.py".to_string(),
        kind: EntryKind::File,
        download_url: Some(format!("{}/raw/app.py?token=AAAA", raw_host.uri())),
        sha: None,
    };
    let content = store
        .fetch_content(&common::credentials(), &entry)
        .await
        .unwrap();
    assert_eq!(content, "print(1)");

    let requests = raw_host.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
    assert!(!requests[0].headers.contains_key("x-github-api-version"));
}

// ============================================================================
// Probe
// ============================================================================

#[tokio::test]
async fn test_get_metadata_returns_sha() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("GET"))
        .and(path(common::file_api_path("app.py")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::file_entry(&server, "app.py", "abc123")),
        )
        .mount(&server)
        .await;

    let ns = common::namespace();
    let meta = store
        .get_metadata(&common::credentials(), &ns.file_path(&common::file_name("app.py")))
        .await
        .unwrap();
    assert_eq!(meta.sha.as_str(), "abc123");
}

#[tokio::test]
async fn test_file_names_are_percent_encoded() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("GET"))
        .and(path(common::file_api_path("my%20notes%231.md")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::file_entry(&server, "my notes#1.md", "s9")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ns = common::namespace();
    let meta = store
        .get_metadata(
            &common::credentials(),
            &ns.file_path(&common::file_name("my notes#1.md")),
        )
        .await
        .unwrap();
    assert_eq!(meta.sha.as_str(), "s9");
}

// ============================================================================
// Write and delete
// ============================================================================

#[tokio::test]
async fn test_put_file_create_omits_sha() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("PUT"))
        .and(path(common::file_api_path("app.py")))
        .and(body_json(serde_json::json!({
            "message": "Save app.py",
            "content": "cHJpbnQoMSk="
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "content": {"name": "app.py", "sha": "s1"},
            "commit": {"sha": "c1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = WriteRequest {
        message: "Save app.py".to_string(),
        content: "cHJpbnQoMSk=".to_string(),
        sha: None,
    };
    let ns = common::namespace();
    let sha = store
        .put_file(&common::credentials(), &ns.file_path(&common::file_name("app.py")), &request)
        .await
        .unwrap();
    assert_eq!(sha.as_str(), "s1");
}

#[tokio::test]
async fn test_put_file_update_sends_sha() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("PUT"))
        .and(path(common::file_api_path("app.py")))
        .and(body_json(serde_json::json!({
            "message": "Save app.py",
            "content": "cHJpbnQoMik=",
            "sha": "s1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": {"name": "app.py", "sha": "s2"},
            "commit": {"sha": "c2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = WriteRequest {
        message: "Save app.py".to_string(),
        content: "cHJpbnQoMik=".to_string(),
        sha: Some(ContentSha::new("s1".to_string()).unwrap()),
    };
    let ns = common::namespace();
    let sha = store
        .put_file(&common::credentials(), &ns.file_path(&common::file_name("app.py")), &request)
        .await
        .unwrap();
    assert_eq!(sha.as_str(), "s2");
}

#[tokio::test]
async fn test_delete_file_sends_message_and_sha() {
    let (server, store) = common::setup_github_mock().await;

    Mock::given(method("DELETE"))
        .and(path(common::file_api_path("notes.md")))
        .and(body_json(serde_json::json!({
            "message": "Delete notes.md",
            "sha": "n1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": null,
            "commit": {"sha": "c3"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = DeleteRequest {
        message: "Delete notes.md".to_string(),
        sha: ContentSha::new("n1".to_string()).unwrap(),
    };
    let ns = common::namespace();
    store
        .delete_file(&common::credentials(), &ns.file_path(&common::file_name("notes.md")), &request)
        .await
        .unwrap();
}
