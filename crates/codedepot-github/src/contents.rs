//! Repository contents operations
//!
//! Thin wrappers over the contents endpoints:
//! - [`list_directory`] - `GET /repos/{owner}/{repo}/contents/{dir}`
//! - [`get_file`] - `GET /repos/{owner}/{repo}/contents/{path}`
//! - [`put_file`] - `PUT /repos/{owner}/{repo}/contents/{path}`
//! - [`delete_file`] - `DELETE /repos/{owner}/{repo}/contents/{path}`
//! - [`download`] - raw content from an entry's `download_url`
//!
//! ## GitHub API References
//!
//! - [Repository contents](https://docs.github.com/en/rest/repos/contents)

use codedepot_core::domain::{ContentSha, RemotePath};
use codedepot_core::ports::{Credentials, DeleteRequest, DirectoryEntry, EntryKind, WriteRequest};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::client::GitHubClient;
use crate::GitHubError;

// ============================================================================
// GitHub API response types
// ============================================================================

/// One item of a contents response
///
/// Directory listings return an array of these; a single file returns one.
#[derive(Debug, Deserialize)]
pub struct ContentItem {
    /// Last path segment
    pub name: String,
    /// Full repository-relative path
    #[serde(default)]
    pub path: String,
    /// `"file"`, `"dir"`, `"symlink"` or `"submodule"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Blob descriptor
    pub sha: String,
    /// Raw content URL, `null` for directories
    pub download_url: Option<String>,
}

impl ContentItem {
    fn entry_kind(&self) -> EntryKind {
        match self.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Dir,
            _ => EntryKind::Other,
        }
    }

    /// Converts to the port-level DTO, dropping an unusable descriptor
    pub fn into_entry(self) -> DirectoryEntry {
        let kind = self.entry_kind();
        DirectoryEntry {
            name: self.name,
            kind,
            download_url: self.download_url,
            sha: ContentSha::new(self.sha).ok(),
        }
    }
}

/// Response of a create-or-update call
#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

// ============================================================================
// Operations
// ============================================================================

/// Lists a folder
///
/// # Errors
/// Returns [`GitHubError::NotFound`] if the folder does not exist and
/// [`GitHubError::InvalidResponse`] if the path names a file
pub async fn list_directory(
    client: &GitHubClient,
    credentials: &Credentials,
    dir: &RemotePath,
) -> Result<Vec<DirectoryEntry>, GitHubError> {
    let url = client.contents_url(credentials.repository(), dir)?;
    debug!(path = %dir, "Listing directory");

    let response = client
        .send(client.request(Method::GET, url, credentials))
        .await?;
    let body: serde_json::Value = response.json().await?;

    if !body.is_array() {
        return Err(GitHubError::InvalidResponse(format!(
            "{dir} is not a directory"
        )));
    }

    let items: Vec<ContentItem> = serde_json::from_value(body)
        .map_err(|e| GitHubError::InvalidResponse(format!("Malformed listing: {e}")))?;

    debug!(path = %dir, count = items.len(), "Directory listed");
    Ok(items.into_iter().map(ContentItem::into_entry).collect())
}

/// Reads a single file's descriptor
///
/// # Errors
/// Returns [`GitHubError::NotFound`] if the file does not exist
pub async fn get_file(
    client: &GitHubClient,
    credentials: &Credentials,
    path: &RemotePath,
) -> Result<ContentItem, GitHubError> {
    let url = client.contents_url(credentials.repository(), path)?;
    debug!(path = %path, "Probing file");

    let response = client
        .send(client.request(Method::GET, url, credentials))
        .await?;
    let body: serde_json::Value = response.json().await?;

    if body.is_array() {
        return Err(GitHubError::InvalidResponse(format!(
            "{path} is a directory"
        )));
    }

    serde_json::from_value(body)
        .map_err(|e| GitHubError::InvalidResponse(format!("Malformed file metadata: {e}")))
}

/// Creates or updates a file
///
/// # Returns
/// The descriptor of the written blob
pub async fn put_file(
    client: &GitHubClient,
    credentials: &Credentials,
    path: &RemotePath,
    request: &WriteRequest,
) -> Result<ContentSha, GitHubError> {
    let url = client.contents_url(credentials.repository(), path)?;
    debug!(path = %path, update = request.sha.is_some(), "Writing file");

    let response = client
        .send(client.request(Method::PUT, url, credentials).json(request))
        .await?;
    let body: PutResponse = response.json().await?;

    ContentSha::new(body.content.sha)
        .map_err(|e| GitHubError::InvalidResponse(format!("Malformed write response: {e}")))
}

/// Deletes a file whose blob descriptor equals `request.sha`
pub async fn delete_file(
    client: &GitHubClient,
    credentials: &Credentials,
    path: &RemotePath,
    request: &DeleteRequest,
) -> Result<(), GitHubError> {
    let url = client.contents_url(credentials.repository(), path)?;
    debug!(path = %path, "Deleting file");

    client
        .send(client.request(Method::DELETE, url, credentials).json(request))
        .await?;
    Ok(())
}

/// Downloads raw text content
///
/// The token is sent only to the API origin, see
/// [`GitHubClient::download_request`].
///
/// # Errors
/// Returns [`GitHubError::InvalidUrl`] if the link does not parse and
/// [`GitHubError::InvalidResponse`] if the body is not valid UTF-8
pub async fn download(
    client: &GitHubClient,
    credentials: &Credentials,
    download_url: &str,
) -> Result<String, GitHubError> {
    debug!(url = download_url, "Downloading content");

    let url = Url::parse(download_url)
        .map_err(|e| GitHubError::InvalidUrl(format!("{download_url}: {e}")))?;
    let response = client
        .send(client.download_request(url, credentials))
        .await?;
    let bytes = response.bytes().await?;

    String::from_utf8(bytes.to_vec()).map_err(|_| {
        GitHubError::InvalidResponse(format!("Content at {download_url} is not valid UTF-8"))
    })
}
