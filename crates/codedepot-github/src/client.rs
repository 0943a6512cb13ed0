//! GitHub REST API client
//!
//! Provides a typed HTTP client for the GitHub REST API. Handles the
//! authorization, media-type and API-version headers, contents URL
//! construction, and classification of non-success responses.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codedepot_core::domain::{AccessKey, Namespace, RepositoryId};
//! use codedepot_core::ports::Credentials;
//! use codedepot_github::client::GitHubClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new()?;
//! let repo: RepositoryId = "octocat/depot".parse()?;
//! let ns = Namespace::new(AccessKey::generate());
//! let url = client.contents_url(&repo, &ns.dir_path())?;
//! let _request = client.request(reqwest::Method::GET, url, &Credentials::new("token", repo));
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use codedepot_core::config::RemoteConfig;
use codedepot_core::domain::{RemotePath, RepositoryId};
use codedepot_core::ports::Credentials;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::GitHubError;

/// Header carrying the pinned REST API version
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";

/// Error body returned by the GitHub API for non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for GitHub REST API calls
///
/// Wraps `reqwest::Client` with the headers every GitHub request needs.
/// The token is supplied per request so a single client can serve any
/// credentials the settings store hands out.
pub struct GitHubClient {
    /// The underlying HTTP client (carries User-Agent and timeout)
    client: Client,
    /// Base URL for API requests
    base_url: Url,
    /// Value of the Accept header
    accept: String,
    /// Value of the API version header
    api_version: String,
}

impl GitHubClient {
    /// Creates a client for `https://api.github.com` with default settings
    pub fn new() -> Result<Self, GitHubError> {
        Self::from_config(&RemoteConfig::default())
    }

    /// Creates a client from the `remote` configuration section
    pub fn from_config(config: &RemoteConfig) -> Result<Self, GitHubError> {
        let base_url = parse_base_url(&config.api_base_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            accept: config.accept.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Creates a client with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GitHubError> {
        let config = RemoteConfig {
            api_base_url: base_url.into(),
            ..RemoteConfig::default()
        };
        Self::from_config(&config)
    }

    /// Builds `/repos/{owner}/{repo}/contents/{path}` with each segment
    /// percent-encoded
    pub fn contents_url(
        &self,
        repository: &RepositoryId,
        path: &RemotePath,
    ) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| GitHubError::InvalidUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["repos", repository.owner(), repository.repo(), "contents"])
                .extend(path.segments());
        }
        Ok(url)
    }

    /// Creates an authenticated request builder for the given method and URL
    ///
    /// Adds the Authorization, Accept and API-version headers.
    pub fn request(
        &self,
        method: Method,
        url: impl reqwest::IntoUrl,
        credentials: &Credentials,
    ) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(credentials.token())
            .header(reqwest::header::ACCEPT, &self.accept)
            .header(API_VERSION_HEADER, &self.api_version)
    }

    /// Creates a GET request for a raw content link
    ///
    /// Credentials and API headers are attached only when the link shares
    /// the API origin. Links on other hosts (`raw.githubusercontent.com`)
    /// carry their own access token in the query string.
    pub fn download_request(&self, url: Url, credentials: &Credentials) -> RequestBuilder {
        if url.origin() == self.base_url.origin() {
            self.request(Method::GET, url, credentials)
        } else {
            self.client.get(url)
        }
    }

    /// Sends a request and turns any non-success status into a [`GitHubError`]
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, GitHubError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "GitHub response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Parses the base URL, rejecting URLs that cannot carry a path
fn parse_base_url(raw: &str) -> Result<Url, GitHubError> {
    let url = Url::parse(raw).map_err(|e| GitHubError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(GitHubError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Classifies a non-success response, keeping the body's `message` verbatim
async fn error_from_response(response: Response) -> GitHubError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    classify_status(status, message)
}

/// Maps an HTTP status and message to the matching [`GitHubError`] variant
pub(crate) fn classify_status(status: StatusCode, message: String) -> GitHubError {
    match status {
        StatusCode::UNAUTHORIZED => GitHubError::Unauthorized(message),
        StatusCode::FORBIDDEN => GitHubError::Forbidden(message),
        StatusCode::NOT_FOUND => GitHubError::NotFound(message),
        StatusCode::CONFLICT => GitHubError::Conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY => GitHubError::Unprocessable(message),
        _ => GitHubError::Status {
            status: status.as_u16(),
            message,
        },
    }
}
