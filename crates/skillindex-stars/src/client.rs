//! HTTP access to the GitHub repository API

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StarsError};

/// Media type GitHub recommends for REST requests
const GITHUB_JSON_MIME_TYPE: &str = "application/vnd.github+json";

/// GitHub rejects requests without a user agent
const USER_AGENT: &str = concat!("skillindex/", env!("CARGO_PKG_VERSION"));

/// Source of repository metadata documents
#[async_trait]
pub trait RepoMetadataClient: Send + Sync {
    /// GET `url` and return the decoded JSON body
    ///
    /// # Errors
    /// Returns [`StarsError::Status`] for non-success responses, and
    /// transport or decoding errors otherwise
    async fn fetch_repo(&self, url: &str) -> Result<Value>;
}

/// Unauthenticated GitHub REST client
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: reqwest::Client,
}

impl GitHubClient {
    /// Build a client whose requests give up after `timeout`
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl RepoMetadataClient for GitHubClient {
    async fn fetch_repo(&self, url: &str) -> Result<Value> {
        let response = self
            .inner
            .get(url)
            .header(reqwest::header::ACCEPT, GITHUB_JSON_MIME_TYPE)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, url, "GitHub API response received");

        if !status.is_success() {
            return Err(StarsError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // text() + from_str() keeps decode failures distinct from transport errors
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
