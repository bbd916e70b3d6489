//! Repository coordinates derived from GitHub URLs

use std::fmt;

use url::Url;

/// The only host star counts are looked up for
pub const GITHUB_HOST: &str = "github.com";

/// Default GitHub REST API base
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

const CACHE_KEY_PREFIX: &str = "github-stars:";

/// `owner/repo` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoCoordinates {
    /// Account or organization
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoCoordinates {
    /// Extract coordinates from a repository URL
    ///
    /// The host must be exactly `github.com`; the first two non-empty path
    /// segments are the owner and repository. Anything else yields `None`.
    pub fn from_repo_url(repo_url: &str) -> Option<Self> {
        let url = Url::parse(repo_url).ok()?;
        if url.host_str() != Some(GITHUB_HOST) {
            return None;
        }

        let mut segments = url.path_segments()?.filter(|segment| !segment.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Store key for this repository's cached star count
    ///
    /// Owners and repository names cannot contain `/`, so the key is unique
    /// per pair.
    pub fn cache_key(&self) -> String {
        format!("{}{}/{}", CACHE_KEY_PREFIX, self.owner, self.repo)
    }

    /// Repository endpoint under `api_base_url`
    pub fn api_url(&self, api_base_url: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
