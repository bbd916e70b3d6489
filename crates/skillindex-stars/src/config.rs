//! Configuration types for star lookups

use std::time::Duration;

use serde::Deserialize;

use crate::repo::DEFAULT_API_BASE_URL;

/// Star lookup configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StarsConfig {
    /// GitHub REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Freshness window for cached counts, in hours
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl StarsConfig {
    /// Cache freshness window
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            ttl_hours: default_ttl_hours(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
