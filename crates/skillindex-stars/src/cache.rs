//! Star count lookups backed by a persistent TTL cache
//!
//! Per call:
//! 1. Derive `owner/repo` from the URL (strict `github.com` host), or give up
//! 2. Return a fresh stored count without touching the network
//! 3. Otherwise fetch once, store the count on success, and return it
//!
//! Every failure path returns `None`; nothing is written unless a numeric
//! `stargazers_count` was received.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use skillindex_persistence::KeyValueStore;
use skillindex_types::{CacheEntry, STAR_CACHE_TTL_MILLIS};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::{GitHubClient, RepoMetadataClient};
use crate::config::StarsConfig;
use crate::error::{Result, StarsError};
use crate::repo::{RepoCoordinates, DEFAULT_API_BASE_URL};

/// Field holding the star count in the repository document
const STARGAZERS_FIELD: &str = "stargazers_count";

/// Cached GitHub star count lookups
pub struct StarCountCache {
    store: Arc<dyn KeyValueStore>,
    client: Arc<dyn RepoMetadataClient>,
    api_base_url: String,
    ttl_millis: i64,
    /// Per-key gates serializing concurrent misses for the same repository
    gates: GateMap,
}

type GateMap = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

fn lock_gates(gates: &GateMap) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
    // The map is never left half-updated, so a poisoned lock is still usable
    gates.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds a per-key gate and drops it from the map once nobody else needs it
///
/// Runs on every exit path, including a lookup future dropped mid-fetch.
struct GateRelease<'a> {
    gates: &'a GateMap,
    key: &'a str,
    gate: Arc<Mutex<()>>,
}

impl Drop for GateRelease<'_> {
    fn drop(&mut self) {
        let mut gates = lock_gates(self.gates);
        // One reference in the map plus ours means nobody else is waiting
        let ours = gates
            .get(self.key)
            .is_some_and(|gate| Arc::ptr_eq(gate, &self.gate));
        if ours && Arc::strong_count(&self.gate) <= 2 {
            gates.remove(self.key);
        }
    }
}

impl StarCountCache {
    /// Create a cache with the default API base and a 24 hour TTL
    pub fn new(store: Arc<dyn KeyValueStore>, client: Arc<dyn RepoMetadataClient>) -> Self {
        Self {
            store,
            client,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ttl_millis: STAR_CACHE_TTL_MILLIS,
            gates: StdMutex::new(HashMap::new()),
        }
    }

    /// Create a cache talking to GitHub as described by `config`
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &StarsConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = GitHubClient::new(config.request_timeout())?;
        Ok(Self::new(store, Arc::new(client))
            .with_api_base_url(&config.api_base_url)
            .with_ttl(config.ttl()))
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Override the freshness window
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self
    }

    /// Star count for a GitHub repository URL
    ///
    /// Returns `None` when the URL is not a `github.com` repository, the API
    /// call fails, or the response carries no usable count.
    pub async fn get_star_count(&self, repo_url: &str) -> Option<u64> {
        let Some(coords) = RepoCoordinates::from_repo_url(repo_url) else {
            debug!("Not a GitHub repository URL: {}", repo_url);
            return None;
        };
        let key = coords.cache_key();

        if let Some(stars) = self.cached(&key).await {
            return Some(stars);
        }

        let release = self.gate(&key);
        let _guard = release.gate.lock().await;
        // Another caller may have refreshed the entry while we waited
        match self.cached(&key).await {
            Some(stars) => Some(stars),
            None => self.refresh(&coords, &key).await,
        }
    }

    /// Like [`get_star_count`](Self::get_star_count), but resolves to `None`
    /// as soon as `cancel` fires
    pub async fn get_star_count_cancellable(
        &self,
        repo_url: &str,
        cancel: &CancellationToken,
    ) -> Option<u64> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Star lookup cancelled for {}", repo_url);
                None
            }
            stars = self.get_star_count(repo_url) => stars,
        }
    }

    /// Remove every cached star count
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be cleared
    pub async fn clear_cache(&self) -> Result<()> {
        self.store.clear().await.map_err(StarsError::Store)
    }

    /// Fresh stored count for `key`, if any
    async fn cached(&self, key: &str) -> Option<u64> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Star cache miss: {}", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read star cache entry {}: {:#}", key, e);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring undecodable star cache entry {}: {}", key, e);
                return None;
            }
        };

        if entry.is_fresh(Utc::now().timestamp_millis(), self.ttl_millis) {
            debug!("Star cache hit: {} = {}", key, entry.star_count);
            Some(entry.star_count)
        } else {
            debug!("Star cache entry expired: {}", key);
            None
        }
    }

    /// Fetch the count from the API and store it on success
    async fn refresh(&self, coords: &RepoCoordinates, key: &str) -> Option<u64> {
        let url = coords.api_url(&self.api_base_url);

        let document = match self.client.fetch_repo(&url).await {
            Ok(document) => document,
            Err(StarsError::Status { status, .. }) => {
                debug!("GitHub API returned {} for {}", status, coords);
                return None;
            }
            Err(e) => {
                warn!("Error fetching GitHub stars for {}: {}", coords, e);
                return None;
            }
        };

        let Some(stars) = document.get(STARGAZERS_FIELD).and_then(Value::as_u64) else {
            debug!("No usable {} in response for {}", STARGAZERS_FIELD, coords);
            return None;
        };

        let entry = CacheEntry::now(stars);
        match serde_json::to_string(&entry) {
            Ok(raw) => {
                if let Err(e) = self.store.set(key, &raw).await {
                    warn!("Failed to write star cache entry {}: {:#}", key, e);
                }
            }
            Err(e) => warn!("Failed to encode star cache entry {}: {}", key, e),
        }

        Some(stars)
    }

    fn gate<'a>(&'a self, key: &'a str) -> GateRelease<'a> {
        let gate = Arc::clone(lock_gates(&self.gates).entry(key.to_string()).or_default());
        GateRelease {
            gates: &self.gates,
            key,
            gate,
        }
    }
}
