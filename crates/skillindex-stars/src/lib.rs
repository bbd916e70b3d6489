//! `SkillIndex` Star Counts
//!
//! Looks up GitHub star counts for catalog listings and keeps them in a
//! durable cache so repeated views of the same repository stay off the
//! network for a day.
//!
//! ## Features
//!
//! - Strict `github.com` host matching and `owner/repo` extraction
//! - 24 hour freshness window (configurable)
//! - Pluggable storage via [`KeyValueStore`](skillindex_persistence::KeyValueStore)
//! - Bounded request timeout, cancellation, and single-flight per repository
//! - Failures degrade to "no star count" and never reach the caller

#![deny(unsafe_code, unused_imports, unused_variables, missing_docs)]

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod repo;

pub use cache::StarCountCache;
pub use client::{GitHubClient, RepoMetadataClient};
pub use config::StarsConfig;
pub use error::StarsError;
pub use repo::RepoCoordinates;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{GitHubClient, RepoMetadataClient, StarCountCache, StarsConfig, StarsError};
}
