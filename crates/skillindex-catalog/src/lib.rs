//! `SkillIndex` Catalog
//!
//! Loads the curated `skills.json` catalog and answers queries against it.
//!
//! ## Features
//!
//! - Schema validation with per-field issue reporting
//! - Whole-batch rejection: one bad record fails the load
//! - Case-insensitive substring search over name, description and tags
//! - Sitemap and robots.txt rendering for the static site

#![deny(unsafe_code, unused_imports, unused_variables, missing_docs)]

pub mod catalog;
pub mod error;
pub mod schema;
pub mod search;
pub mod seo;

pub use catalog::Catalog;
pub use error::{CatalogError, ValidationError, ValidationIssue};
pub use schema::{validate, SkillSchema};
pub use search::filter_skills;
pub use skillindex_types::SkillRecord;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{filter_skills, validate, Catalog, CatalogError, SkillRecord, SkillSchema};
}
