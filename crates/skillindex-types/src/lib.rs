//! SkillIndex Types - Core types shared across the SkillIndex crates
//!
//! This module defines the catalog record and the persisted star-count cache entry.

mod cache;
mod skill;

pub use cache::{CacheEntry, STAR_CACHE_TTL_MILLIS};
pub use skill::SkillRecord;
