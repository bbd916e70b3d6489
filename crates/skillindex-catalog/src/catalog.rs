//! In-memory catalog of validated skill records

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use skillindex_types::SkillRecord;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::schema::SkillSchema;
use crate::search::filter_skills;

/// Validated catalog held for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<SkillRecord>,
}

impl Catalog {
    /// Wrap records that were already validated
    pub fn new(records: Vec<SkillRecord>) -> Self {
        Self { records }
    }

    /// Validate a parsed catalog document
    pub fn from_value(raw: &Value) -> Result<Self, CatalogError> {
        let records = SkillSchema::new()?.validate(raw)?;
        Ok(Self::new(records))
    }

    /// Parse and validate catalog JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Value = serde_json::from_str(json)?;
        Self::from_value(&raw)
    }

    /// Read, parse and validate a catalog file
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        debug!("Loading catalog from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json_str(&content)?;
        info!("Loaded {} skills from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// All records in catalog order
    pub fn records(&self) -> &[SkillRecord] {
        &self.records
    }

    /// Find a record by its package name
    pub fn get(&self, package_name: &str) -> Option<&SkillRecord> {
        self.records
            .iter()
            .find(|record| record.package_name == package_name)
    }

    /// Records matching a free-text query, see [`filter_skills`]
    pub fn search(&self, query: &str) -> Vec<&SkillRecord> {
        filter_skills(&self.records, query)
    }

    /// Package names used by more than one record, in first-seen order
    ///
    /// Uniqueness is a curation rule the schema does not enforce.
    pub fn duplicate_package_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.package_name.as_str()).or_default() += 1;
        }

        let mut duplicates = Vec::new();
        for record in &self.records {
            let name = record.package_name.as_str();
            if counts.get(name).is_some_and(|count| *count > 1) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    /// Get number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER_CATALOG: &str = r#"[
        {
            "name": "Weather Assistant",
            "packageName": "weather-assistant",
            "description": "Provides weather updates.",
            "githubRepoUrl": "https://github.com/example/weather",
            "tags": ["utility"],
            "author": "Sky"
        }
    ]"#;

    #[test]
    fn test_catalog_new() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_from_json_str_and_get() {
        let catalog = Catalog::from_json_str(WEATHER_CATALOG).unwrap();
        assert_eq!(catalog.len(), 1);

        let skill = catalog.get("weather-assistant").unwrap();
        assert_eq!(skill.author.as_deref(), Some("Sky"));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_search_weather_catalog() {
        let catalog = Catalog::from_json_str(WEATHER_CATALOG).unwrap();
        assert_eq!(catalog.search("weather").len(), 1);
        assert!(catalog.search("nonexistent").is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = Catalog::from_json_str("[{").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_duplicate_package_names() {
        let catalog = Catalog::new(vec![
            SkillRecord::new("A", "dup", "a", "https://github.com/a/a"),
            SkillRecord::new("B", "unique", "b", "https://github.com/b/b"),
            SkillRecord::new("C", "dup", "c", "https://github.com/c/c"),
            SkillRecord::new("D", "dup", "d", "https://github.com/d/d"),
        ]);
        assert_eq!(catalog.duplicate_package_names(), vec!["dup"]);
    }
}
