//! Catalog schema validation
//!
//! Turns the raw `skills.json` payload into [`SkillRecord`]s. Every record is
//! checked and every failed rule is reported, but a single failure rejects
//! the whole batch: callers never see a partial catalog.

use regex::Regex;
use serde_json::{Map, Value};
use skillindex_types::SkillRecord;
use url::Url;

use crate::error::{CatalogError, ValidationError, ValidationIssue};

/// Allowed characters for `packageName`
const PACKAGE_NAME_PATTERN: &str = r"^[a-z0-9\-_]+$";

/// Loose GitHub check applied to `githubRepoUrl` (host or path)
const GITHUB_MARKER: &str = "github.com";

/// Compiled field rules for catalog records
#[derive(Debug, Clone)]
pub struct SkillSchema {
    package_name_re: Regex,
}

impl SkillSchema {
    /// Compile the schema
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            package_name_re: Regex::new(PACKAGE_NAME_PATTERN)?,
        })
    }

    /// Validate a parsed catalog document
    ///
    /// Returns all records when every one of them passes, otherwise every
    /// issue found across the batch.
    pub fn validate(&self, raw: &Value) -> Result<Vec<SkillRecord>, ValidationError> {
        let Some(entries) = raw.as_array() else {
            return Err(ValidationError {
                issues: vec![ValidationIssue::new(
                    "",
                    format!(
                        "expected an array of skill records, found {}",
                        type_name(raw)
                    ),
                )],
            });
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut issues = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match self.validate_record(index, entry) {
                Ok(record) => records.push(record),
                Err(mut record_issues) => issues.append(&mut record_issues),
            }
        }

        if issues.is_empty() {
            Ok(records)
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Validate one catalog entry located at `index`
    pub fn validate_record(
        &self,
        index: usize,
        raw: &Value,
    ) -> Result<SkillRecord, Vec<ValidationIssue>> {
        let prefix = format!("[{}]", index);
        let Some(object) = raw.as_object() else {
            return Err(vec![ValidationIssue::new(
                prefix,
                format!("expected an object, found {}", type_name(raw)),
            )]);
        };

        let mut check = RecordCheck::new(object, prefix);

        let name = check.required_string("name");
        let package_name = check.required_string("packageName");
        if let Some(package_name) = package_name {
            if !self.package_name_re.is_match(package_name) {
                check.issue(
                    "packageName",
                    "must contain only lowercase letters, numbers, hyphens and underscores",
                );
            }
        }
        let description = check.required_string("description");
        let github_repo_url = check.required_string("githubRepoUrl");
        if let Some(url) = github_repo_url {
            if Url::parse(url).is_err() {
                check.issue("githubRepoUrl", "must be a valid URL");
            }
            if !url.contains(GITHUB_MARKER) {
                check.issue("githubRepoUrl", "must be a GitHub URL");
            }
        }
        let tags = check.string_list("tags");
        let author = check.optional_string("author");

        if !check.issues.is_empty() {
            return Err(check.issues);
        }

        match (name, package_name, description, github_repo_url) {
            (Some(name), Some(package_name), Some(description), Some(github_repo_url)) => {
                Ok(SkillRecord {
                    name: name.to_string(),
                    package_name: package_name.to_string(),
                    description: description.to_string(),
                    github_repo_url: github_repo_url.to_string(),
                    tags,
                    author: author.map(str::to_string),
                })
            }
            // Missing required fields always leave an issue behind
            _ => Err(check.issues),
        }
    }
}

/// Validate a parsed catalog document with a freshly compiled schema
pub fn validate(raw: &Value) -> Result<Vec<SkillRecord>, CatalogError> {
    Ok(SkillSchema::new()?.validate(raw)?)
}

/// Issue collector for the fields of one record
struct RecordCheck<'a> {
    object: &'a Map<String, Value>,
    prefix: String,
    issues: Vec<ValidationIssue>,
}

impl<'a> RecordCheck<'a> {
    fn new(object: &'a Map<String, Value>, prefix: String) -> Self {
        Self {
            object,
            prefix,
            issues: Vec::new(),
        }
    }

    fn issue(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(
            format!("{}.{}", self.prefix, field),
            message,
        ));
    }

    fn required_string(&mut self, field: &str) -> Option<&'a str> {
        let object = self.object;
        match object.get(field) {
            None => {
                self.issue(field, "is required");
                None
            }
            Some(Value::String(value)) if value.is_empty() => {
                self.issue(field, "must not be empty");
                None
            }
            Some(Value::String(value)) => Some(value.as_str()),
            Some(other) => {
                self.issue(field, format!("expected string, found {}", type_name(other)));
                None
            }
        }
    }

    fn optional_string(&mut self, field: &str) -> Option<&'a str> {
        let object = self.object;
        match object.get(field) {
            None => None,
            Some(Value::String(value)) => Some(value.as_str()),
            Some(other) => {
                self.issue(field, format!("expected string, found {}", type_name(other)));
                None
            }
        }
    }

    fn string_list(&mut self, field: &str) -> Vec<String> {
        let object = self.object;
        let items = match object.get(field) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.issue(
                    field,
                    format!("expected array of strings, found {}", type_name(other)),
                );
                return Vec::new();
            }
        };

        let mut values = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(value) => values.push(value.clone()),
                other => self.issue(
                    &format!("{}[{}]", field, i),
                    format!("expected string, found {}", type_name(other)),
                ),
            }
        }
        values
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
