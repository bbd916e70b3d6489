//! Error types for catalog loading and validation

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single failed field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Location of the offending value, e.g. `[2].packageName`
    pub path: String,
    /// Human readable reason
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue at `path`
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every issue found while validating a catalog batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("catalog validation failed with {} issue(s): {}", .issues.len(), render_issues(.issues))]
pub struct ValidationError {
    /// Issues in record order, then field order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Paths of all failed fields
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.path.as_str())
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        /// Catalog path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog is not JSON
    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog is JSON but violates the record schema
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Schema pattern failed to compile
    #[error("Invalid schema pattern: {0}")]
    Pattern(#[from] regex::Error),
}
