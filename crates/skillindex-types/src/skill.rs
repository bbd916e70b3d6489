use serde::{Deserialize, Serialize};

/// A validated catalog listing
///
/// Records are produced once by the catalog validator and never mutated.
/// `package_name` is assumed unique across a curated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    pub name: String,
    pub package_name: String,
    pub description: String,
    pub github_repo_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl SkillRecord {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        description: impl Into<String>,
        github_repo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            description: description.into(),
            github_repo_url: github_repo_url.into(),
            tags: Vec::new(),
            author: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}
