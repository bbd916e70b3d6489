//! Free-text search over the catalog
//!
//! A linear scan: the catalog is small enough that indexing or ranking would
//! only add surface. Results keep catalog order.

use skillindex_types::SkillRecord;

/// Trim and lower-case a raw query
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Return the records matching `query`, in catalog order
///
/// An empty (or whitespace-only) query returns every record. Otherwise a
/// record matches when the normalized query is a substring of its name, its
/// description, or any of its tags, compared case-insensitively.
pub fn filter_skills<'a>(skills: &'a [SkillRecord], query: &str) -> Vec<&'a SkillRecord> {
    let normalized = normalize_query(query);

    if normalized.is_empty() {
        return skills.iter().collect();
    }

    skills
        .iter()
        .filter(|skill| matches_normalized(skill, &normalized))
        .collect()
}

/// Check a single record against an already normalized query
pub fn matches_normalized(skill: &SkillRecord, normalized: &str) -> bool {
    skill.name.to_lowercase().contains(normalized)
        || skill.description.to_lowercase().contains(normalized)
        || skill
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_skills() -> Vec<SkillRecord> {
        vec![
            SkillRecord::new(
                "React Skill",
                "react-skill",
                "Frontend library",
                "https://github.com/facebook/react",
            )
            .with_tags(["ui", "js"]),
            SkillRecord::new(
                "Vitest Helper",
                "vitest-helper",
                "Testing utility",
                "https://github.com/vitest-dev/vitest",
            )
            .with_tags(["test"]),
            SkillRecord::new(
                "Bare Skill",
                "bare-skill",
                "No tags at all",
                "https://github.com/example/bare",
            ),
        ]
    }

    fn names<'a>(records: &[&'a SkillRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let skills = sample_skills();
        let result = filter_skills(&skills, "");
        assert_eq!(result.len(), skills.len());
        assert!(result.iter().zip(skills.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let skills = sample_skills();
        assert_eq!(filter_skills(&skills, "   \t").len(), 3);
    }

    #[test]
    fn test_filters_by_name() {
        let skills = sample_skills();
        assert_eq!(names(&filter_skills(&skills, "react")), vec!["React Skill"]);
    }

    #[test]
    fn test_filters_by_description() {
        let skills = sample_skills();
        assert_eq!(
            names(&filter_skills(&skills, "utility")),
            vec!["Vitest Helper"]
        );
    }

    #[test]
    fn test_filters_by_tags() {
        let skills = sample_skills();
        assert_eq!(names(&filter_skills(&skills, "js")), vec!["React Skill"]);
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let skills = sample_skills();
        assert_eq!(
            names(&filter_skills(&skills, "  VITEST ")),
            vec!["Vitest Helper"]
        );
    }

    #[test]
    fn test_preserves_catalog_order() {
        let skills = sample_skills();
        assert_eq!(
            names(&filter_skills(&skills, "skill")),
            vec!["React Skill", "Bare Skill"]
        );
    }

    #[test]
    fn test_no_match() {
        let skills = sample_skills();
        assert!(filter_skills(&skills, "nonexistent").is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter_skills(&[], "anything").is_empty());
        assert!(filter_skills(&[], "").is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let skills = sample_skills();
        for query in ["", "skill", "t", "JS", "zzz"] {
            let once: Vec<SkillRecord> = filter_skills(&skills, query)
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<SkillRecord> = filter_skills(&once, query)
                .into_iter()
                .cloned()
                .collect();
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn test_every_field_substring_matches() {
        let skills = sample_skills();
        for skill in &skills {
            let mut probes = vec![
                skill.name[1..4].to_string(),
                skill.description[2..6].to_uppercase(),
            ];
            probes.extend(skill.tags.iter().cloned());
            for probe in probes {
                assert!(
                    filter_skills(&skills, &probe).contains(&skill),
                    "{probe:?} should match {}",
                    skill.name
                );
            }
        }
    }
}
