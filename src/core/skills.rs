use std::collections::BTreeSet;
use crate::core::error::UNKNOWN_SKILL_TAG;
use crate::models::SkillWarning;

/// Canonical form used for comparing skill tags and locations
#[inline]
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Normalize a list of tags into a set, dropping blanks and duplicates
pub fn normalize_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Controlled vocabulary of skill tags for strict mode
#[derive(Debug, Clone, Default)]
pub struct SkillVocabulary {
    tags: BTreeSet<String>,
}

impl SkillVocabulary {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|tag| normalize_tag(tag.as_ref()))
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, normalized_tag: &str) -> bool {
        self.tags.contains(normalized_tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Skill tags of one profile, split by vocabulary membership
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    /// Tags that may take part in an intersection
    pub known: BTreeSet<String>,
    /// Tags outside the vocabulary; never match anything
    pub unknown: BTreeSet<String>,
}

impl SkillSet {
    /// Build a skill set, checking tags against the vocabulary when one is given
    pub fn build(tags: &[String], vocabulary: Option<&SkillVocabulary>) -> Self {
        let normalized = normalize_tags(tags);
        match vocabulary {
            Some(vocab) => {
                let (known, unknown): (BTreeSet<String>, BTreeSet<String>) = normalized
                    .into_iter()
                    .partition(|tag| vocab.contains(tag));
                Self { known, unknown }
            }
            None => Self {
                known: normalized,
                unknown: BTreeSet::new(),
            },
        }
    }

    /// Number of tags counted as requirements (known and unknown)
    pub fn total(&self) -> usize {
        self.known.len() + self.unknown.len()
    }

    /// One warning per unknown tag
    pub fn warnings(&self, owner_id: &str) -> impl Iterator<Item = SkillWarning> + '_ {
        let owner_id = owner_id.to_string();
        self.unknown.iter().map(move |tag| SkillWarning {
            code: UNKNOWN_SKILL_TAG.to_string(),
            owner_id: owner_id.clone(),
            tag: tag.clone(),
        })
    }
}

/// Skill overlap sub-score (0-1)
///
/// Share of the required tags the student holds. Unknown required tags stay
/// in the denominator and can never be satisfied. No requirements means
/// nothing to fail, so the score is 1.0.
#[inline]
pub fn skill_overlap(student: &SkillSet, required: &SkillSet) -> f64 {
    let total = required.total();
    if total == 0 {
        return 1.0;
    }

    let matched = required.known.intersection(&student.known).count();
    matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_tags_dedupes_case() {
        let set = normalize_tags(&tags(&["React", " react ", "TypeScript", ""]));
        assert_eq!(set.len(), 2);
        assert!(set.contains("react"));
        assert!(set.contains("typescript"));
    }

    #[test]
    fn test_full_overlap() {
        let student = SkillSet::build(&tags(&["React", "TypeScript", "Node.js"]), None);
        let required = SkillSet::build(&tags(&["react", "typescript"]), None);
        assert_eq!(skill_overlap(&student, &required), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        let student = SkillSet::build(&tags(&["Python", "SQL"]), None);
        let required = SkillSet::build(&tags(&["Python", "Machine Learning", "SQL", "R"]), None);
        assert_eq!(skill_overlap(&student, &required), 0.5);
    }

    #[test]
    fn test_no_requirements() {
        let student = SkillSet::build(&tags(&["Go"]), None);
        let required = SkillSet::build(&[], None);
        assert_eq!(skill_overlap(&student, &required), 1.0);
    }

    #[test]
    fn test_unknown_tags_never_match() {
        let vocab = SkillVocabulary::new(["react", "python"]);
        let student = SkillSet::build(&tags(&["React", "Elm"]), Some(&vocab));
        let required = SkillSet::build(&tags(&["React", "Elm"]), Some(&vocab));

        assert_eq!(student.unknown.len(), 1);
        assert_eq!(skill_overlap(&student, &required), 0.5);

        let warnings: Vec<_> = student.warnings("s1").collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "UnknownSkillTag");
        assert_eq!(warnings[0].tag, "elm");
    }
}
