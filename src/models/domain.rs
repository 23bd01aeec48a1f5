use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Student profile as supplied by the profile store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub skills: Vec<String>,
    #[serde(default)]
    pub location_preference: Vec<String>,
    #[serde(default)]
    pub demographic_attributes: BTreeMap<String, AttributeValue>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub gpa: f64,
    #[serde(default)]
    pub prior_experience_count: u32,
    #[serde(default)]
    pub project_count: u32,
}

/// Internship posting as supplied by the profile store
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityPosting {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub location: String,
    #[validate(range(min = 1))]
    pub capacity: u32,
}

/// Value of a single demographic attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Whether the attribute marks membership of its category at all
    pub fn is_present(&self) -> bool {
        match self {
            AttributeValue::Flag(flag) => *flag,
            AttributeValue::Number(n) => n.is_finite() && *n != 0.0,
            AttributeValue::Text(s) => !s.trim().is_empty(),
        }
    }
}

/// Per-pair sub-scores feeding the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub skills: f64,
    pub location: f64,
    pub diversity_bonus: f64,
}

/// Scored (student, opportunity) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub student_id: String,
    pub opportunity_id: String,
    pub score: f64,
    pub rationale: Vec<String>,
    pub rank: u32,
    pub accepted: bool,
    pub breakdown: SubScores,
}

/// Non-fatal problem found while scoring
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillWarning {
    pub code: String,
    pub owner_id: String,
    pub tag: String,
}

/// Aggregate figures shown on the admin and industry dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total_pairs: usize,
    pub accepted_count: usize,
    pub total_capacity: u64,
    pub unfilled_slots: u64,
    pub mean_score: f64,
    pub mean_accepted_score: f64,
    pub boosted_accepted: usize,
}

/// One opportunity on a student's dashboard, with its "why matched" lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub opportunity_id: String,
    pub score: f64,
    pub rationale: Vec<String>,
    pub rank: u32,
    pub accepted: bool,
}

/// Everything a single scoring run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    /// Per student, best opportunity first
    pub recommendations: BTreeMap<String, Vec<Recommendation>>,
    pub warnings: Vec<SkillWarning>,
    pub summary: MatchSummary,
}
