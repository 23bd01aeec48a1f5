use crate::core::{
    fairness::{diversity_bonus, MAX_DIVERSITY_BONUS},
    skills::{normalize_tag, skill_overlap, SkillSet},
    weights::WeightConfig,
};
use crate::models::SubScores;

/// Tunable coefficients of the scoring formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Largest diversity bonus, never above [`MAX_DIVERSITY_BONUS`]
    pub max_diversity_bonus: f64,
    /// Sub-scores at or below this are left out of the rationale
    pub rationale_threshold: f64,
}

/// Sub-score a factor must exceed to appear in the rationale
pub const DEFAULT_RATIONALE_THRESHOLD: f64 = 0.1;

impl ScoringParams {
    /// Out-of-range values are clamped; non-finite ones fall back to the defaults
    pub fn new(max_diversity_bonus: f64, rationale_threshold: f64) -> Self {
        let max_diversity_bonus = if max_diversity_bonus.is_finite() {
            max_diversity_bonus
        } else {
            MAX_DIVERSITY_BONUS
        };
        let rationale_threshold = if rationale_threshold.is_finite() {
            rationale_threshold
        } else {
            DEFAULT_RATIONALE_THRESHOLD
        };

        Self {
            max_diversity_bonus: max_diversity_bonus.clamp(0.0, MAX_DIVERSITY_BONUS),
            rationale_threshold: rationale_threshold.clamp(0.0, 1.0),
        }
    }
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self::new(MAX_DIVERSITY_BONUS, DEFAULT_RATIONALE_THRESHOLD)
    }
}

/// Location fit sub-score (0-1)
///
/// 1.0 for the most preferred location, `1 - rank/len` further down the
/// list, 0.0 when the location is not listed at all.
#[inline]
pub fn location_fit(preferences: &[String], location: &str) -> f64 {
    let wanted = normalize_tag(location);
    let len = preferences.len();

    match preferences
        .iter()
        .position(|candidate| normalize_tag(candidate) == wanted)
    {
        Some(0) => 1.0,
        Some(rank) => 1.0 - rank as f64 / len as f64,
        None => 0.0,
    }
}

/// Compute all three sub-scores for one pair
pub fn calculate_sub_scores(
    student_skills: &SkillSet,
    required_skills: &SkillSet,
    location_preference: &[String],
    location: &str,
    under_representation: f64,
    params: &ScoringParams,
) -> SubScores {
    SubScores {
        skills: skill_overlap(student_skills, required_skills),
        location: location_fit(location_preference, location),
        diversity_bonus: diversity_bonus(under_representation, params.max_diversity_bonus),
    }
}

/// Composite match score (0-100)
///
/// score = 100 * (w_skills * skills + w_location * location)
///       + 100 * w_diversity * diversity_bonus
///
/// Clamped to [0, 100] and rounded to two decimals.
pub fn calculate_match_score(sub: &SubScores, weights: &WeightConfig) -> f64 {
    let total_score = 100.0
        * (weights.skills() * sub.skills + weights.location() * sub.location)
        + sub.diversity_bonus * 100.0 * weights.diversity();

    round_score(total_score.clamp(0.0, 100.0))
}

#[inline]
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
