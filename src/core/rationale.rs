use crate::core::{scoring::ScoringParams, weights::WeightConfig};
use crate::models::SubScores;

/// Factors in their fixed tie-break order
const FACTORS: [Factor; 3] = [Factor::Skills, Factor::Location, Factor::Diversity];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Factor {
    Skills,
    Location,
    Diversity,
}

impl Factor {
    fn label(self) -> &'static str {
        match self {
            Factor::Skills => "skills",
            Factor::Location => "location",
            Factor::Diversity => "diversity",
        }
    }
}

/// Turn sub-scores into ordered `"<factor>: <percentage>"` lines
///
/// A factor is listed when its sub-score is above the threshold and it adds
/// points to the composite; the diversity sub-score is the bonus relative to
/// its maximum. Lines are in
/// descending order of points contributed to the composite, ties resolved
/// by skills, location, diversity.
pub fn format_rationale(sub: &SubScores, weights: &WeightConfig, params: &ScoringParams) -> Vec<String> {
    let diversity_strength = if params.max_diversity_bonus > 0.0 {
        (sub.diversity_bonus / params.max_diversity_bonus).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut entries: Vec<(Factor, f64, f64)> = FACTORS
        .iter()
        .map(|&factor| {
            let (sub_score, contribution) = match factor {
                Factor::Skills => (sub.skills, weights.skills() * sub.skills),
                Factor::Location => (sub.location, weights.location() * sub.location),
                Factor::Diversity => (diversity_strength, weights.diversity() * sub.diversity_bonus),
            };
            (factor, sub_score, contribution)
        })
        .filter(|(_, sub_score, contribution)| {
            *sub_score > params.rationale_threshold && *contribution > 0.0
        })
        .collect();

    // Stable sort keeps the fixed factor order for equal contributions
    entries.sort_by(|a, b| b.2.total_cmp(&a.2));

    entries
        .into_iter()
        .map(|(factor, sub_score, _)| format!("{}: {:.0}%", factor.label(), sub_score * 100.0))
        .collect()
}
