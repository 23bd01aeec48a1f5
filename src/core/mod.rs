// Core algorithm exports
pub mod error;
pub mod fairness;
pub mod matcher;
pub mod rationale;
pub mod ranking;
pub mod recommendations;
pub mod scoring;
pub mod skills;
pub mod summary;
pub mod weights;

pub use error::MatchError;
pub use fairness::{diversity_bonus, FairnessTable, MAX_DIVERSITY_BONUS};
pub use matcher::MatchEngine;
pub use rationale::format_rationale;
pub use recommendations::recommend;
pub use scoring::{calculate_match_score, location_fit, ScoringParams};
pub use skills::{skill_overlap, SkillSet, SkillVocabulary};
pub use weights::{validate_weights, RawWeights, WeightConfig};
