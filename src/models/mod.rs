// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeValue, MatchOutcome, MatchResult, MatchSummary, OpportunityPosting, Recommendation,
    SkillWarning, StudentProfile, SubScores,
};
pub use requests::{MatchRequest, UpdateWeightsRequest};
pub use responses::{ErrorResponse, HealthResponse};
