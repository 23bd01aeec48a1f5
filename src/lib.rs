//! Intern Match - deterministic internship matching service
//!
//! Scores student profiles against internship postings on skills, location
//! preference and a bounded fairness adjustment, then ranks candidates per
//! posting and marks the top `capacity` as accepted.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{validate_weights, MatchEngine, MatchError, RawWeights, WeightConfig};
pub use models::{MatchOutcome, MatchRequest, MatchResult, OpportunityPosting, StudentProfile};
