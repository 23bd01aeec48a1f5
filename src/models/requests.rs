use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::core::weights::RawWeights;
use crate::models::domain::{OpportunityPosting, StudentProfile};

/// Request to score students against opportunities
///
/// `weights` falls back to the currently configured weights and
/// `fairnessTable` to the configured table when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub students: Vec<StudentProfile>,
    #[serde(default)]
    pub opportunities: Vec<OpportunityPosting>,
    #[serde(default)]
    pub weights: Option<RawWeights>,
    #[serde(default)]
    pub fairness_table: Option<BTreeMap<String, f64>>,
}

/// Request to replace the current weights
pub type UpdateWeightsRequest = RawWeights;
