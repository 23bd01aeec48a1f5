use moka::future::Cache;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use crate::core::{fairness::FairnessTable, weights::WeightConfig};
use crate::models::{MatchOutcome, OpportunityPosting, StudentProfile};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// In-process memo of scoring outcomes
///
/// Scoring is pure, so an outcome can be reused for any request with the same
/// students, opportunities, weights and fairness table.
pub struct ResultCache {
    outcomes: Cache<String, Arc<MatchOutcome>>,
    enabled: bool,
}

impl ResultCache {
    /// Create a new result cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let outcomes = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            outcomes,
            enabled: true,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            outcomes: Cache::new(0),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn get(&self, key: &str) -> Option<Arc<MatchOutcome>> {
        if !self.enabled {
            return None;
        }
        let hit = self.outcomes.get(key).await;
        if hit.is_some() {
            tracing::trace!("Result cache hit: {}", key);
        } else {
            tracing::trace!("Result cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, outcome: Arc<MatchOutcome>) {
        if !self.enabled {
            return;
        }
        tracing::trace!("Result cache set: {}", key);
        self.outcomes.insert(key, outcome).await;
    }
}

#[derive(Serialize)]
struct KeyMaterial<'a> {
    students: &'a [StudentProfile],
    opportunities: &'a [OpportunityPosting],
    weights: WeightConfig,
    fairness: Vec<(&'a str, f64)>,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// SHA-256 digest of everything a scoring run depends on
    pub fn matches(
        students: &[StudentProfile],
        opportunities: &[OpportunityPosting],
        weights: &WeightConfig,
        fairness: &FairnessTable,
    ) -> Result<String, CacheError> {
        let material = KeyMaterial {
            students,
            opportunities,
            weights: *weights,
            fairness: fairness.entries().collect(),
        };

        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_vec(&material)?);
        let digest: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();

        Ok(format!("matches:{}", digest))
    }
}
