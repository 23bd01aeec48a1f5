use tokio::sync::RwLock;
use crate::core::{
    error::MatchError,
    weights::{validate_weights, RawWeights, WeightConfig},
};

/// Current weight settings, adjustable from the admin panel
pub struct WeightStore {
    current: RwLock<WeightConfig>,
}

impl WeightStore {
    pub fn new(initial: WeightConfig) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Seed the store from raw configured weights
    pub fn from_raw(raw: &RawWeights) -> Result<Self, MatchError> {
        Ok(Self::new(validate_weights(raw)?))
    }

    pub async fn current(&self) -> WeightConfig {
        *self.current.read().await
    }

    /// Validate and install new weights, returning the normalized form
    ///
    /// Invalid weights leave the current configuration untouched.
    pub async fn update(&self, raw: &RawWeights) -> Result<WeightConfig, MatchError> {
        let validated = validate_weights(raw)?;
        *self.current.write().await = validated;
        Ok(validated)
    }
}

impl Default for WeightStore {
    fn default() -> Self {
        Self::new(WeightConfig::default())
    }
}
