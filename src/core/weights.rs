use serde::{Deserialize, Serialize};
use crate::core::error::MatchError;

/// Weights as entered on the admin sliders, any non-negative scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeights {
    pub skills_weight: f64,
    pub location_weight: f64,
    pub diversity_weight: f64,
}

impl RawWeights {
    pub fn new(skills_weight: f64, location_weight: f64, diversity_weight: f64) -> Self {
        Self {
            skills_weight,
            location_weight,
            diversity_weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.skills_weight + self.location_weight + self.diversity_weight
    }
}

impl Default for RawWeights {
    fn default() -> Self {
        Self::new(40.0, 25.0, 35.0)
    }
}

/// Normalized weights; the three fractions sum to 1.0
///
/// Only obtainable through [`validate_weights`], so holding one means the
/// configuration already passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightConfig {
    skills_weight: f64,
    location_weight: f64,
    diversity_weight: f64,
}

impl WeightConfig {
    pub fn skills(&self) -> f64 {
        self.skills_weight
    }

    pub fn location(&self) -> f64 {
        self.location_weight
    }

    pub fn diversity(&self) -> f64 {
        self.diversity_weight
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            skills_weight: 0.40,
            location_weight: 0.25,
            diversity_weight: 0.35,
        }
    }
}

/// Validate raw weights and normalize them to fractions of their sum
pub fn validate_weights(raw: &RawWeights) -> Result<WeightConfig, MatchError> {
    let named = [
        ("skillsWeight", raw.skills_weight),
        ("locationWeight", raw.location_weight),
        ("diversityWeight", raw.diversity_weight),
    ];

    for (name, value) in named {
        if !value.is_finite() {
            return Err(MatchError::InvalidConfiguration(format!(
                "{} must be a finite number",
                name
            )));
        }
        if value < 0.0 {
            return Err(MatchError::InvalidConfiguration(format!(
                "{} must not be negative (got {})",
                name, value
            )));
        }
    }

    let sum = raw.sum();
    if !sum.is_finite() {
        return Err(MatchError::InvalidConfiguration(
            "weight sum overflows".to_string(),
        ));
    }
    if sum <= 0.0 {
        return Err(MatchError::InvalidConfiguration(
            "weights sum to zero, normalization is undefined".to_string(),
        ));
    }

    Ok(WeightConfig {
        skills_weight: raw.skills_weight / sum,
        location_weight: raw.location_weight / sum,
        diversity_weight: raw.diversity_weight / sum,
    })
}
