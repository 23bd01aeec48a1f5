use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use crate::core::skills::normalize_tag;
use crate::models::AttributeValue;

/// Upper bound for the diversity bonus, as a fraction of a full score
pub const MAX_DIVERSITY_BONUS: f64 = 0.15;

/// Errors loading a fairness table file
#[derive(Debug, Error)]
pub enum FairnessTableError {
    #[error("Failed to read fairness table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fairness table: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct FairnessTableFile {
    #[serde(default)]
    categories: BTreeMap<String, f64>,
}

/// Under-representation weight per demographic category
///
/// Boolean and numeric attributes are looked up by their name, text
/// attributes by `name:value`. Keys are case-insensitive and weights are
/// clamped to [0, 1], so a table can only ever boost a score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FairnessTable {
    weights: BTreeMap<String, f64>,
}

impl FairnessTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let weights = entries
            .into_iter()
            .filter(|(_, weight)| weight.is_finite())
            .map(|(key, weight)| (normalize_tag(key.as_ref()), weight.clamp(0.0, 1.0)))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self { weights }
    }

    /// Parse a TOML document with a `[categories]` table
    pub fn from_toml_str(source: &str) -> Result<Self, FairnessTableError> {
        let file: FairnessTableFile = toml::from_str(source)?;
        Ok(Self::new(file.categories))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FairnessTableError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn weight(&self, key: &str) -> Option<f64> {
        self.weights.get(&normalize_tag(key)).copied()
    }

    /// Entries in key order, used for memoization keys
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(key, weight)| (key.as_str(), *weight))
    }

    /// Total under-representation weight of a student's attributes
    pub fn under_representation(&self, attributes: &BTreeMap<String, AttributeValue>) -> f64 {
        attributes
            .iter()
            .filter(|(_, value)| value.is_present())
            .filter_map(|(name, value)| match value {
                AttributeValue::Text(text) => self.weight(&format!("{}:{}", name, text.trim())),
                AttributeValue::Flag(_) | AttributeValue::Number(_) => self.weight(name),
            })
            .sum()
    }
}

/// Diversity bonus in [0, max_bonus]
///
/// Grows linearly with the student's under-representation weight and
/// saturates once that weight reaches 1.0.
#[inline]
pub fn diversity_bonus(under_representation: f64, max_bonus: f64) -> f64 {
    let max_bonus = max_bonus.clamp(0.0, MAX_DIVERSITY_BONUS);
    if !under_representation.is_finite() || under_representation <= 0.0 {
        return 0.0;
    }
    max_bonus * under_representation.min(1.0)
}
