use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use crate::core::{
    fairness::{FairnessTable, FairnessTableError, MAX_DIVERSITY_BONUS},
    matcher::{MatchEngine, DEFAULT_PARALLEL_THRESHOLD},
    scoring::{ScoringParams, DEFAULT_RATIONALE_THRESHOLD},
    skills::SkillVocabulary,
    weights::RawWeights,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub fairness: FairnessSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Largest accepted JSON body in bytes
    pub json_limit_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_entries(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_true() -> bool { true }
fn default_cache_entries() -> u64 { 256 }
fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Warn about and ignore skill tags outside `skill_vocabulary`
    #[serde(default)]
    pub strict_skills: bool,
    #[serde(default)]
    pub skill_vocabulary: Vec<String>,
    #[serde(default = "default_max_diversity_bonus")]
    pub max_diversity_bonus: f64,
    #[serde(default = "default_rationale_threshold")]
    pub rationale_threshold: f64,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strict_skills: false,
            skill_vocabulary: Vec::new(),
            max_diversity_bonus: default_max_diversity_bonus(),
            rationale_threshold: default_rationale_threshold(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_max_diversity_bonus() -> f64 { MAX_DIVERSITY_BONUS }
fn default_rationale_threshold() -> f64 { DEFAULT_RATIONALE_THRESHOLD }
fn default_parallel_threshold() -> usize { DEFAULT_PARALLEL_THRESHOLD }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Initial weights, on the admin panel's percentage scale
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_diversity_weight")]
    pub diversity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            location: default_location_weight(),
            diversity: default_diversity_weight(),
        }
    }
}

impl WeightsConfig {
    pub fn to_raw(&self) -> RawWeights {
        RawWeights::new(self.skills, self.location, self.diversity)
    }
}

fn default_skills_weight() -> f64 { 40.0 }
fn default_location_weight() -> f64 { 25.0 }
fn default_diversity_weight() -> f64 { 35.0 }

/// Under-representation table, inline or from a separate TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FairnessSettings {
    #[serde(default)]
    pub table: BTreeMap<String, f64>,
    pub table_path: Option<String>,
}

impl FairnessSettings {
    /// Inline entries win over entries from `table_path`
    pub fn load_table(&self) -> Result<FairnessTable, FairnessTableError> {
        let mut entries: BTreeMap<String, f64> = match &self.table_path {
            Some(path) => FairnessTable::load(path)?
                .entries()
                .map(|(key, weight)| (key.to_string(), weight))
                .collect(),
            None => BTreeMap::new(),
        };
        entries.extend(self.table.iter().map(|(k, v)| (k.clone(), *v)));
        Ok(FairnessTable::new(entries))
    }
}

/// Errors turning settings into a matching engine
#[derive(Debug, Error)]
pub enum EngineConfigError {
    #[error("matching.{0} must be a finite number")]
    NonFinite(&'static str),

    #[error(transparent)]
    Fairness(#[from] FairnessTableError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTERNMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTERNMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Build the engine described by the matching and fairness sections
    pub fn build_engine(&self) -> Result<MatchEngine, EngineConfigError> {
        if !self.matching.max_diversity_bonus.is_finite() {
            return Err(EngineConfigError::NonFinite("max_diversity_bonus"));
        }
        if !self.matching.rationale_threshold.is_finite() {
            return Err(EngineConfigError::NonFinite("rationale_threshold"));
        }

        let params = ScoringParams::new(
            self.matching.max_diversity_bonus,
            self.matching.rationale_threshold,
        );

        let mut engine = MatchEngine::new(params)
            .with_fairness_table(self.fairness.load_table()?)
            .with_parallel_threshold(self.matching.parallel_threshold);

        if self.matching.strict_skills {
            let vocabulary = SkillVocabulary::new(&self.matching.skill_vocabulary);
            if vocabulary.is_empty() {
                tracing::warn!("Strict skill mode with an empty vocabulary, every tag will be unknown");
            }
            engine = engine.with_vocabulary(vocabulary);
        }

        Ok(engine)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("INTERNMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
