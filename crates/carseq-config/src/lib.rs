//! Configuration for the CarSeq search core.
//!
//! Load the heuristic's seed, criteria set and mean-constraint policy from
//! TOML or YAML instead of wiring them in code.
//!
//! # Examples
//!
//! ```
//! use carseq_config::{SearchConfig, MeanTargetConfig};
//! use carseq_core::{CriteriaSet, Criterion};
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [value_selection.criteria]
//!     type = "single"
//!     criterion = "load"
//!
//!     [mean_constraint]
//!     mean = 5
//! "#).unwrap();
//!
//! assert_eq!(config.seed(), 7);
//! assert_eq!(
//!     config.value_selection.criteria,
//!     CriteriaSet::Single { criterion: Criterion::Load }
//! );
//! assert_eq!(config.mean_target(), Some(MeanTargetConfig::Fixed(5)));
//! ```

use std::path::Path;

use carseq_core::CriteriaSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Seed used when the configuration leaves `random_seed` unset.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search core configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Seed of the value selector's tie-breaking generator.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Value-ordering configuration.
    #[serde(default)]
    pub value_selection: ValueSelectionConfig,

    /// Mean constraint over the sequence variables, if posted.
    #[serde(default)]
    pub mean_constraint: Option<MeanConstraintConfig>,
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, doesn't parse, or names an
    /// empty criteria set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde can't reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.value_selection
            .criteria
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the criteria set of the value selector.
    pub fn with_criteria(mut self, criteria: CriteriaSet) -> Self {
        self.value_selection.criteria = criteria;
        self
    }

    /// Posts a mean constraint with a fixed mean.
    pub fn with_mean(mut self, mean: i64) -> Self {
        self.mean_constraint = Some(MeanConstraintConfig { mean: Some(mean) });
        self
    }

    /// Posts a mean constraint whose mean is inferred from the initial bounds.
    pub fn with_inferred_mean(mut self) -> Self {
        self.mean_constraint = Some(MeanConstraintConfig { mean: None });
        self
    }

    /// Returns the configured seed, or [`DEFAULT_RANDOM_SEED`].
    pub fn seed(&self) -> u64 {
        self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED)
    }

    /// Returns the mean target, if a mean constraint is configured.
    pub fn mean_target(&self) -> Option<MeanTargetConfig> {
        self.mean_constraint.as_ref().map(|m| match m.mean {
            Some(mean) => MeanTargetConfig::Fixed(mean),
            None => MeanTargetConfig::Inferred,
        })
    }
}

/// Value selector configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ValueSelectionConfig {
    /// Criteria aggregated for each candidate.
    #[serde(default)]
    pub criteria: CriteriaSet,
}

/// Mean constraint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MeanConstraintConfig {
    /// Required mean; when absent the mean is only observed from the lower
    /// bounds on each propagation, never enforced.
    #[serde(default)]
    pub mean: Option<i64>,
}

/// How the mean of a constrained group is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanTargetConfig {
    Fixed(i64),
    Inferred,
}
