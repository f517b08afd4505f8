//! Scoring configuration
//!
//! Declares which attributes matter when scoring an entity, in which
//! direction, against which reference bound, and with what weight.
//! Weights need not sum to 1: the scorer renormalizes by the weights it applies.

use serde::{Deserialize, Serialize};
use smartcompare_core::attributes;
use std::collections::HashMap;
use std::path::Path;

/// Pixel count treated as a perfect screen resolution (3840x2160)
pub const REFERENCE_PIXELS: f64 = 3840.0 * 2160.0;

/// Ordered set of scoring factors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Config version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    pub factors: Vec<FactorConfig>,
}

fn default_version() -> u32 {
    1
}

impl Default for ScoringConfig {
    /// The built-in factor table used whenever no external weights are supplied
    fn default() -> Self {
        Self::new(vec![
            FactorConfig::numeric("price", attributes::PRICE, 0.25, Direction::LowerIsBetter, 500.0),
            FactorConfig::numeric("ram", attributes::RAM_GB, 0.20, Direction::HigherIsBetter, 32.0),
            FactorConfig::numeric("storage", attributes::STORAGE_GB, 0.15, Direction::HigherIsBetter, 1024.0),
            FactorConfig::numeric("rating", attributes::RATING, 0.20, Direction::HigherIsBetter, 5.0),
            FactorConfig::numeric("battery", attributes::BATTERY_MAH, 0.10, Direction::HigherIsBetter, 5000.0),
            FactorConfig::resolution("resolution", attributes::SCREEN_RESOLUTION, 0.10),
        ])
    }
}

impl ScoringConfig {
    pub fn new(factors: Vec<FactorConfig>) -> Self {
        Self { version: 1, factors }
    }

    /// Validate the config
    /// - At least one factor
    /// - No negative weights, and a positive total
    /// - Positive, finite reference bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factors.is_empty() {
            return Err(ConfigError::EmptyConfig);
        }

        for factor in &self.factors {
            if factor.weight < 0.0 || !factor.weight.is_finite() {
                return Err(ConfigError::NegativeWeight(factor.name.clone()));
            }
            if factor.reference <= 0.0 || !factor.reference.is_finite() {
                return Err(ConfigError::InvalidReference(factor.name.clone()));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }

        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.factors.iter().map(|f| f.weight.max(0.0)).sum()
    }

    pub fn get_factor(&self, name: &str) -> Option<&FactorConfig> {
        self.factors.iter().find(|f| f.name == name)
    }

    /// Copy of this config with weights replaced for the named factors.
    ///
    /// Unknown names are ignored and negative weights clamp to zero.
    pub fn with_weights(&self, overrides: &HashMap<String, f64>) -> ScoringConfig {
        let mut config = self.clone();
        for factor in &mut config.factors {
            if let Some(weight) = overrides.get(&factor.name) {
                factor.weight = weight.max(0.0);
            }
        }
        config
    }

    /// Read a weight table: a JSON object mapping factor name to weight
    pub fn load_weights<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&data).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults overridden by the weight table at `path`.
    ///
    /// Falls back to [`ScoringConfig::default`] when there is no path, or
    /// when the table cannot be read or yields an invalid config.
    pub fn from_weights_file(path: Option<&Path>) -> ScoringConfig {
        let defaults = ScoringConfig::default();
        let Some(path) = path else {
            return defaults;
        };

        let config = match Self::load_weights(path) {
            Ok(weights) => defaults.with_weights(&weights),
            Err(e) => {
                tracing::warn!("weight table {:?} unavailable ({}), using default weights", path, e);
                return defaults;
            }
        };

        match config.validate() {
            Ok(()) => {
                tracing::debug!("loaded weight table from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("weight table {:?} rejected ({}), using default weights", path, e);
                defaults
            }
        }
    }
}

/// A single weighted criterion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorConfig {
    /// Name used in score breakdowns and weight tables
    pub name: String,

    /// Entity attribute the factor reads
    pub attribute: String,

    #[serde(default = "default_weight")]
    pub weight: f64,

    pub direction: Direction,

    /// Value treated as perfect: the max for higher-is-better, the min for lower-is-better
    pub reference: f64,

    #[serde(default)]
    pub kind: FactorKind,
}

fn default_weight() -> f64 {
    1.0
}

impl FactorConfig {
    pub fn numeric(
        name: impl Into<String>,
        attribute: impl Into<String>,
        weight: f64,
        direction: Direction,
        reference: f64,
    ) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            weight,
            direction,
            reference,
            kind: FactorKind::Numeric,
        }
    }

    /// A "WxH" screen resolution factor scored on pixel count
    pub fn resolution(name: impl Into<String>, attribute: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            weight,
            direction: Direction::HigherIsBetter,
            reference: REFERENCE_PIXELS,
            kind: FactorKind::Resolution,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// How a factor derives its raw value from the attribute
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FactorKind {
    /// The attribute's numeric value
    #[default]
    Numeric,
    /// Pixel count parsed from a "WxH" string
    Resolution,
}

/// Errors that can occur while loading or validating a scoring config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Scoring config cannot be empty")]
    EmptyConfig,

    #[error("Factor '{0}' has negative weight")]
    NegativeWeight(String),

    #[error("Factor '{0}' needs a positive reference bound")]
    InvalidReference(String),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid weight table: {0}")]
    Parse(String),
}

impl From<ConfigError> for smartcompare_core::Error {
    fn from(e: ConfigError) -> Self {
        smartcompare_core::Error::InvalidConfig(e.to_string())
    }
}
