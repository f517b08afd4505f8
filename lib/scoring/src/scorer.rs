//! Weighted multi-criteria scorer
//!
//! Aggregates the normalized value of every configured factor into one
//! 0-100 score with a per-factor breakdown.

use crate::config::{FactorConfig, FactorKind, ScoringConfig};
use crate::explain::ScoreCard;
use crate::normalize::{normalize, resolution_pixels};
use smartcompare_core::{accessor, Entity};
use std::collections::{BTreeMap, HashMap};

/// Scorer that computes weighted scores for entities
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    config: ScoringConfig,
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl WeightedScorer {
    /// Create a new scorer with the given config
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Scorer for a caller-supplied config, or the built-in defaults when
    /// none was supplied
    pub fn from_optional(config: Option<ScoringConfig>) -> Self {
        Self::new(config.unwrap_or_default())
    }

    /// Get a reference to the config
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score an entity.
    ///
    /// Each factor's normalized value is weighted, and the weighted sum is
    /// divided by the total weight applied, so the result always lies in
    /// [0, 100]. Factors with non-positive weight are skipped.
    pub fn score(&self, entity: &Entity) -> ScoreCard {
        let mut weighted: Vec<(&str, f64)> = Vec::with_capacity(self.config.factors.len());
        let mut total_score = 0.0f64;
        let mut total_weight = 0.0f64;

        for factor in &self.config.factors {
            if !(factor.weight > 0.0) {
                continue;
            }
            let contribution = self.factor_fraction(entity, factor) * factor.weight;
            weighted.push((factor.name.as_str(), contribution));
            total_score += contribution;
            total_weight += factor.weight;
        }

        if total_weight <= 0.0 {
            return ScoreCard::default();
        }

        let breakdown: BTreeMap<String, f64> = weighted
            .into_iter()
            .map(|(name, contribution)| (name.to_string(), contribution / total_weight * 100.0))
            .collect();

        ScoreCard {
            total: (total_score / total_weight * 100.0).clamp(0.0, 100.0),
            breakdown,
        }
    }

    /// Normalized [0, 1] value of a single factor
    fn factor_fraction(&self, entity: &Entity, factor: &FactorConfig) -> f64 {
        let raw = match factor.kind {
            FactorKind::Numeric => accessor::numeric(entity, &factor.attribute),
            FactorKind::Resolution => resolution_pixels(entity, &factor.attribute),
        };
        normalize(raw, factor.reference, factor.direction)
    }

    /// Create a new scorer with custom weight overrides
    ///
    /// Overrides replace config weights for the named factors; unknown
    /// names are silently ignored.
    pub fn with_weights(&self, weight_overrides: &HashMap<String, f64>) -> WeightedScorer {
        WeightedScorer::new(self.config.with_weights(weight_overrides))
    }
}
