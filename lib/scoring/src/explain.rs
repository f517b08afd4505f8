//! Explainability for weighted scores
//!
//! A [`ScoreCard`] shows how much each factor contributed to an entity's
//! score, so engines can justify a ranking.

use serde::Serialize;
use std::collections::BTreeMap;

/// A weighted score with its per-factor breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    /// Overall score in [0, 100]
    pub total: f64,
    /// Points contributed by each factor; they sum to `total`
    pub breakdown: BTreeMap<String, f64>,
}

impl ScoreCard {
    /// Factor that contributed the most points, if any contributed at all.
    /// Ties go to the factor name that sorts first.
    pub fn top_factor(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, &points) in &self.breakdown {
            if points <= 0.0 {
                continue;
            }
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((name.as_str(), points));
            }
        }
        best.map(|(name, _)| name)
    }

    pub fn contribution(&self, factor: &str) -> f64 {
        self.breakdown.get(factor).copied().unwrap_or(0.0)
    }
}

/// Summary statistics over a set of score cards
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoringStats {
    pub count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
}

impl ScoringStats {
    pub fn compute(cards: &[ScoreCard]) -> Self {
        if cards.is_empty() {
            return Self {
                count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                worst_score: 0.0,
            };
        }

        let totals = cards.iter().map(|c| c.total);
        Self {
            count: cards.len(),
            avg_score: totals.clone().sum::<f64>() / cards.len() as f64,
            best_score: totals.clone().fold(f64::MIN, f64::max),
            worst_score: totals.fold(f64::MAX, f64::min),
        }
    }
}
