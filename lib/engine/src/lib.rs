//! # SmartCompare Engine
//!
//! The three analytical engines built on the weighted scorer and the
//! reasoner's relation facts:
//!
//! - [`ComparisonEngine`] - Pick a winner among 2-5 entities
//! - [`EquivalenceEngine`] - Find substitutable entities
//! - [`RecommendationEngine`] - Rank the catalog against a preference profile
//!
//! Engines hold only their collaborator handles and are safe to share
//! between threads.
//!
//! ## Example
//!
//! ```rust
//! use smartcompare_core::{relations, Entity, Fact, FactStore, InMemoryCatalog};
//! use smartcompare_engine::ComparisonEngine;
//! use std::sync::Arc;
//!
//! let catalog = InMemoryCatalog::from_entities(vec![
//!     Entity::new("a").with_attribute("price", 900.0).with_attribute("ram_gb", 16.0),
//!     Entity::new("b").with_attribute("price", 950.0).with_attribute("ram_gb", 16.0),
//! ]);
//! let facts = FactStore::new();
//! facts.assert_fact(Fact::new("b", relations::BETTER_OPTION, "a"));
//!
//! let engine = ComparisonEngine::new(Arc::new(catalog), Arc::new(facts), None);
//! let result = engine.compare(&["a", "b"]).unwrap();
//! assert_eq!(result.winner, "b");
//! ```

pub mod comparison;
pub mod equivalence;
pub mod recommendation;
pub mod relation;

#[cfg(test)]
mod test_support;

pub use comparison::{
    BetterOptionFact, CompatibilityFact, ComparisonConfig, ComparisonEngine, ComparisonResult,
    EntityScore, RelationFact, RelationReport,
};
pub use equivalence::{
    match_score, CriteriaSummary, EquivalenceConfig, EquivalenceEngine, EquivalenceMatch,
    EquivalenceSearch, MatchScore, MatchType, PairEquivalence,
};
pub use recommendation::{
    Preferences, RecommendationEngine, RecommendationItem, RecommendationResult, DEFAULT_LIMIT,
};
pub use relation::{RelationBonus, RelationLookup, RelationTally};

/// Round to two decimals
pub(crate) fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // drop the sign of a negative zero
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(49.499999), 49.5);
        assert_eq!(round2(-0.004), 0.0);
        assert_eq!(round2(12.3456), 12.35);
        assert!(round2(-0.004).is_sign_positive());
        assert_eq!(format!("{}", round2(-0.001)), "0");
    }
}
