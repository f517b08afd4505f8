//! # SmartCompare
//!
//! A multi-criteria scoring and matching engine for product catalogs.
//!
//! SmartCompare normalizes heterogeneous attributes (price, RAM, rating,
//! screen resolution...) into one weighted 0-100 score, and layers three
//! analyses on top of it, each enriched with relation facts from a
//! reasoning collaborator:
//!
//! - **Comparison**: pick a winner among 2-5 entities, with a justification
//! - **Equivalence**: find substitutable entities and judge pairs
//! - **Recommendation**: rank the catalog against a preference profile
//!
//! ## Quick Start
//!
//! ### As a Command
//!
//! ```bash
//! smartcompare --catalog catalog.json compare xps13 macbook-air
//! smartcompare --catalog catalog.json recommend --budget 1200 --min-ram 16
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use smartcompare::prelude::*;
//! use std::sync::Arc;
//!
//! let snapshot = CatalogSnapshot::from_json(r#"{
//!     "entities": [
//!         {"id": "a", "types": ["Laptop"], "attributes": {"price": 900, "ram_gb": 16}},
//!         {"id": "b", "types": ["Laptop"], "attributes": {"price": 1400, "ram_gb": 8}}
//!     ]
//! }"#).unwrap();
//! let (catalog, facts) = snapshot.into_collaborators();
//! let catalog: Arc<dyn Catalog> = Arc::new(catalog);
//! let reasoner: Arc<dyn Reasoner> = Arc::new(facts);
//!
//! let comparison = ComparisonEngine::new(catalog.clone(), reasoner.clone(), None);
//! assert_eq!(comparison.compare(&["a", "b"]).unwrap().winner, "a");
//!
//! let recommendation = RecommendationEngine::new(catalog, reasoner);
//! let prefs = Preferences { budget: Some(1000.0), ..Preferences::default() };
//! assert_eq!(recommendation.recommend(&prefs, 5).total_matches, 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `smartcompare-core` - Entities, attribute access, filters, Catalog/Reasoner seams
//! - `smartcompare-scoring` - Factor table, normalization, weighted scorer
//! - `smartcompare-engine` - Comparison, equivalence and recommendation engines

// Re-export core types
pub use smartcompare_core::{
    accessor, attributes, relations,
    Catalog, CatalogSnapshot, InMemoryCatalog,
    Entity, EntityId, AttributeValue,
    Fact, FactStore, Reasoner, Verdict, Compatibility, Relationship,
    EntityFilter, Filter, FilterCondition,
    Error, Result,
};

// Re-export scoring
pub use smartcompare_scoring::{
    ConfigError, Direction, FactorConfig, FactorKind, ScoreCard, ScoringConfig, ScoringStats,
    WeightedScorer,
};

// Re-export engines
pub use smartcompare_engine::{
    ComparisonConfig, ComparisonEngine, ComparisonResult,
    EquivalenceConfig, EquivalenceEngine, EquivalenceMatch, EquivalenceSearch, MatchType,
    PairEquivalence,
    Preferences, RecommendationEngine, RecommendationItem, RecommendationResult, DEFAULT_LIMIT,
    RelationBonus,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogSnapshot, InMemoryCatalog,
        Entity, EntityId,
        Fact, FactStore, Reasoner,
        Error, Result,
        ScoringConfig, WeightedScorer,
        ComparisonEngine, EquivalenceEngine, RecommendationEngine, Preferences,
    };
}
