//! # SmartCompare Scoring
//!
//! Multi-criteria weighted scoring for catalog entities.
//!
//! ## Features
//!
//! - **Scoring Config**: Declarative factor table (attribute, weight, direction, reference)
//! - **Normalization**: Bounded [0, 1] goodness per factor, for either direction
//! - **Weighted Aggregation**: 0-100 score renormalized by the weights applied
//! - **Explainability**: Per-factor contribution breakdown for transparency
//!
//! ## Example
//!
//! ```rust
//! use smartcompare_core::Entity;
//! use smartcompare_scoring::{Direction, FactorConfig, ScoringConfig, WeightedScorer};
//!
//! let config = ScoringConfig::new(vec![
//!     FactorConfig::numeric("price", "price", 0.6, Direction::LowerIsBetter, 500.0),
//!     FactorConfig::numeric("ram", "ram_gb", 0.4, Direction::HigherIsBetter, 32.0),
//! ]);
//! config.validate().unwrap();
//!
//! let scorer = WeightedScorer::new(config);
//! let card = scorer.score(
//!     &Entity::new("xps13")
//!         .with_attribute("price", 1000.0)
//!         .with_attribute("ram_gb", 16.0),
//! );
//! assert!((card.total - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Config    │────>│  Normalize  │────>│   Scorer    │
//! │  (factors)  │     │ (raw→[0,1]) │     │ (weighted)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │  ScoreCard  │
//!                                         │ (breakdown) │
//!                                         └─────────────┘
//! ```

pub mod config;
pub mod explain;
pub mod normalize;
pub mod scorer;

// Re-export main types for convenience
pub use config::{
    ConfigError,
    Direction,
    FactorConfig,
    FactorKind,
    ScoringConfig,
    REFERENCE_PIXELS,
};
pub use explain::{ScoreCard, ScoringStats};
pub use normalize::{normalize, parse_resolution};
pub use scorer::WeightedScorer;
