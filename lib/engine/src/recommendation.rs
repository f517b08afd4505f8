//! Preference-based recommendations
//!
//! The catalog is filtered against the user's bounds, every survivor is
//! scored against the preferences, and the best `limit` are returned.

use crate::relation::{RelationBonus, RelationLookup};
use crate::round2;
use serde::{Deserialize, Serialize};
use smartcompare_core::{
    accessor, attributes, Catalog, Entity, EntityFilter, EntityId, Filter, FilterCondition, Reasoner,
};
use std::sync::Arc;

pub const DEFAULT_LIMIT: usize = 5;

/// Type label the reasoner infers for gaming laptops
pub const GAMER_TAG: &str = "GamingLaptop";

const BUDGET_POINTS: f64 = 30.0;
const BUDGET_BONUS: f64 = 10.0;
/// Share of the budget below which a price counts as excellent
const EXCELLENT_BUDGET_USAGE: f64 = 0.7;
const RATING_MULTIPLIER: f64 = 5.0;
const EXCELLENT_RATING: f64 = 4.5;
const RAM_POINTS: f64 = 15.0;
const HIGH_RAM_GB: f64 = 16.0;
const STORAGE_POINTS: f64 = 10.0;
const GAMER_POINTS: f64 = 10.0;
const DISCOUNT_MULTIPLIER: f64 = 0.5;
const WARRANTY_POINTS: f64 = 5.0;
const EXTENDED_WARRANTY_MONTHS: f64 = 24.0;

const MAX_SCORE: f64 = 100.0;
const FALLBACK_REASON: &str = "Meets basic criteria";

/// A user's preference profile. Unset or non-positive bounds impose no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub budget: Option<f64>,
    pub min_budget: Option<f64>,
    pub preferred_category: Option<String>,
    pub min_ram: Option<f64>,
    pub min_storage: Option<f64>,
    pub min_rating: Option<f64>,
}

fn bound(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

impl Preferences {
    pub fn budget(&self) -> Option<f64> {
        bound(self.budget)
    }

    pub fn min_budget(&self) -> Option<f64> {
        bound(self.min_budget)
    }

    pub fn min_ram(&self) -> Option<f64> {
        bound(self.min_ram)
    }

    pub fn min_storage(&self) -> Option<f64> {
        bound(self.min_storage)
    }

    pub fn min_rating(&self) -> Option<f64> {
        bound(self.min_rating)
    }

    pub fn category(&self) -> Option<&str> {
        self.preferred_category.as_deref().filter(|c| !c.is_empty())
    }

    /// Filter rejecting every entity that violates a set bound. Unknown
    /// prices pass the budget bounds.
    pub fn to_filter(&self) -> EntityFilter {
        let mut conditions = Vec::new();

        if let Some(budget) = self.budget() {
            conditions.push(FilterCondition::when_known(
                attributes::PRICE,
                FilterCondition::at_most(attributes::PRICE, budget),
            ));
        }
        if let Some(min) = self.min_budget() {
            conditions.push(FilterCondition::when_known(
                attributes::PRICE,
                FilterCondition::at_least(attributes::PRICE, min),
            ));
        }
        if let Some(category) = self.category() {
            conditions.push(FilterCondition::HasType(category.to_string()));
        }
        if let Some(ram) = self.min_ram() {
            conditions.push(FilterCondition::at_least(attributes::RAM_GB, ram));
        }
        if let Some(storage) = self.min_storage() {
            conditions.push(FilterCondition::at_least(attributes::STORAGE_GB, storage));
        }
        if let Some(rating) = self.min_rating() {
            conditions.push(FilterCondition::at_least(attributes::RATING, rating));
        }

        EntityFilter::new(FilterCondition::And(conditions))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationItem {
    pub entity_id: EntityId,
    pub name: String,
    /// 0-100
    pub score: f64,
    /// Share of the set criteria this entity satisfies, 0-100
    pub match_percentage: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult {
    /// Entities that passed the filter, before truncation
    pub total_matches: usize,
    pub recommendations: Vec<RecommendationItem>,
    pub preferences: Preferences,
}

pub struct RecommendationEngine {
    catalog: Arc<dyn Catalog>,
    reasoner: Arc<dyn Reasoner>,
    bonus: RelationBonus,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn Catalog>, reasoner: Arc<dyn Reasoner>) -> Self {
        Self {
            catalog,
            reasoner,
            bonus: RelationBonus::recommendation(),
        }
    }

    /// Top `limit` entities for `preferences`, best first
    pub fn recommend(&self, preferences: &Preferences, limit: usize) -> RecommendationResult {
        let all = self.catalog.list_all().unwrap_or_else(|e| {
            tracing::warn!("catalog listing failed, nothing to recommend: {}", e);
            Vec::new()
        });

        let filter = preferences.to_filter();
        let survivors: Vec<&Entity> = all.iter().filter(|e| filter.matches(e)).collect();

        let peers: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        let lookup = RelationLookup::new(self.reasoner.as_ref());

        let mut items: Vec<RecommendationItem> = survivors
            .iter()
            .map(|entity| self.score_entity(lookup, entity, preferences, &peers))
            .collect();
        items.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            "{} of {} entities match, returning up to {}",
            survivors.len(),
            all.len(),
            limit
        );

        let total_matches = items.len();
        items.truncate(limit);

        RecommendationResult {
            total_matches,
            recommendations: items,
            preferences: preferences.clone(),
        }
    }

    fn score_entity(
        &self,
        lookup: RelationLookup<'_>,
        entity: &Entity,
        prefs: &Preferences,
        peers: &[&str],
    ) -> RecommendationItem {
        let mut score = 0.0;
        let mut reasons: Vec<String> = Vec::new();
        let mut matched = 0u32;
        let mut criteria = 0u32;

        let price = accessor::numeric(entity, attributes::PRICE);
        if let Some(budget) = prefs.budget() {
            criteria += 1;
            let usage = price / budget;
            if price > 0.0 && usage <= 1.0 {
                matched += 1;
                score += (1.0 - usage * 0.5) * BUDGET_POINTS;
                if usage < EXCELLENT_BUDGET_USAGE {
                    reasons.push(format!("Excellent price (${}, within budget)", price));
                } else {
                    reasons.push(format!("Fair price (${})", price));
                }
            }
        }

        let rating = accessor::numeric(entity, attributes::RATING);
        if let Some(min) = prefs.min_rating() {
            criteria += 1;
            if rating >= min {
                matched += 1;
            }
        }
        if rating > 0.0 {
            score += rating * RATING_MULTIPLIER;
            if rating >= EXCELLENT_RATING {
                reasons.push(format!("Excellent rating ({}/5)", rating));
            }
        }

        let ram = accessor::numeric(entity, attributes::RAM_GB);
        if let Some(min) = prefs.min_ram() {
            criteria += 1;
            if ram >= min {
                matched += 1;
                score += RAM_POINTS;
                if ram >= HIGH_RAM_GB {
                    reasons.push(format!("High RAM ({}GB)", ram));
                }
            }
        }

        if let Some(min) = prefs.min_storage() {
            criteria += 1;
            if accessor::numeric(entity, attributes::STORAGE_GB) >= min {
                matched += 1;
                score += STORAGE_POINTS;
            }
        }

        if entity.has_type(GAMER_TAG) {
            score += GAMER_POINTS;
            reasons.push("Gaming laptop (inferred)".to_string());
        }

        let discount = accessor::numeric(entity, attributes::DISCOUNT_PCT);
        if discount > 0.0 {
            score += discount * DISCOUNT_MULTIPLIER;
            reasons.push(format!("{}% discount", discount));
        }

        let warranty = accessor::numeric(entity, attributes::WARRANTY_MONTHS);
        if warranty >= EXTENDED_WARRANTY_MONTHS {
            score += WARRANTY_POINTS;
            reasons.push(format!("Extended warranty ({} months)", warranty));
        }

        let tally = self.bonus.tally(lookup, &entity.id, peers.iter().copied());
        if !tally.better_than.is_empty() {
            score += tally.bonus;
            reasons.push(format!(
                "Better option than {} similar products",
                tally.better_than.len()
            ));
        }

        if let Some(budget) = prefs.budget() {
            if price <= budget {
                score += BUDGET_BONUS;
                reasons.push("Recommended by budget".to_string());
            }
        }

        let match_percentage = if criteria > 0 {
            f64::from(matched) / f64::from(criteria) * 100.0
        } else {
            0.0
        };
        let reason = if reasons.is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            reasons.join(" | ")
        };

        RecommendationItem {
            entity_id: entity.id.clone(),
            name: entity.name().to_string(),
            score: round2(score).min(MAX_SCORE),
            match_percentage: round2(match_percentage),
            reason,
        }
    }
}
