//! Side-by-side comparison of 2-5 entities
//!
//! Each entity gets a weighted score plus a bonus for every compared peer the
//! reasoner says it beats. The best score wins; the result also carries the
//! attribute table, pairwise differences and the relation facts consulted.

use crate::relation::{RelationBonus, RelationLookup};
use crate::round2;
use serde::Serialize;
use smartcompare_core::{
    accessor, attributes, relations, Catalog, Entity, EntityId, Error, Reasoner, Relationship,
    Result, Verdict,
};
use smartcompare_scoring::{ScoreCard, ScoringConfig, ScoringStats, WeightedScorer};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub const MIN_ENTITIES: usize = 2;
pub const MAX_ENTITIES: usize = 5;

/// Rule name reported for better-option facts
pub const BETTER_OPTION_RULE: &str = "best-price";

const SEPARATOR: &str = " | ";

#[derive(Debug, Clone)]
pub struct ComparisonConfig {
    pub bonus: RelationBonus,
    /// Object relations reported between every compared pair
    pub object_relations: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            bonus: RelationBonus::comparison(),
            object_relations: vec![
                relations::TECHNICAL_EQUIVALENT.to_string(),
                relations::SIMILAR.to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityScore {
    pub id: EntityId,
    /// Weighted score plus relation bonus, clamped to [0, 100]
    pub score: f64,
    pub base: ScoreCard,
    pub relation_bonus: f64,
    pub top_factor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetterOptionFact {
    pub better: EntityId,
    pub worse: EntityId,
    pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationFact {
    pub subject: EntityId,
    pub relation: String,
    pub object: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityFact {
    pub first: EntityId,
    pub second: EntityId,
    pub compatible: bool,
    pub incompatible: bool,
    pub relationship: Relationship,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RelationReport {
    pub better_options: Vec<BetterOptionFact>,
    pub object_relations: Vec<RelationFact>,
    pub rules_applied: Vec<String>,
}

impl RelationReport {
    fn apply_rule(&mut self, rule: &str) {
        if !self.rules_applied.iter().any(|r| r == rule) {
            self.rules_applied.push(rule.to_string());
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub entities: Vec<Entity>,
    /// Attribute -> display value per entity, in input order
    pub table: BTreeMap<String, Vec<String>>,
    /// Scores in input order
    pub scores: Vec<EntityScore>,
    pub winner: EntityId,
    pub winner_score: f64,
    pub reason: String,
    /// Only filled when exactly two entities are compared
    pub differences: BTreeMap<String, String>,
    pub relations: RelationReport,
    /// One record per ordered pair
    pub compatibility: Vec<CompatibilityFact>,
    pub stats: ScoringStats,
}

impl ComparisonResult {
    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.scores.iter().find(|s| s.id == id).map(|s| s.score)
    }
}

pub struct ComparisonEngine {
    catalog: Arc<dyn Catalog>,
    reasoner: Arc<dyn Reasoner>,
    scorer: WeightedScorer,
    config: ComparisonConfig,
}

impl ComparisonEngine {
    /// Engine scoring with `scoring`, or the built-in factor table if `None`
    pub fn new(
        catalog: Arc<dyn Catalog>,
        reasoner: Arc<dyn Reasoner>,
        scoring: Option<ScoringConfig>,
    ) -> Self {
        Self {
            catalog,
            reasoner,
            scorer: WeightedScorer::from_optional(scoring),
            config: ComparisonConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ComparisonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scorer(&self) -> &WeightedScorer {
        &self.scorer
    }

    /// Compare 2-5 entities and declare a winner
    pub fn compare<S: AsRef<str>>(&self, ids: &[S]) -> Result<ComparisonResult> {
        let ids: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
        validate_ids(&ids)?;
        tracing::debug!("comparing {:?}", ids);

        let entities = ids
            .iter()
            .map(|id| self.catalog.resolve(id))
            .collect::<Result<Vec<Entity>>>()?;

        let lookup = RelationLookup::new(self.reasoner.as_ref());

        let scores: Vec<EntityScore> = entities
            .iter()
            .map(|entity| self.score_entity(lookup, entity, &ids))
            .collect();

        let mut winner = &scores[0];
        for candidate in &scores[1..] {
            if candidate.score > winner.score {
                winner = candidate;
            }
        }
        let winner_entity = entities
            .iter()
            .find(|e| e.id == winner.id)
            .ok_or_else(|| Error::NotFound(winner.id.clone()))?;

        let relations = self.check_relations(lookup, &ids);
        let reason = justify(winner_entity, winner.score, &relations);
        let cards: Vec<ScoreCard> = scores.iter().map(|s| s.base.clone()).collect();

        Ok(ComparisonResult {
            table: comparison_table(&entities),
            differences: differences(&entities),
            compatibility: check_compatibility(lookup, &ids),
            winner: winner.id.clone(),
            winner_score: winner.score,
            reason,
            relations,
            stats: ScoringStats::compute(&cards),
            scores,
            entities,
        })
    }

    fn score_entity(&self, lookup: RelationLookup<'_>, entity: &Entity, ids: &[&str]) -> EntityScore {
        let base = self.scorer.score(entity);
        let relation_bonus = self.config.bonus.bonus(lookup, &entity.id, ids.iter().copied());
        EntityScore {
            id: entity.id.clone(),
            score: round2((base.total + relation_bonus).clamp(0.0, 100.0)),
            top_factor: base.top_factor().map(str::to_string),
            relation_bonus,
            base,
        }
    }

    fn check_relations(&self, lookup: RelationLookup<'_>, ids: &[&str]) -> RelationReport {
        let mut report = RelationReport::default();

        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                let ordered = match lookup.better_option(a, b) {
                    Verdict::Yes => Some((*a, *b)),
                    Verdict::No => Some((*b, *a)),
                    Verdict::Unknown => None,
                };
                if let Some((better, worse)) = ordered {
                    report.better_options.push(BetterOptionFact {
                        better: better.to_string(),
                        worse: worse.to_string(),
                        rule: BETTER_OPTION_RULE.to_string(),
                    });
                    report.apply_rule(BETTER_OPTION_RULE);
                }

                for relation in &self.config.object_relations {
                    let (subject, object) = if lookup.has_relation(a, relation, b) {
                        (a, b)
                    } else if lookup.has_relation(b, relation, a) {
                        (b, a)
                    } else {
                        continue;
                    };
                    report.object_relations.push(RelationFact {
                        subject: subject.to_string(),
                        relation: relation.clone(),
                        object: object.to_string(),
                    });
                    report.apply_rule(relation);
                }
            }
        }

        report
    }
}

fn validate_ids(ids: &[&str]) -> Result<()> {
    if ids.len() < MIN_ENTITIES {
        return Err(Error::Validation(format!(
            "at least {} entities are required for a comparison, got {}",
            MIN_ENTITIES,
            ids.len()
        )));
    }
    if ids.len() > MAX_ENTITIES {
        return Err(Error::Validation(format!(
            "at most {} entities can be compared, got {}",
            MAX_ENTITIES,
            ids.len()
        )));
    }
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(*id) {
            return Err(Error::Validation(format!("entity '{}' listed more than once", id)));
        }
    }
    Ok(())
}

fn check_compatibility(lookup: RelationLookup<'_>, ids: &[&str]) -> Vec<CompatibilityFact> {
    let mut facts = Vec::new();
    for a in ids {
        for b in ids {
            if a == b {
                continue;
            }
            let compatibility = lookup.compatibility(a, b);
            facts.push(CompatibilityFact {
                first: a.to_string(),
                second: b.to_string(),
                compatible: compatibility.compatible,
                incompatible: compatibility.incompatible,
                relationship: compatibility.relationship(),
            });
        }
    }
    facts
}

/// Union of all attribute keys, each mapped to one display value per entity
pub fn comparison_table(entities: &[Entity]) -> BTreeMap<String, Vec<String>> {
    let keys: BTreeSet<&String> = entities.iter().flat_map(|e| e.attributes.keys()).collect();
    keys.into_iter()
        .map(|key| {
            let values = entities.iter().map(|e| accessor::display(e, key)).collect();
            (key.clone(), values)
        })
        .collect()
}

/// Differing attributes between exactly two entities, with the numeric
/// difference when both values are positive numbers
pub fn differences(entities: &[Entity]) -> BTreeMap<String, String> {
    let mut diffs = BTreeMap::new();
    let [first, second] = entities else {
        return diffs;
    };

    let keys: BTreeSet<&String> = first.attributes.keys().chain(second.attributes.keys()).collect();
    for key in keys {
        let v1 = accessor::display(first, key);
        let v2 = accessor::display(second, key);
        if v1 == v2 {
            continue;
        }

        let n1 = accessor::numeric(first, key);
        let n2 = accessor::numeric(second, key);
        let line = if n1 > 0.0 && n2 > 0.0 {
            let diff = round2(n1 - n2);
            let sign = if diff > 0.0 { "+" } else { "" };
            format!("{} vs {} ({}{})", v1, v2, sign, diff)
        } else {
            format!("{} vs {}", v1, v2)
        };
        diffs.insert(key.clone(), line);
    }
    diffs
}

fn justify(winner: &Entity, score: f64, relations: &RelationReport) -> String {
    let mut reasons = Vec::new();

    if let Some(fact) = relations.better_options.iter().find(|f| f.better == winner.id) {
        reasons.push(format!("Inferred as the better option (rule: {})", fact.rule));
    }

    let price = accessor::numeric(winner, attributes::PRICE);
    if price > 0.0 {
        reasons.push(format!("Price: ${}", price));
    }

    let ram = accessor::numeric(winner, attributes::RAM_GB);
    if ram >= 16.0 {
        reasons.push(format!("High RAM: {}GB", ram));
    }

    let rating = accessor::numeric(winner, attributes::RATING);
    if rating >= 4.5 {
        reasons.push(format!("Excellent rating: {}/5", rating));
    }

    if reasons.is_empty() {
        reasons.push("Best overall score".to_string());
    }
    reasons.push(format!("Total score: {}", score));
    reasons.join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::UnreachableReasoner;
    use smartcompare_core::{Fact, FactStore, InMemoryCatalog};

    fn laptop(id: &str, price: f64, ram: f64, rating: f64) -> Entity {
        Entity::new(id)
            .with_type("Laptop")
            .with_attribute("price", price)
            .with_attribute("ram_gb", ram)
            .with_attribute("rating", rating)
    }

    fn build(entities: Vec<Entity>, facts: FactStore) -> ComparisonEngine {
        ComparisonEngine::new(
            Arc::new(InMemoryCatalog::from_entities(entities)),
            Arc::new(facts),
            None,
        )
    }

    #[test]
    fn test_dominant_entity_wins() {
        let engine = build(
            vec![laptop("A", 1000.0, 16.0, 5.0), laptop("B", 2000.0, 8.0, 3.0)],
            FactStore::new(),
        );
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(result.winner, "A");
        assert!(result.score_of("A").unwrap() > result.score_of("B").unwrap());
        assert_eq!(result.winner_score, result.score_of("A").unwrap());
        assert!(result.reason.contains("High RAM: 16GB"));
        assert!(result.reason.contains("Excellent rating: 5/5"));
        assert!(result.reason.ends_with(&format!("Total score: {}", result.winner_score)));
    }

    #[test]
    fn test_too_few_or_too_many_ids() {
        let engine = build(vec![laptop("A", 1.0, 1.0, 1.0)], FactStore::new());
        assert!(matches!(engine.compare(&["A"]), Err(Error::Validation(_))));
        assert!(matches!(engine.compare::<&str>(&[]), Err(Error::Validation(_))));
        assert!(matches!(
            engine.compare(&["A", "B", "C", "D", "E", "F"]),
            Err(Error::Validation(_))
        ));
        assert!(matches!(engine.compare(&["A", "A"]), Err(Error::Validation(_))));
    }

    #[test]
    fn test_unknown_id_names_it() {
        let engine = build(vec![laptop("A", 1.0, 1.0, 1.0)], FactStore::new());
        match engine.compare(&["A", "ghost"]) {
            Err(Error::NotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected NotFound, got {:?}", other.map(|r| r.winner)),
        }
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        let engine = build(
            vec![laptop("A", 800.0, 8.0, 4.0), laptop("B", 800.0, 8.0, 4.0)],
            FactStore::new(),
        );
        assert_eq!(engine.compare(&["A", "B"]).unwrap().winner, "A");
        assert_eq!(engine.compare(&["B", "A"]).unwrap().winner, "B");
    }

    #[test]
    fn test_relation_bonus_can_flip_winner_and_is_clamped() {
        let facts = FactStore::new();
        facts.assert_fact(Fact::new("B", relations::BETTER_OPTION, "A"));
        let engine = build(
            vec![laptop("A", 900.0, 16.0, 4.6), laptop("B", 1000.0, 16.0, 4.5)],
            facts,
        );
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(result.winner, "B");
        assert!(result.reason.starts_with("Inferred as the better option (rule: best-price)"));
        assert_eq!(
            result.relations.better_options,
            vec![BetterOptionFact {
                better: "B".into(),
                worse: "A".into(),
                rule: BETTER_OPTION_RULE.into(),
            }]
        );
        assert_eq!(result.relations.rules_applied, vec![BETTER_OPTION_RULE.to_string()]);
        assert_eq!(result.scores[1].relation_bonus, crate::relation::COMPARISON_INCREMENT);

        let perfect = laptop("P", 100.0, 64.0, 5.0)
            .with_attribute("storage_gb", 4096.0)
            .with_attribute("battery_mah", 9000.0)
            .with_attribute("screen_resolution", "3840x2160");
        let facts = FactStore::new();
        facts.assert_fact(Fact::new("P", relations::BETTER_OPTION, "A"));
        let engine = build(vec![perfect, laptop("A", 900.0, 16.0, 4.6)], facts);
        assert_eq!(engine.compare(&["P", "A"]).unwrap().score_of("P"), Some(100.0));
    }

    #[test]
    fn test_table_and_differences() {
        let a = laptop("A", 1000.0, 16.0, 4.5).with_attribute("name", "Alpha");
        let b = Entity::new("B")
            .with_attribute("price", vec![1200.0, 1300.0])
            .with_attribute("ram_gb", 16.0)
            .with_attribute("name", "Beta");
        let engine = build(vec![a, b], FactStore::new());
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(result.table["price"], vec!["1000", "1200"]);
        assert_eq!(result.table["rating"], vec!["4.5", "N/A"]);
        assert_eq!(result.differences["price"], "1000 vs 1200 (-200)");
        assert_eq!(result.differences["name"], "Alpha vs Beta");
        assert_eq!(result.differences["rating"], "4.5 vs N/A");
        assert!(!result.differences.contains_key("ram_gb"));
    }

    #[test]
    fn test_positive_difference_sign() {
        let diffs = differences(&[laptop("A", 1500.5, 32.0, 4.0), laptop("B", 1000.0, 16.0, 4.0)]);
        assert_eq!(diffs["price"], "1500.5 vs 1000 (+500.5)");
        assert_eq!(diffs["ram_gb"], "32 vs 16 (+16)");
    }

    #[test]
    fn test_tiny_difference_has_no_negative_zero() {
        let diffs = differences(&[laptop("A", 1000.0, 16.0, 4.0), laptop("B", 1000.001, 16.0, 4.0)]);
        assert!(diffs["price"].ends_with("(0)"), "got {}", diffs["price"]);
    }

    #[test]
    fn test_unreachable_reasoner_falls_back_to_base_scores() {
        let engine = ComparisonEngine::new(
            Arc::new(InMemoryCatalog::from_entities(vec![
                laptop("A", 1000.0, 16.0, 5.0),
                laptop("B", 2000.0, 8.0, 3.0),
            ])),
            Arc::new(UnreachableReasoner),
            None,
        );
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(result.winner, "A");
        assert!(result.scores.iter().all(|s| s.relation_bonus == 0.0));
        assert!(result.scores.iter().all(|s| s.score == round2(s.base.total)));
        assert!(result.relations.better_options.is_empty());
        assert!(result.relations.object_relations.is_empty());
        assert!(result.relations.rules_applied.is_empty());
        assert!(result
            .compatibility
            .iter()
            .all(|c| c.relationship == Relationship::Unknown));
        assert!(!result.reason.contains("Inferred as the better option"));
    }

    #[test]
    fn test_no_differences_beyond_two() {
        let engine = build(
            vec![
                laptop("A", 1.0, 1.0, 1.0),
                laptop("B", 2.0, 2.0, 2.0),
                laptop("C", 3.0, 3.0, 3.0),
            ],
            FactStore::new(),
        );
        let result = engine.compare(&["A", "B", "C"]).unwrap();
        assert!(result.differences.is_empty());
        assert_eq!(result.table["price"].len(), 3);
        assert_eq!(result.scores.len(), 3);
        assert_eq!(result.compatibility.len(), 6);
    }

    #[test]
    fn test_object_relations_and_compatibility() {
        let facts = FactStore::new();
        facts.declare_symmetric(relations::SIMILAR);
        facts.assert_fact(Fact::new("B", relations::SIMILAR, "A"));
        facts.assert_fact(Fact::new("A", relations::COMPATIBLE, "B"));
        let engine = build(
            vec![laptop("A", 1.0, 1.0, 1.0), laptop("B", 2.0, 2.0, 2.0)],
            facts,
        );
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(
            result.relations.object_relations,
            vec![RelationFact {
                subject: "A".into(),
                relation: relations::SIMILAR.into(),
                object: "B".into(),
            }]
        );
        assert_eq!(result.relations.rules_applied, vec![relations::SIMILAR.to_string()]);

        let ab = &result.compatibility[0];
        assert_eq!((ab.first.as_str(), ab.second.as_str()), ("A", "B"));
        assert_eq!(ab.relationship, Relationship::Compatible);
        assert_eq!(result.compatibility[1].relationship, Relationship::Unknown);
    }

    #[test]
    fn test_fallback_justification() {
        let plain = Entity::new("A").with_attribute("battery_mah", 5000.0);
        let weaker = Entity::new("B").with_attribute("battery_mah", 1000.0);
        let engine = build(vec![plain, weaker], FactStore::new());
        let result = engine.compare(&["A", "B"]).unwrap();

        assert_eq!(result.winner, "A");
        assert_eq!(
            result.reason,
            format!("Best overall score | Total score: {}", result.winner_score)
        );
    }

    #[test]
    fn test_custom_scoring_config() {
        use smartcompare_scoring::{Direction, FactorConfig};

        let config = ScoringConfig::new(vec![FactorConfig::numeric(
            "rating", "rating", 1.0, Direction::HigherIsBetter, 5.0,
        )]);
        let engine = ComparisonEngine::new(
            Arc::new(InMemoryCatalog::from_entities(vec![
                laptop("cheap", 100.0, 4.0, 3.0),
                laptop("loved", 3000.0, 4.0, 5.0),
            ])),
            Arc::new(FactStore::new()),
            Some(config),
        );
        let result = engine.compare(&["cheap", "loved"]).unwrap();
        assert_eq!(result.winner, "loved");
        assert_eq!(result.score_of("loved"), Some(100.0));
        assert_eq!(result.scores[1].top_factor.as_deref(), Some("rating"));
    }
}
