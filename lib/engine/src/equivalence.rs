//! Equivalence detection
//!
//! Two entities are equivalent when they are substitutable: same category
//! and close enough on the secondary attributes. Equivalents come from three
//! sources, merged with priority explicit > similar > auto-detected.

use crate::relation::RelationLookup;
use ahash::AHashMap;
use serde::Serialize;
use smartcompare_core::{accessor, attributes, relations, Catalog, Entity, EntityId, Reasoner, Result};
use std::sync::Arc;

pub const EXPLICIT_CONFIDENCE: u32 = 100;
pub const SIMILAR_CONFIDENCE: u32 = 80;

const CATEGORY_POINTS: u32 = 20;
const IDENTICAL_SPEC_POINTS: u32 = 25;
const CLOSE_SPEC_POINTS: u32 = 15;
const PRICE_POINTS: u32 = 15;
const SCREEN_POINTS: u32 = 15;

const RAM_TOLERANCE: f64 = 2.0;
const STORAGE_TOLERANCE: f64 = 128.0;
/// Fraction of the larger price
const PRICE_TOLERANCE: f64 = 0.20;
const SCREEN_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct EquivalenceConfig {
    /// Known category labels, in lookup order
    pub categories: Vec<String>,
    /// Minimum match score for an automatic equivalence
    pub threshold: u32,
    pub equivalence_relation: String,
    pub similarity_relation: String,
}

impl Default for EquivalenceConfig {
    fn default() -> Self {
        Self {
            categories: ["Laptop", "Smartphone", "Tablet", "Desktop"]
                .into_iter()
                .map(String::from)
                .collect(),
            threshold: 70,
            equivalence_relation: relations::TECHNICAL_EQUIVALENT.to_string(),
            similarity_relation: relations::SIMILAR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Explicit,
    Similar,
    AutoDetected,
    None,
}

/// Substitutability of two entities, 0-100, with the factors that added up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub score: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquivalenceMatch {
    pub entity_id: EntityId,
    pub peer_id: EntityId,
    pub peer_name: String,
    pub category: Option<String>,
    pub price: f64,
    pub match_score: u32,
    pub match_type: MatchType,
    pub reasons: Vec<String>,
    pub confidence: u32,
}

/// Candidate counts per source, before merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriteriaSummary {
    pub explicit: usize,
    pub similar: usize,
    pub auto_detected: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquivalenceSearch {
    pub entity_id: EntityId,
    pub entity_name: String,
    pub total_equivalents: usize,
    /// Sorted by confidence, highest first
    pub equivalents: Vec<EquivalenceMatch>,
    pub criteria_summary: CriteriaSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairEquivalence {
    pub entity_id: EntityId,
    pub entity_name: String,
    pub equivalent: bool,
    #[serde(rename = "match")]
    pub matched: EquivalenceMatch,
    pub recommendation: String,
}

pub struct EquivalenceEngine {
    catalog: Arc<dyn Catalog>,
    reasoner: Arc<dyn Reasoner>,
    config: EquivalenceConfig,
}

impl EquivalenceEngine {
    pub fn new(catalog: Arc<dyn Catalog>, reasoner: Arc<dyn Reasoner>) -> Self {
        Self {
            catalog,
            reasoner,
            config: EquivalenceConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EquivalenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EquivalenceConfig {
        &self.config
    }

    pub fn match_score(&self, a: &Entity, b: &Entity) -> MatchScore {
        match_score(a, b, &self.config.categories)
    }

    /// All equivalents of `id`, merged from the reasoner's explicit and
    /// similarity relations and from automatic attribute matching
    pub fn find_equivalents(&self, id: &str) -> Result<EquivalenceSearch> {
        let source = self.catalog.resolve(id)?;
        let lookup = RelationLookup::new(self.reasoner.as_ref());

        let auto = self.auto_detect(&source);
        let similar: Vec<EquivalenceMatch> = lookup
            .symmetric_peers(&source.id, &self.config.similarity_relation)
            .into_iter()
            .map(|peer| {
                self.reasoner_match(
                    &source,
                    peer,
                    MatchType::Similar,
                    SIMILAR_CONFIDENCE,
                    "similar product according to the reasoner",
                )
            })
            .collect();
        let explicit: Vec<EquivalenceMatch> = lookup
            .symmetric_peers(&source.id, &self.config.equivalence_relation)
            .into_iter()
            .map(|peer| {
                self.reasoner_match(
                    &source,
                    peer,
                    MatchType::Explicit,
                    EXPLICIT_CONFIDENCE,
                    "technical equivalence asserted by the reasoner",
                )
            })
            .collect();

        let criteria_summary = CriteriaSummary {
            explicit: explicit.len(),
            similar: similar.len(),
            auto_detected: auto.len(),
        };
        let equivalents = merge(auto, similar, explicit);
        tracing::debug!(
            "found {} equivalents for '{}' ({:?})",
            equivalents.len(),
            source.id,
            criteria_summary
        );

        Ok(EquivalenceSearch {
            entity_name: source.name().to_string(),
            entity_id: source.id,
            total_equivalents: equivalents.len(),
            equivalents,
            criteria_summary,
        })
    }

    /// Whether `first` and `second` are equivalent, with a buying recommendation
    pub fn compare_pair(&self, first: &str, second: &str) -> Result<PairEquivalence> {
        let a = self.catalog.resolve(first)?;
        let b = self.catalog.resolve(second)?;
        let lookup = RelationLookup::new(self.reasoner.as_ref());

        let relation = &self.config.equivalence_relation;
        let explicit =
            lookup.has_relation(&a.id, relation, &b.id) || lookup.has_relation(&b.id, relation, &a.id);
        let MatchScore { score, reasons } = self.match_score(&a, &b);

        let match_type = if explicit {
            MatchType::Explicit
        } else if score >= self.config.threshold {
            MatchType::AutoDetected
        } else {
            MatchType::None
        };
        let recommendation = self.recommend_between(&a, &b, score, explicit);

        Ok(PairEquivalence {
            entity_name: a.name().to_string(),
            equivalent: explicit || score >= self.config.threshold,
            matched: EquivalenceMatch {
                entity_id: a.id.clone(),
                peer_id: b.id.clone(),
                peer_name: b.name().to_string(),
                category: b.category(&self.config.categories).map(str::to_string),
                price: accessor::numeric(&b, attributes::PRICE),
                match_score: score,
                match_type,
                reasons,
                confidence: if explicit { EXPLICIT_CONFIDENCE } else { score },
            },
            entity_id: a.id,
            recommendation,
        })
    }

    fn auto_detect(&self, source: &Entity) -> Vec<EquivalenceMatch> {
        if source.category(&self.config.categories).is_none()
            || accessor::numeric(source, attributes::PRICE) <= 0.0
        {
            return Vec::new();
        }

        let candidates = self.catalog.list_all().unwrap_or_else(|e| {
            tracing::warn!("catalog listing failed, skipping auto-detection: {}", e);
            Vec::new()
        });

        candidates
            .iter()
            .filter(|candidate| candidate.id != source.id)
            .filter_map(|candidate| {
                let MatchScore { score, reasons } = self.match_score(source, candidate);
                (score >= self.config.threshold).then(|| EquivalenceMatch {
                    entity_id: source.id.clone(),
                    peer_id: candidate.id.clone(),
                    peer_name: candidate.name().to_string(),
                    category: candidate.category(&self.config.categories).map(str::to_string),
                    price: accessor::numeric(candidate, attributes::PRICE),
                    match_score: score,
                    match_type: MatchType::AutoDetected,
                    reasons,
                    confidence: score,
                })
            })
            .collect()
    }

    fn reasoner_match(
        &self,
        source: &Entity,
        peer_id: EntityId,
        match_type: MatchType,
        confidence: u32,
        reason: &str,
    ) -> EquivalenceMatch {
        let peer = self.catalog.get_by_id(&peer_id).unwrap_or_else(|e| {
            tracing::warn!("catalog lookup of '{}' failed: {}", peer_id, e);
            None
        });
        let (peer_name, category, price) = match &peer {
            Some(p) => (
                p.name().to_string(),
                p.category(&self.config.categories).map(str::to_string),
                accessor::numeric(p, attributes::PRICE),
            ),
            None => (peer_id.clone(), None, 0.0),
        };

        EquivalenceMatch {
            entity_id: source.id.clone(),
            peer_id,
            peer_name,
            category,
            price,
            match_score: confidence,
            match_type,
            reasons: vec![reason.to_string()],
            confidence,
        }
    }

    fn recommend_between(&self, a: &Entity, b: &Entity, score: u32, explicit: bool) -> String {
        if explicit {
            return "Marked as technical equivalents by the reasoner".to_string();
        }
        if score >= 90 {
            let p1 = accessor::numeric(a, attributes::PRICE);
            let p2 = accessor::numeric(b, attributes::PRICE);
            if p1 > 0.0 && p2 > 0.0 {
                let cheaper = if p1 < p2 { a } else { b };
                return format!("Highly equivalent; '{}' has the better price", cheaper.name());
            }
            return "Highly equivalent (90%+ match)".to_string();
        }
        if score >= self.config.threshold {
            "Equivalent with minor differences".to_string()
        } else {
            "Not equivalent (different specifications)".to_string()
        }
    }
}

/// Later sources overwrite earlier ones for the same peer
fn merge(
    auto: Vec<EquivalenceMatch>,
    similar: Vec<EquivalenceMatch>,
    explicit: Vec<EquivalenceMatch>,
) -> Vec<EquivalenceMatch> {
    let mut merged: Vec<EquivalenceMatch> = Vec::new();
    let mut index: AHashMap<EntityId, usize> = AHashMap::new();

    for record in auto.into_iter().chain(similar).chain(explicit) {
        match index.get(&record.peer_id) {
            Some(&slot) => merged[slot] = record,
            None => {
                index.insert(record.peer_id.clone(), merged.len());
                merged.push(record);
            }
        }
    }

    merged.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    merged
}

enum Band {
    Identical,
    Within,
    Apart,
}

fn band(v1: f64, v2: f64, tolerance: f64) -> Band {
    match (v1 > 0.0, v2 > 0.0) {
        (true, true) if v1 == v2 => Band::Identical,
        (true, true) if (v1 - v2).abs() <= tolerance => Band::Within,
        _ => Band::Apart,
    }
}

/// Score how substitutable `a` and `b` are.
///
/// Category is a hard gate: different or unknown categories score 0 and
/// nothing else is checked. An attribute missing on either side earns
/// nothing.
pub fn match_score<S: AsRef<str>>(a: &Entity, b: &Entity, categories: &[S]) -> MatchScore {
    let category = match (a.category(categories), b.category(categories)) {
        (Some(c1), Some(c2)) if c1 == c2 => c1,
        _ => {
            return MatchScore {
                score: 0,
                reasons: vec!["different categories".to_string()],
            }
        }
    };

    let mut score = CATEGORY_POINTS;
    let mut reasons = vec![format!("same category: {}", category)];

    for (key, label, tolerance) in [
        (attributes::RAM_GB, "RAM", RAM_TOLERANCE),
        (attributes::STORAGE_GB, "storage", STORAGE_TOLERANCE),
    ] {
        let v1 = accessor::numeric(a, key);
        let v2 = accessor::numeric(b, key);
        match band(v1, v2, tolerance) {
            Band::Identical => {
                score += IDENTICAL_SPEC_POINTS;
                reasons.push(format!("identical {}: {}GB", label, v1));
            }
            Band::Within => {
                score += CLOSE_SPEC_POINTS;
                reasons.push(format!("similar {}: {}GB vs {}GB", label, v1, v2));
            }
            Band::Apart => {}
        }
    }

    let p1 = accessor::numeric(a, attributes::PRICE);
    let p2 = accessor::numeric(b, attributes::PRICE);
    match band(p1, p2, p1.max(p2) * PRICE_TOLERANCE) {
        Band::Identical | Band::Within => {
            score += PRICE_POINTS;
            reasons.push(format!("similar price: ${} vs ${}", p1, p2));
        }
        Band::Apart => {}
    }

    let s1 = accessor::numeric(a, attributes::SCREEN_INCHES);
    let s2 = accessor::numeric(b, attributes::SCREEN_INCHES);
    match band(s1, s2, SCREEN_TOLERANCE) {
        Band::Identical | Band::Within => {
            score += SCREEN_POINTS;
            reasons.push(format!("similar screen: {}\" vs {}\"", s1, s2));
        }
        Band::Apart => {}
    }

    MatchScore { score, reasons }
}
