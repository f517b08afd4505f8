//! Relation lookups and relation-based score bonuses
//!
//! Every reasoner call made by the engines goes through [`RelationLookup`],
//! which turns a failed call into "no fact available" after logging it.

use smartcompare_core::{Compatibility, EntityId, Reasoner, Verdict};

/// Bonus points per peer an entity beats, when comparing side by side
pub const COMPARISON_INCREMENT: f64 = 50.0;
/// Bonus points per peer an entity beats, when recommending
pub const RECOMMENDATION_INCREMENT: f64 = 2.0;
/// Catalog entries checked for the recommendation bonus
pub const RECOMMENDATION_PEER_LIMIT: usize = 5;

/// Reasoner view that never fails
#[derive(Clone, Copy)]
pub struct RelationLookup<'a> {
    reasoner: &'a dyn Reasoner,
}

impl<'a> RelationLookup<'a> {
    pub fn new(reasoner: &'a dyn Reasoner) -> Self {
        Self { reasoner }
    }

    pub fn better_option(&self, a: &str, b: &str) -> Verdict {
        self.reasoner.is_better_option(a, b).unwrap_or_else(|e| {
            tracing::warn!("better-option lookup {} -> {} failed: {}", a, b, e);
            Verdict::Unknown
        })
    }

    pub fn compatibility(&self, a: &str, b: &str) -> Compatibility {
        self.reasoner.check_compatibility(a, b).unwrap_or_else(|e| {
            tracing::warn!("compatibility lookup {} -> {} failed: {}", a, b, e);
            Compatibility::UNKNOWN
        })
    }

    pub fn has_relation(&self, subject: &str, relation: &str, object: &str) -> bool {
        self.reasoner
            .has_relation(subject, relation, object)
            .unwrap_or_else(|e| {
                tracing::warn!("relation lookup {} {} {} failed: {}", subject, relation, object, e);
                false
            })
    }

    pub fn symmetric_peers(&self, id: &str, relation: &str) -> Vec<EntityId> {
        self.reasoner.symmetric_peers(id, relation).unwrap_or_else(|e| {
            tracing::warn!("peer lookup {} {} failed: {}", id, relation, e);
            Vec::new()
        })
    }
}

/// Peers an entity was found to beat, and the points that earns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationTally {
    pub better_than: Vec<EntityId>,
    pub bonus: f64,
}

/// Converts "is a better option than" facts into additive score bonuses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationBonus {
    increment: f64,
    peer_limit: Option<usize>,
}

impl RelationBonus {
    pub fn new(increment: f64, peer_limit: Option<usize>) -> Self {
        Self { increment, peer_limit }
    }

    /// Per-pair bonus over every other compared entity
    pub fn comparison() -> Self {
        Self::new(COMPARISON_INCREMENT, None)
    }

    /// Small bonus checked against only the first catalog entries
    pub fn recommendation() -> Self {
        Self::new(RECOMMENDATION_INCREMENT, Some(RECOMMENDATION_PEER_LIMIT))
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Count the peers `entity_id` beats. The peer limit applies to the
    /// candidate list before `entity_id` itself is skipped.
    pub fn tally<'p, I>(&self, lookup: RelationLookup<'_>, entity_id: &str, peers: I) -> RelationTally
    where
        I: IntoIterator<Item = &'p str>,
    {
        let limit = self.peer_limit.unwrap_or(usize::MAX);
        let better_than: Vec<EntityId> = peers
            .into_iter()
            .take(limit)
            .filter(|peer| *peer != entity_id)
            .filter(|peer| lookup.better_option(entity_id, peer).is_yes())
            .map(str::to_string)
            .collect();

        RelationTally {
            bonus: better_than.len() as f64 * self.increment,
            better_than,
        }
    }

    pub fn bonus<'p, I>(&self, lookup: RelationLookup<'_>, entity_id: &str, peers: I) -> f64
    where
        I: IntoIterator<Item = &'p str>,
    {
        self.tally(lookup, entity_id, peers).bonus
    }
}
