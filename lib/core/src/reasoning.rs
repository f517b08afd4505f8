//! Reasoning collaborator interface and a fact-backed implementation
//!
//! The reasoner answers relational questions about catalog entities
//! ("is A a better option than B", "are A and B compatible"). Engines treat
//! every answer as advisory: a failed call is logged and read as "no fact".

use crate::{EntityId, Error, Result};
use ahash::AHashSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Well-known relation names
pub mod relations {
    pub const BETTER_OPTION: &str = "is_better_option_than";
    pub const TECHNICAL_EQUIVALENT: &str = "is_technical_equivalent_of";
    pub const SIMILAR: &str = "is_similar_to";
    pub const COMPATIBLE: &str = "is_compatible_with";
    pub const INCOMPATIBLE: &str = "is_incompatible_with";
}

/// Three-valued answer to a directional question about a pair.
///
/// `No` means the reverse relation holds, `Unknown` that neither does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Yes,
    No,
    Unknown,
}

impl Verdict {
    #[inline]
    pub fn is_yes(self) -> bool {
        matches!(self, Verdict::Yes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Compatible,
    Incompatible,
    Unknown,
}

/// Compatibility of an ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
    pub incompatible: bool,
}

impl Compatibility {
    pub const UNKNOWN: Compatibility = Compatibility { compatible: false, incompatible: false };

    pub fn relationship(&self) -> Relationship {
        if self.compatible {
            Relationship::Compatible
        } else if self.incompatible {
            Relationship::Incompatible
        } else {
            Relationship::Unknown
        }
    }
}

pub trait Reasoner: Send + Sync {
    fn is_better_option(&self, a: &str, b: &str) -> Result<Verdict>;

    fn check_compatibility(&self, a: &str, b: &str) -> Result<Compatibility>;

    fn has_relation(&self, subject: &str, relation: &str, object: &str) -> Result<bool>;

    /// Entities linked to `id` through `relation` in either direction
    fn symmetric_peers(&self, id: &str, relation: &str) -> Result<Vec<EntityId>>;
}

/// A single asserted relation between two entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub subject: EntityId,
    pub relation: String,
    pub object: EntityId,
}

impl Fact {
    pub fn new(subject: impl Into<EntityId>, relation: impl Into<String>, object: impl Into<EntityId>) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// A reasoner answering from explicitly asserted facts
#[derive(Default)]
pub struct FactStore {
    facts: RwLock<Vec<Fact>>,
    lookup: RwLock<AHashSet<(String, String, String)>>,
    symmetric: RwLock<AHashSet<String>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `relation` symmetric: a fact answers in both directions
    pub fn declare_symmetric(&self, relation: impl Into<String>) {
        self.symmetric.write().insert(relation.into());
    }

    pub fn assert_fact(&self, fact: Fact) {
        if fact.subject.is_empty() || fact.object.is_empty() {
            return;
        }
        let key = (fact.subject.clone(), fact.relation.clone(), fact.object.clone());
        if self.lookup.write().insert(key) {
            self.facts.write().push(fact);
        }
    }

    pub fn len(&self) -> usize {
        self.facts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn holds(&self, subject: &str, relation: &str, object: &str) -> bool {
        let lookup = self.lookup.read();
        let direct = |s: &str, o: &str| {
            lookup.contains(&(s.to_string(), relation.to_string(), o.to_string()))
        };
        direct(subject, object)
            || (self.symmetric.read().contains(relation) && direct(object, subject))
    }
}

impl Reasoner for FactStore {
    fn is_better_option(&self, a: &str, b: &str) -> Result<Verdict> {
        if a == b {
            return Ok(Verdict::Unknown);
        }
        if self.holds(a, relations::BETTER_OPTION, b) {
            Ok(Verdict::Yes)
        } else if self.holds(b, relations::BETTER_OPTION, a) {
            Ok(Verdict::No)
        } else {
            Ok(Verdict::Unknown)
        }
    }

    fn check_compatibility(&self, a: &str, b: &str) -> Result<Compatibility> {
        Ok(Compatibility {
            compatible: self.holds(a, relations::COMPATIBLE, b),
            incompatible: self.holds(a, relations::INCOMPATIBLE, b),
        })
    }

    fn has_relation(&self, subject: &str, relation: &str, object: &str) -> Result<bool> {
        if relation.is_empty() {
            return Err(Error::Collaborator("empty relation name".to_string()));
        }
        Ok(self.holds(subject, relation, object))
    }

    fn symmetric_peers(&self, id: &str, relation: &str) -> Result<Vec<EntityId>> {
        let mut peers: Vec<EntityId> = Vec::new();
        for fact in self.facts.read().iter().filter(|f| f.relation == relation) {
            let peer = if fact.subject == id {
                &fact.object
            } else if fact.object == id {
                &fact.subject
            } else {
                continue;
            };
            if peer != id && !peers.contains(peer) {
                peers.push(peer.clone());
            }
        }
        Ok(peers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> FactStore {
        let store = FactStore::new();
        store.declare_symmetric(relations::TECHNICAL_EQUIVALENT);
        store.assert_fact(Fact::new("a", relations::BETTER_OPTION, "b"));
        store.assert_fact(Fact::new("a", relations::TECHNICAL_EQUIVALENT, "c"));
        store.assert_fact(Fact::new("d", relations::TECHNICAL_EQUIVALENT, "a"));
        store.assert_fact(Fact::new("a", relations::COMPATIBLE, "b"));
        store.assert_fact(Fact::new("b", relations::INCOMPATIBLE, "c"));
        store
    }

    #[test]
    fn test_better_option_is_three_valued() {
        let store = store();
        assert_eq!(store.is_better_option("a", "b").unwrap(), Verdict::Yes);
        assert_eq!(store.is_better_option("b", "a").unwrap(), Verdict::No);
        assert_eq!(store.is_better_option("a", "c").unwrap(), Verdict::Unknown);
        assert_eq!(store.is_better_option("a", "a").unwrap(), Verdict::Unknown);
    }

    #[test]
    fn test_compatibility_is_directional() {
        let store = store();
        let ab = store.check_compatibility("a", "b").unwrap();
        assert_eq!(ab.relationship(), Relationship::Compatible);
        let ba = store.check_compatibility("b", "a").unwrap();
        assert_eq!(ba, Compatibility::UNKNOWN);
        assert_eq!(
            store.check_compatibility("b", "c").unwrap().relationship(),
            Relationship::Incompatible
        );
    }

    #[test]
    fn test_symmetric_relations_answer_both_ways() {
        let store = store();
        assert!(store.has_relation("c", relations::TECHNICAL_EQUIVALENT, "a").unwrap());
        assert!(!store.has_relation("b", relations::BETTER_OPTION, "a").unwrap());
        assert!(store.has_relation("a", "", "b").is_err());
    }

    #[test]
    fn test_symmetric_peers() {
        let store = store();
        let peers = store.symmetric_peers("a", relations::TECHNICAL_EQUIVALENT).unwrap();
        assert_eq!(peers, vec!["c".to_string(), "d".to_string()]);
        assert!(store.symmetric_peers("b", relations::SIMILAR).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_facts_ignored() {
        let store = store();
        let before = store.len();
        store.assert_fact(Fact::new("a", relations::BETTER_OPTION, "b"));
        store.assert_fact(Fact::new("", relations::BETTER_OPTION, "b"));
        assert_eq!(store.len(), before);
        assert!(!store.is_empty());
    }
}
