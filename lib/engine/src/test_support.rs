//! Collaborator doubles that fail on purpose

use smartcompare_core::{
    Catalog, Compatibility, Entity, EntityId, Error, InMemoryCatalog, Reasoner, Result, Verdict,
};

fn unavailable<T>() -> Result<T> {
    Err(Error::Collaborator("service unavailable".to_string()))
}

/// Reasoner whose every call fails
pub struct UnreachableReasoner;

impl Reasoner for UnreachableReasoner {
    fn is_better_option(&self, _a: &str, _b: &str) -> Result<Verdict> {
        unavailable()
    }

    fn check_compatibility(&self, _a: &str, _b: &str) -> Result<Compatibility> {
        unavailable()
    }

    fn has_relation(&self, _subject: &str, _relation: &str, _object: &str) -> Result<bool> {
        unavailable()
    }

    fn symmetric_peers(&self, _id: &str, _relation: &str) -> Result<Vec<EntityId>> {
        unavailable()
    }
}

/// Catalog that answers lookups by id but cannot list its entities
pub struct UnlistableCatalog(pub InMemoryCatalog);

impl Catalog for UnlistableCatalog {
    fn get_by_id(&self, id: &str) -> Result<Option<Entity>> {
        self.0.get_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Entity>> {
        unavailable()
    }
}
