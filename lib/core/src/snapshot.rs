use crate::reasoning::{Fact, FactStore};
use crate::{Entity, InMemoryCatalog, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A JSON document describing a catalog and the relation facts about it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub facts: Vec<Fact>,
    #[serde(default)]
    pub symmetric_relations: Vec<String>,
}

impl CatalogSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(data)?;
        tracing::debug!(
            "parsed catalog snapshot: {} entities, {} facts",
            snapshot.entities.len(),
            snapshot.facts.len()
        );
        Ok(snapshot)
    }

    /// Build the in-memory collaborators described by this snapshot
    pub fn into_collaborators(self) -> (InMemoryCatalog, FactStore) {
        let catalog = InMemoryCatalog::from_entities(self.entities);
        let facts = FactStore::new();
        for relation in self.symmetric_relations {
            facts.declare_symmetric(relation);
        }
        for fact in self.facts {
            facts.assert_fact(fact);
        }
        (catalog, facts)
    }
}
