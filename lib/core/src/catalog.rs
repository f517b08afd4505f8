use crate::{Entity, Error, Result};
use ahash::AHashMap;
use parking_lot::RwLock;

/// Source of entity records.
///
/// Implementations may be slow or fail; engines degrade a failed listing to
/// an empty catalog and a failed lookup to [`Error::NotFound`].
pub trait Catalog: Send + Sync {
    /// Look up a single entity, `Ok(None)` if the id is unknown
    fn get_by_id(&self, id: &str) -> Result<Option<Entity>>;

    /// Every entity, in catalog order
    fn list_all(&self) -> Result<Vec<Entity>>;

    /// Resolve `id` or fail with [`Error::NotFound`] naming it
    fn resolve(&self, id: &str) -> Result<Entity> {
        match self.get_by_id(id) {
            Ok(Some(entity)) => Ok(entity),
            Ok(None) => Err(Error::NotFound(id.to_string())),
            Err(e) => {
                tracing::warn!("catalog lookup for '{}' failed: {}", id, e);
                Err(Error::NotFound(id.to_string()))
            }
        }
    }
}

/// An ordered in-memory catalog
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Default)]
struct CatalogInner {
    entities: Vec<Entity>,
    index: AHashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let catalog = Self::new();
        for entity in entities {
            catalog.upsert(entity);
        }
        catalog
    }

    /// Insert or replace an entity. Replacing keeps its catalog position.
    pub fn upsert(&self, entity: Entity) {
        let mut inner = self.inner.write();
        match inner.index.get(&entity.id).copied() {
            Some(pos) => inner.entities[pos] = entity,
            None => {
                let pos = inner.entities.len();
                inner.index.insert(entity.id.clone(), pos);
                inner.entities.push(entity);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Catalog for InMemoryCatalog {
    fn get_by_id(&self, id: &str) -> Result<Option<Entity>> {
        let inner = self.inner.read();
        Ok(inner.index.get(id).map(|&pos| inner.entities[pos].clone()))
    }

    fn list_all(&self) -> Result<Vec<Entity>> {
        Ok(self.inner.read().entities.clone())
    }
}
