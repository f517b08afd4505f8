//! # SmartCompare Core
//!
//! Core library for the SmartCompare scoring and matching engines.
//!
//! This crate provides the fundamental data structures and collaborator seams:
//!
//! - [`Entity`] - A cataloged item with type labels and loosely-typed attributes
//! - [`accessor`] - Safe numeric/display extraction from attribute values
//! - [`EntityFilter`] - Composable attribute bounds
//! - [`Catalog`] - Entity source, with [`InMemoryCatalog`]
//! - [`Reasoner`] - Relation facts between entities, with [`FactStore`]
//!
//! ## Example
//!
//! ```rust
//! use smartcompare_core::{accessor, Catalog, Entity, InMemoryCatalog};
//!
//! let catalog = InMemoryCatalog::new();
//! catalog.upsert(
//!     Entity::new("xps13")
//!         .with_type("Laptop")
//!         .with_attribute("price", 1199.0)
//!         .with_attribute("ram_gb", vec![16.0, 32.0]),
//! );
//!
//! let laptop = catalog.resolve("xps13").unwrap();
//! assert_eq!(accessor::numeric(&laptop, "ram_gb"), 16.0);
//! ```

pub mod accessor;
pub mod catalog;
pub mod entity;
pub mod error;
pub mod filter;
pub mod reasoning;
pub mod snapshot;

pub use catalog::{Catalog, InMemoryCatalog};
pub use entity::{attributes, AttributeValue, Entity, EntityId, Scalar};
pub use error::{Error, Result};
pub use filter::{EntityFilter, Filter, FilterCondition};
pub use reasoning::{relations, Compatibility, Fact, FactStore, Reasoner, Relationship, Verdict};
pub use snapshot::CatalogSnapshot;
