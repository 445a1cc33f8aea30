// ============================================================================
// vocabdb Library
// ============================================================================

//! Named-entity collections over an in-memory document store.
//!
//! A `NamedCollection` holds controlled-vocabulary entries (interests,
//! favorites, ...) whose external identity is a unique name, and resolves
//! between store ids and names in both directions. Other records refer to
//! entries by name and check those references with `assert_names`.
//!
//! # Examples
//!
//! ```
//! use vocabdb::{Catalog, NamedEntity, StoreConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::in_memory(StoreConfig::default())?;
//! let interests = catalog.interests();
//!
//! let id = interests.define(NamedEntity::new("Databases", Some("Storage systems")))?;
//! assert_eq!(interests.find_name(id)?, "Databases");
//! assert_eq!(interests.find_id("Databases")?, id);
//!
//! interests.assert_names(["Databases"])?;
//! assert!(interests.assert_names(["Databases", "Networks"]).is_err());
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod entities;
pub mod facade;
pub mod prelude;
pub mod storage;

// Re-export main types for convenience
pub use collection::{BaseCollection, CollectionDump, DefineGuard, NamedCollection};
pub use config::StoreConfig;
pub use core::{DocId, Document, NamedDocument, Result, Schema, StoreError, ValidationReport};
pub use entities::{NamedEntity, Profile, ProfileCollection};
pub use facade::{Catalog, CatalogSnapshot};
pub use storage::{Cursor, DocumentStore, InMemoryStore, Selector, SnapshotFormat, StoredDoc};
