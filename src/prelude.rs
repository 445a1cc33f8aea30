//! Recommended imports grouped by abstraction level.
//!
//! `app` covers code that only defines and resolves entries.
//! `advanced` adds what is needed to plug in a custom store or document type.

pub mod app {
    //! Everyday surface: the catalog, its collections, and their errors.
    pub use crate::{
        Catalog, DefineGuard, DocId, NamedCollection, NamedEntity, Profile, ProfileCollection,
        Result, StoreConfig, StoreError,
    };
}

pub mod advanced {
    //! Building blocks for custom stores and document types.
    pub use crate::core::schema::{clean_list, clean_optional, clean_text};
    pub use crate::core::{
        DataType, Document, Field, IntoDocId, NamedDocument, Schema, ValidationContext,
        ValidationReport, Value,
    };
    pub use crate::storage::{Cursor, DocumentStore, InMemoryStore, Selector, StoredDoc};
    pub use crate::BaseCollection;
}
