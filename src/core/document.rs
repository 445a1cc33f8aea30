use super::{Schema, Value};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A statically typed document that a collection can store.
pub trait Document: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Field-level validator for this document type.
    fn schema() -> Schema;

    /// Projection of one field for selectors and validation.
    /// Unknown fields read as `Value::Null`.
    fn field(&self, name: &str) -> Value;

    /// Normalize the document before validation.
    fn clean(&mut self) {}
}

/// A document whose external identity is a unique human-readable name.
pub trait NamedDocument: Document {
    /// Field that holds the name; also the field the unique index covers.
    const NAME_FIELD: &'static str;

    fn name(&self) -> &str;
}
