pub mod document;
pub mod error;
pub mod id;
pub mod schema;
pub mod value;

pub use document::{Document, NamedDocument};
pub use error::{Result, StoreError};
pub use id::{DocId, IntoDocId};
pub use schema::{
    Field, FieldViolation, Schema, ValidationContext, ValidationReport, ViolationKind,
};
pub use value::{DataType, Value};
