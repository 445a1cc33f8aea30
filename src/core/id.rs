use super::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(Uuid);

impl DocId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::InvalidIdentifier(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for DocId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Anything a caller may hand in as an id: a typed `DocId` or its string form.
///
/// String forms are parsed on use, so malformed input surfaces as
/// `StoreError::InvalidIdentifier` instead of `NotFound`.
pub trait IntoDocId {
    fn into_doc_id(self) -> Result<DocId>;
}

impl IntoDocId for DocId {
    fn into_doc_id(self) -> Result<DocId> {
        Ok(self)
    }
}

impl IntoDocId for &DocId {
    fn into_doc_id(self) -> Result<DocId> {
        Ok(*self)
    }
}

impl IntoDocId for &str {
    fn into_doc_id(self) -> Result<DocId> {
        DocId::parse(self)
    }
}

impl IntoDocId for &String {
    fn into_doc_id(self) -> Result<DocId> {
        DocId::parse(self)
    }
}

impl IntoDocId for String {
    fn into_doc_id(self) -> Result<DocId> {
        DocId::parse(&self)
    }
}
