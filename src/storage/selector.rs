use crate::core::{DocId, Document, Value};
use std::fmt;

/// Query predicate understood by every `DocumentStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Id(DocId),
    /// Field equality. Against a list field it matches when the list contains the value.
    Eq { field: String, value: Value },
}

impl Selector {
    pub fn id(id: DocId) -> Self {
        Self::Id(id)
    }

    pub fn field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches<D: Document>(&self, id: &DocId, doc: &D) -> bool {
        match self {
            Self::All => true,
            Self::Id(wanted) => wanted == id,
            Self::Eq { field, value } => match (doc.field(field), value) {
                (Value::TextList(items), Value::Text(wanted)) => items.contains(wanted),
                (actual, wanted) => &actual == wanted,
            },
        }
    }
}

impl From<DocId> for Selector {
    fn from(id: DocId) -> Self {
        Self::Id(id)
    }
}

impl From<&DocId> for Selector {
    fn from(id: &DocId) -> Self {
        Self::Id(*id)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Id(id) => write!(f, "_id = {}", id),
            Self::Eq { field, value } => write!(f, "{} = {}", field, value),
        }
    }
}
