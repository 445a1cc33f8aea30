use super::schema::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No document in '{collection}' matches {selector}")]
    NotFound { collection: String, selector: String },

    #[error("'{name}' is already defined in '{collection}'")]
    DuplicateName { collection: String, name: String },

    #[error("'{0}' is not a valid document id")]
    InvalidIdentifier(String),

    #[error("Validation failed for '{collection}': {report}")]
    Validation {
        collection: String,
        report: ValidationReport,
    },

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(collection: &str, selector: impl ToString) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            selector: selector.to_string(),
        }
    }

    pub fn duplicate_name(collection: &str, name: &str) -> Self {
        Self::DuplicateName {
            collection: collection.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, Self::DuplicateName { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Lock(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
