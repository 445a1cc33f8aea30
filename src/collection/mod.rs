//! Collections over a `DocumentStore`.
//!
//! - `base.rs` - `BaseCollection`: validation, lookups, existence checks, teardown
//! - `named.rs` - `NamedCollection`: unique names and id/name resolution

mod base;
mod named;

pub use base::BaseCollection;
pub use named::NamedCollection;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How `NamedCollection::define` protects the name-uniqueness invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefineGuard {
    /// Look the name up, then insert. Two concurrent defines of the same
    /// name can both pass the lookup.
    CheckThenInsert,
    /// Same lookup, plus a store-level unique index on the name field that
    /// re-checks atomically inside the insert.
    #[default]
    UniqueIndex,
}

impl FromStr for DefineGuard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check-then-insert" => Ok(Self::CheckThenInsert),
            "unique-index" => Ok(Self::UniqueIndex),
            other => Err(format!("Unknown define guard '{}'", other)),
        }
    }
}

impl fmt::Display for DefineGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckThenInsert => write!(f, "check-then-insert"),
            Self::UniqueIndex => write!(f, "unique-index"),
        }
    }
}

/// Every definition in one collection, in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDump<D> {
    pub name: String,
    pub contents: Vec<D>,
}
