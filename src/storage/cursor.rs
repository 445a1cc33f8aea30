use super::Selector;
use crate::core::{DocId, Document};
use im::OrdMap;
use serde::{Deserialize, Serialize};

/// A document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDoc<D> {
    pub id: DocId,
    pub doc: D,
}

/// Lazy result of `find`.
///
/// Holds a structurally shared snapshot of the store rows (an `im::OrdMap`
/// clone is O(1)) and filters on iteration. Every call to `iter` starts over
/// from the same snapshot; re-running the query picks up newer writes.
#[derive(Debug, Clone)]
pub struct Cursor<D: Document> {
    rows: OrdMap<u64, StoredDoc<D>>,
    selector: Selector,
}

impl<D: Document> Cursor<D> {
    pub(crate) fn new(rows: OrdMap<u64, StoredDoc<D>>, selector: Selector) -> Self {
        Self { rows, selector }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredDoc<D>> + '_ {
        self.rows
            .values()
            .filter(move |row| self.selector.matches(&row.id, &row.doc))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn first(&self) -> Option<&StoredDoc<D>> {
        self.iter().next()
    }

    pub fn ids(&self) -> Vec<DocId> {
        self.iter().map(|row| row.id).collect()
    }

    pub fn docs(&self) -> Vec<D> {
        self.iter().map(|row| row.doc.clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<StoredDoc<D>> {
        self.iter().cloned().collect()
    }
}

impl<'a, D: Document> IntoIterator for &'a Cursor<D> {
    type Item = &'a StoredDoc<D>;
    type IntoIter = Box<dyn Iterator<Item = &'a StoredDoc<D>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
