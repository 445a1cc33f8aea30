use super::{Cursor, Selector};
use crate::core::{DocId, Document, Result};

/// Document store trait - allows pluggable storage backends.
///
/// Each call is atomic on its own; nothing is transactional across calls.
pub trait DocumentStore<D: Document>: Send + Sync {
    /// Name of the collection this store backs, used in error messages
    fn name(&self) -> &str;

    /// Insert a document and return the id assigned to it
    fn insert(&self, doc: D) -> Result<DocId>;

    /// Lazily select documents in store order
    fn find(&self, selector: &Selector) -> Result<Cursor<D>>;

    /// Apply `patch` to the document with this id; returns the number of documents changed
    fn update(&self, id: &DocId, patch: &dyn Fn(&mut D)) -> Result<usize>;

    /// Remove every matching document; returns the number removed
    fn remove(&self, selector: &Selector) -> Result<usize>;

    /// Reject inserts and updates that would repeat a text value of `field`
    fn ensure_unique_index(&self, field: &str) -> Result<()>;

    /// Number of stored documents
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
