use crate::core::{DocId, Document, IntoDocId, Result, Schema, StoreError};
use crate::storage::{Cursor, DocumentStore, InMemoryStore, Selector, StoredDoc};
use std::sync::Arc;
use tracing::info;

/// Owns one category of documents on top of a `DocumentStore`.
///
/// Every mutation goes through the bound `Schema`; every id-based lookup goes
/// through `assert_defined`. Clones share the same store.
#[derive(Clone)]
pub struct BaseCollection<D: Document> {
    name: String,
    store: Arc<dyn DocumentStore<D>>,
    schema: Schema,
}

impl<D: Document> BaseCollection<D> {
    pub fn new(name: impl Into<String>, store: Arc<dyn DocumentStore<D>>) -> Self {
        Self {
            name: name.into(),
            store,
            schema: D::schema(),
        }
    }

    /// Collection backed by a fresh `InMemoryStore`
    pub fn in_memory(name: impl Into<String>) -> Self {
        let name = name.into();
        let store: Arc<dyn DocumentStore<D>> = Arc::new(InMemoryStore::new(name.clone()));
        Self::new(name, store)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore<D>> {
        &self.store
    }

    pub fn count(&self) -> Result<usize> {
        self.store.len()
    }

    pub fn find(&self, selector: &Selector) -> Result<Cursor<D>> {
        self.store.find(selector)
    }

    pub fn find_all(&self) -> Result<Cursor<D>> {
        self.store.find(&Selector::All)
    }

    /// The single document matching `selector`.
    ///
    /// Zero matches and several matches are both `NotFound`: the caller asked
    /// for exactly one.
    pub fn find_doc(&self, selector: impl Into<Selector>) -> Result<StoredDoc<D>> {
        let selector = selector.into();
        let cursor = self.store.find(&selector)?;
        let mut matches = cursor.iter();

        match (matches.next(), matches.next()) {
            (Some(doc), None) => Ok(doc.clone()),
            (None, _) => Err(StoreError::not_found(&self.name, &selector)),
            (Some(_), Some(_)) => Err(StoreError::not_found(
                &self.name,
                format!("{} (more than one match)", selector),
            )),
        }
    }

    pub fn find_doc_by_id(&self, id: impl IntoDocId) -> Result<StoredDoc<D>> {
        let id = id.into_doc_id()?;
        self.find_doc(Selector::Id(id))
    }

    pub fn is_defined(&self, id: impl IntoDocId) -> Result<bool> {
        let id = id.into_doc_id()?;
        Ok(!self.store.find(&Selector::Id(id))?.is_empty())
    }

    /// Returns the parsed id, or `NotFound` when no document has it.
    pub fn assert_defined(&self, id: impl IntoDocId) -> Result<DocId> {
        let id = id.into_doc_id()?;
        if self.store.find(&Selector::Id(id))?.is_empty() {
            return Err(StoreError::not_found(&self.name, Selector::Id(id)));
        }
        Ok(id)
    }

    pub fn validate(&self, doc: &D) -> Result<()> {
        let report = self.schema.validate(doc);
        if report.is_valid() {
            Ok(())
        } else {
            Err(StoreError::Validation {
                collection: self.name.clone(),
                report,
            })
        }
    }

    /// Validate, then insert
    pub fn insert(&self, doc: D) -> Result<DocId> {
        self.validate(&doc)?;
        self.store.insert(doc)
    }

    /// Apply `patch` to a copy of the stored document, validate the result,
    /// then write it back.
    pub fn update(&self, id: impl IntoDocId, patch: impl Fn(&mut D)) -> Result<DocId> {
        let id = self.assert_defined(id)?;
        let mut patched = self.find_doc(Selector::Id(id))?.doc;
        patch(&mut patched);
        self.validate(&patched)?;

        let changed = self.store.update(&id, &|doc: &mut D| *doc = patched.clone())?;
        if changed == 0 {
            return Err(StoreError::not_found(&self.name, Selector::Id(id)));
        }
        Ok(id)
    }

    /// Deletes every document. Callers gate this themselves.
    pub fn remove_all(&self) -> Result<usize> {
        let removed = self.store.remove(&Selector::All)?;
        info!(collection = %self.name, removed, "collection cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, Field, Value};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Memo {
        text: String,
        author: Option<String>,
    }

    impl Document for Memo {
        fn schema() -> Schema {
            Schema::new(
                "Memo",
                vec![
                    Field::new("text", DataType::Text),
                    Field::new("author", DataType::Text).optional(),
                ],
            )
        }

        fn field(&self, name: &str) -> Value {
            match name {
                "text" => Value::from(self.text.clone()),
                "author" => Value::from(self.author.clone()),
                _ => Value::Null,
            }
        }
    }

    fn memo(text: &str, author: Option<&str>) -> Memo {
        Memo {
            text: text.to_string(),
            author: author.map(str::to_string),
        }
    }

    #[test]
    fn test_insert_validates() {
        let memos = BaseCollection::<Memo>::in_memory("Memos");
        let err = memos.insert(memo("", None)).unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(memos.count().unwrap(), 0);

        let id = memos.insert(memo("hi", None)).unwrap();
        assert_eq!(memos.find_doc_by_id(id).unwrap().doc, memo("hi", None));
    }

    #[test]
    fn test_find_doc_requires_exactly_one() {
        let memos = BaseCollection::<Memo>::in_memory("Memos");
        memos.insert(memo("a", Some("ann"))).unwrap();
        memos.insert(memo("b", Some("ann"))).unwrap();

        assert!(memos.find_doc(Selector::field("text", "a")).is_ok());
        assert!(memos.find_doc(Selector::field("author", "ann")).unwrap_err().is_not_found());
        assert!(memos.find_doc(Selector::field("author", "bob")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_assert_defined_distinguishes_malformed_ids() {
        let memos = BaseCollection::<Memo>::in_memory("Memos");
        let id = memos.insert(memo("a", None)).unwrap();

        assert_eq!(memos.assert_defined(id.to_string()).unwrap(), id);
        assert!(memos.assert_defined(DocId::generate()).unwrap_err().is_not_found());
        assert!(matches!(
            memos.assert_defined("zzz").unwrap_err(),
            StoreError::InvalidIdentifier(_)
        ));
        assert!(matches!(
            memos.find_doc_by_id("zzz").unwrap_err(),
            StoreError::InvalidIdentifier(_)
        ));
    }

    #[test]
    fn test_update_validates_patched_document() {
        let memos = BaseCollection::<Memo>::in_memory("Memos");
        let id = memos.insert(memo("a", None)).unwrap();

        memos.update(id, |m| m.author = Some("ann".into())).unwrap();
        assert_eq!(memos.find_doc_by_id(id).unwrap().doc.author.as_deref(), Some("ann"));

        let err = memos.update(id, |m| m.text.clear()).unwrap_err();
        assert!(matches!(err, StoreError::Validation { .. }));
        assert_eq!(memos.find_doc_by_id(id).unwrap().doc.text, "a");

        assert!(memos.update(DocId::generate(), |_| {}).unwrap_err().is_not_found());
    }

    #[test]
    fn test_remove_all() {
        let memos = BaseCollection::<Memo>::in_memory("Memos");
        assert_eq!(memos.remove_all().unwrap(), 0);

        let id = memos.insert(memo("a", None)).unwrap();
        memos.insert(memo("b", None)).unwrap();
        assert_eq!(memos.remove_all().unwrap(), 2);
        assert!(memos.find_all().unwrap().is_empty());
        assert!(memos.find_doc_by_id(id).unwrap_err().is_not_found());
        assert!(!memos.is_defined(id).unwrap());
    }
}
