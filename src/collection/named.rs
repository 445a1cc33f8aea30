use super::{BaseCollection, CollectionDump, DefineGuard};
use crate::core::{DocId, IntoDocId, NamedDocument, Result, StoreError};
use crate::entities::NamedEntity;
use crate::storage::{DocumentStore, Selector};
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

/// A collection whose documents are identified externally by a unique name.
///
/// Adds name-uniqueness at definition time and id/name resolution on top of
/// `BaseCollection`, which it derefs to for the generic accessors.
#[derive(Clone)]
pub struct NamedCollection<D: NamedDocument = NamedEntity> {
    base: BaseCollection<D>,
    guard: DefineGuard,
}

impl<D: NamedDocument> NamedCollection<D> {
    pub fn new(
        name: impl Into<String>,
        store: Arc<dyn DocumentStore<D>>,
        guard: DefineGuard,
    ) -> Result<Self> {
        if guard == DefineGuard::UniqueIndex {
            store.ensure_unique_index(D::NAME_FIELD)?;
        }
        Ok(Self {
            base: BaseCollection::new(name, store),
            guard,
        })
    }

    pub fn in_memory(name: impl Into<String>, guard: DefineGuard) -> Result<Self> {
        let base = BaseCollection::in_memory(name);
        Self::new(base.name().to_string(), base.store().clone(), guard)
    }

    pub fn base(&self) -> &BaseCollection<D> {
        &self.base
    }

    pub fn guard(&self) -> DefineGuard {
        self.guard
    }

    fn name_selector(name: &str) -> Selector {
        Selector::field(D::NAME_FIELD, name)
    }

    /// Insert a new entity and return its id.
    ///
    /// Fails with `DuplicateName` before writing anything if the name is taken.
    /// With `DefineGuard::UniqueIndex` the store re-checks inside the insert,
    /// so two concurrent defines of one name cannot both land.
    pub fn define(&self, doc: D) -> Result<DocId> {
        self.base.validate(&doc)?;

        if !self.base.find(&Self::name_selector(doc.name()))?.is_empty() {
            warn!(
                collection = %self.base.name(),
                name = %doc.name(),
                "rejected duplicate definition"
            );
            return Err(StoreError::duplicate_name(self.base.name(), doc.name()));
        }

        let name = doc.name().to_string();
        let id = self.base.store().insert(doc)?;
        debug!(collection = %self.base.name(), %name, %id, "entity defined");
        Ok(id)
    }

    pub fn find_name(&self, id: impl IntoDocId) -> Result<String> {
        let id = self.base.assert_defined(id)?;
        Ok(self.base.find_doc(Selector::Id(id))?.doc.name().to_string())
    }

    /// Names for `ids`, in input order. Stops at the first id that does not resolve.
    pub fn find_names<I>(&self, ids: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: IntoDocId,
    {
        ids.into_iter().map(|id| self.find_name(id)).collect()
    }

    pub fn find_id(&self, name: &str) -> Result<DocId> {
        Ok(self.base.find_doc(Self::name_selector(name))?.id)
    }

    /// Ids for `names`, in input order. `None` and an empty slice both give
    /// an empty vec: having no references is not an error.
    pub fn find_ids<S: AsRef<str>>(&self, names: Option<&[S]>) -> Result<Vec<DocId>> {
        match names {
            Some(names) => names.iter().map(|name| self.find_id(name.as_ref())).collect(),
            None => Ok(Vec::new()),
        }
    }

    pub fn assert_name(&self, name: &str) -> Result<()> {
        self.find_id(name).map(|_| ())
    }

    /// Short-circuits on the first unknown name.
    pub fn assert_names<I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .try_for_each(|name| self.assert_name(name.as_ref()))
    }

    /// The definition of `id`, in the shape `define` accepts.
    pub fn dump_one(&self, id: impl IntoDocId) -> Result<D> {
        Ok(self.base.find_doc_by_id(id)?.doc)
    }

    pub fn dump_all(&self) -> Result<CollectionDump<D>> {
        Ok(CollectionDump {
            name: self.base.name().to_string(),
            contents: self.base.find_all()?.docs(),
        })
    }

    /// Fail unless every entry of `dump` could be defined here: each one
    /// validates, no name repeats within the dump, and none is already taken.
    pub fn check_dump(&self, dump: &CollectionDump<D>) -> Result<()> {
        let mut seen = HashSet::new();
        for doc in &dump.contents {
            self.base.validate(doc)?;
            if !seen.insert(doc.name())
                || !self.base.find(&Self::name_selector(doc.name()))?.is_empty()
            {
                return Err(StoreError::duplicate_name(self.base.name(), doc.name()));
            }
        }
        Ok(())
    }

    /// Define every entry of `dump`; returns the new ids in dump order.
    ///
    /// The whole dump is checked first, so a bad entry leaves the
    /// collection untouched.
    pub fn restore(&self, dump: CollectionDump<D>) -> Result<Vec<DocId>> {
        self.check_dump(&dump)?;
        dump.contents.into_iter().map(|doc| self.define(doc)).collect()
    }
}

impl<D: NamedDocument> Deref for NamedCollection<D> {
    type Target = BaseCollection<D>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
