use super::{Cursor, DocumentStore, Selector, StoredDoc};
use crate::core::{DocId, Document, Result, StoreError};
use im::OrdMap;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

struct StoreState<D: Document> {
    /// Rows keyed by insertion sequence, which is also the store order
    rows: OrdMap<u64, StoredDoc<D>>,
    positions: HashMap<DocId, u64>,
    next_seq: u64,
    /// field -> (value -> owning id)
    unique: HashMap<String, HashMap<String, DocId>>,
}

impl<D: Document> StoreState<D> {
    fn new() -> Self {
        Self {
            rows: OrdMap::new(),
            positions: HashMap::new(),
            next_seq: 0,
            unique: HashMap::new(),
        }
    }

    fn check_unique(&self, collection: &str, doc: &D, ignore: Option<&DocId>) -> Result<()> {
        for (field, index) in &self.unique {
            let value = doc.field(field);
            let Some(key) = value.as_str() else { continue };
            if let Some(owner) = index.get(key)
                && Some(owner) != ignore
            {
                return Err(StoreError::duplicate_name(collection, key));
            }
        }
        Ok(())
    }

    fn index_doc(&mut self, id: DocId, doc: &D) {
        for (field, index) in self.unique.iter_mut() {
            if let Some(key) = doc.field(field).as_str() {
                index.insert(key.to_string(), id);
            }
        }
    }

    fn unindex_doc(&mut self, doc: &D) {
        for (field, index) in self.unique.iter_mut() {
            if let Some(key) = doc.field(field).as_str() {
                index.remove(key);
            }
        }
    }
}

/// Document store kept entirely in memory.
///
/// One `RwLock` guards the whole collection, so each trait call is atomic.
/// Readers get a cheap `im` snapshot and never hold the lock while iterating.
pub struct InMemoryStore<D: Document> {
    name: String,
    state: RwLock<StoreState<D>>,
}

impl<D: Document> InMemoryStore<D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(StoreState::new()),
        }
    }
}

impl<D: Document> DocumentStore<D> for InMemoryStore<D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&self, doc: D) -> Result<DocId> {
        let mut state = self.state.write()?;
        state.check_unique(&self.name, &doc, None)?;

        let id = DocId::generate();
        let seq = state.next_seq;
        state.next_seq += 1;

        state.index_doc(id, &doc);
        state.positions.insert(id, seq);
        state.rows.insert(seq, StoredDoc { id, doc });

        debug!(collection = %self.name, %id, "document inserted");
        Ok(id)
    }

    fn find(&self, selector: &Selector) -> Result<Cursor<D>> {
        let state = self.state.read()?;

        // Point lookups skip the scan
        let rows = match selector {
            Selector::Id(id) => match state.positions.get(id) {
                Some(seq) => state
                    .rows
                    .get(seq)
                    .map(|row| OrdMap::unit(*seq, row.clone()))
                    .unwrap_or_default(),
                None => OrdMap::new(),
            },
            _ => state.rows.clone(),
        };

        Ok(Cursor::new(rows, selector.clone()))
    }

    fn update(&self, id: &DocId, patch: &dyn Fn(&mut D)) -> Result<usize> {
        let mut state = self.state.write()?;

        let Some(seq) = state.positions.get(id).copied() else {
            return Ok(0);
        };
        let Some(current) = state.rows.get(&seq).cloned() else {
            return Ok(0);
        };

        let mut patched = current.doc.clone();
        patch(&mut patched);
        state.check_unique(&self.name, &patched, Some(id))?;

        state.unindex_doc(&current.doc);
        state.index_doc(*id, &patched);
        state.rows.insert(
            seq,
            StoredDoc {
                id: *id,
                doc: patched,
            },
        );

        debug!(collection = %self.name, %id, "document updated");
        Ok(1)
    }

    fn remove(&self, selector: &Selector) -> Result<usize> {
        let mut state = self.state.write()?;

        let doomed: Vec<(u64, StoredDoc<D>)> = state
            .rows
            .iter()
            .filter(|(_, row)| selector.matches(&row.id, &row.doc))
            .map(|(seq, row)| (*seq, row.clone()))
            .collect();

        for (seq, row) in &doomed {
            state.rows.remove(seq);
            state.positions.remove(&row.id);
            state.unindex_doc(&row.doc);
        }

        debug!(collection = %self.name, %selector, removed = doomed.len(), "documents removed");
        Ok(doomed.len())
    }

    fn ensure_unique_index(&self, field: &str) -> Result<()> {
        let mut state = self.state.write()?;
        if state.unique.contains_key(field) {
            return Ok(());
        }

        let mut index = HashMap::new();
        for row in state.rows.values() {
            if let Some(key) = row.doc.field(field).as_str()
                && index.insert(key.to_string(), row.id).is_some()
            {
                return Err(StoreError::duplicate_name(&self.name, key));
            }
        }

        state.unique.insert(field.to_string(), index);
        debug!(collection = %self.name, field, "unique index created");
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.state.read()?.rows.len())
    }
}
