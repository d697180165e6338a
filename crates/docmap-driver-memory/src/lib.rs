mod value;

use docmap_core::{
    driver::{Storage, ID_KEY},
    Document, Error, Result, Value,
};

use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Key records carry their identifier under inside the store.
const NATIVE_ID: &str = "_id";

type Collections = IndexMap<String, IndexMap<String, Document>>;

/// A document store held in process memory.
///
/// Records are grouped by collection and keyed by a generated identifier.
/// Useful for tests and for applications that do not need persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Number of records currently stored in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.lock()
            .get(collection)
            .map(|records| records.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn select(
        &self,
        collection: &str,
        mut filter: impl FnMut(&Document) -> bool,
    ) -> Vec<Document> {
        let collections = self.lock();

        let Some(records) = collections.get(collection) else {
            return vec![];
        };

        records
            .values()
            .filter(|record| filter(record))
            .map(value::to_logical)
            .collect()
    }
}

impl Storage for MemoryStore {
    fn save(&self, collection: &str, mut data: Document) -> Result<Document> {
        let id = match data.remove(ID_KEY) {
            None | Some(Value::Null) => None,
            Some(id) => Some(value::native_id(&id)?),
        };

        let mut collections = self.lock();
        let records = collections.entry(collection.to_string()).or_default();

        let id = match id {
            Some(id) => {
                let Some(record) = records.get_mut(&id) else {
                    return Err(Error::record_not_found(format!(
                        "no record `{id}` in collection `{collection}`"
                    )));
                };

                trace!(collection, %id, "replacing record");

                data.insert(NATIVE_ID, id.clone());
                *record = data;
                id
            }
            None => {
                let id = uuid::Uuid::new_v4().to_string();

                trace!(collection, %id, "inserting record");

                data.insert(NATIVE_ID, id.clone());
                records.insert(id.clone(), data);
                id
            }
        };

        Ok(value::to_logical(&records[&id]))
    }

    fn remove(&self, collection: &str, id: &Value) -> Result<bool> {
        let id = value::native_id(id)?;

        let mut collections = self.lock();
        let removed = collections
            .get_mut(collection)
            .and_then(|records| records.shift_remove(&id))
            .is_some();

        trace!(collection, %id, removed, "removing record");
        Ok(removed)
    }

    fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self.select(collection, |_| true))
    }

    fn find_one_by_id(&self, collection: &str, id: &Value) -> Result<Option<Document>> {
        let id = value::native_id(id)?;

        let collections = self.lock();
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(&id))
            .map(value::to_logical))
    }

    fn find_one_by_key_val(
        &self,
        collection: &str,
        key: &str,
        val: &Value,
    ) -> Result<Option<Document>> {
        Ok(self.find_by_key_val(collection, key, val)?.into_iter().next())
    }

    fn find_by_key_val(&self, collection: &str, key: &str, val: &Value) -> Result<Vec<Document>> {
        let val = value::coerce(val);
        let key = if key == ID_KEY { NATIVE_ID } else { key };

        trace!(collection, key, %val, "finding records");

        Ok(self.select(collection, |record| record.get(key) == Some(&val)))
    }
}
