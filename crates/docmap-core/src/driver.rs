//! Collaborators the mapping engine talks to: a transport that fetches
//! remote resources, and a document store that persists records.

use crate::{Document, Result, Value};

use std::{fmt, sync::Arc};

/// Fetches remote resources by path.
///
/// Used by relation resolution to load related records that are not embedded
/// in the owning document. Implementations own retry, backoff and timeout
/// policy; errors they return reach the caller unchanged.
pub trait Transport: fmt::Debug + Send + Sync {
    /// Performs `method` on `path` and returns the decoded response body.
    fn call(&self, path: &str, method: &str, params: &Document) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn call(&self, path: &str, method: &str, params: &Document) -> Result<Value> {
        (**self).call(path, method, params)
    }
}

/// A schemaless document store.
///
/// Stores translate their native identifier representation to and from the
/// logical [`ID_KEY`] at their own boundary; documents crossing this trait
/// never carry the native key.
pub trait Storage: fmt::Debug + Send + Sync {
    /// Inserts `data` when it has no identifier, replaces the identified record
    /// otherwise. Returns the stored document including its identifier.
    fn save(&self, collection: &str, data: Document) -> Result<Document>;

    /// Removes the record with the given identifier. Returns `false` when no
    /// record matched.
    fn remove(&self, collection: &str, id: &Value) -> Result<bool>;

    fn find_all(&self, collection: &str) -> Result<Vec<Document>>;

    fn find_one_by_id(&self, collection: &str, id: &Value) -> Result<Option<Document>>;

    fn find_one_by_key_val(
        &self,
        collection: &str,
        key: &str,
        val: &Value,
    ) -> Result<Option<Document>>;

    fn find_by_key_val(&self, collection: &str, key: &str, val: &Value) -> Result<Vec<Document>>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn save(&self, collection: &str, data: Document) -> Result<Document> {
        (**self).save(collection, data)
    }

    fn remove(&self, collection: &str, id: &Value) -> Result<bool> {
        (**self).remove(collection, id)
    }

    fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        (**self).find_all(collection)
    }

    fn find_one_by_id(&self, collection: &str, id: &Value) -> Result<Option<Document>> {
        (**self).find_one_by_id(collection, id)
    }

    fn find_one_by_key_val(
        &self,
        collection: &str,
        key: &str,
        val: &Value,
    ) -> Result<Option<Document>> {
        (**self).find_one_by_key_val(collection, key, val)
    }

    fn find_by_key_val(&self, collection: &str, key: &str, val: &Value) -> Result<Vec<Document>> {
        (**self).find_by_key_val(collection, key, val)
    }
}

/// The logical identifier key storage adapters expose.
pub const ID_KEY: &str = "id";
