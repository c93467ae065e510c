use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError, StoredDocument};

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-process [`DocumentStore`] backed by a mutex-guarded map.
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
    clock: Clock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Use `clock` for creation timestamps instead of the system time.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            clock: Box::new(clock),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<StoredDocument>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

fn not_found(collection: &str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, collection: &str, fields: Document) -> Result<StoredDocument, StoreError> {
        let doc = StoredDocument {
            id: Uuid::new_v4().to_string(),
            created_at: (self.clock)(),
            fields,
        };
        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self.lock()?.get(collection).cloned().unwrap_or_default())
    }

    fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        let mut collections = self.lock()?;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| not_found(collection, id))?;
        doc.fields.extend(fields);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.lock()?;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let index = docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| not_found(collection, id))?;
        docs.remove(index);
        Ok(())
    }
}
