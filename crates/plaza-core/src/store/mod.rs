//! Document store seam.
//!
//! The site keeps everything in a hosted document database: named
//! collections of schemaless documents, each with a server-assigned id and
//! creation time. [`DocumentStore`] is the contract the content services
//! need from it; [`MemoryStore`] is an in-process implementation.

mod memory;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;

/// Field map of a single document.
pub type Document = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No document `{id}` in collection `{collection}`")]
    NotFound { collection: String, id: String },

    #[error("Document (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

/// A document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    /// Assigned by the store on `create`.
    pub created_at: DateTime<Utc>,
    pub fields: Document,
}

impl StoredDocument {
    /// Deserialize the document's fields into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }
}

/// Create/read/update/delete over named collections.
///
/// `list` returns documents in insertion order; ordering for display is the
/// caller's concern.
pub trait DocumentStore: Send + Sync {
    fn create(&self, collection: &str, fields: Document) -> Result<StoredDocument, StoreError>;

    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Merge `fields` into an existing document.
    fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError>;

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Serialize a record into a document field map.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Serialization(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}
