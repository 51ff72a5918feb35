//! The record store: a small document-collection interface over an external database.
//!
//! Every operation is addressed by collection name and is independent of the previous one; the
//! only state a [`RecordStore`] holds is its connection.

use crate::{
    data::{Document, ID_FIELD},
    error::{RosterError, RosterResult},
};
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertSummary {
    pub inserted_count: usize,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates the collection if it is absent. Returns whether it had to be created.
    async fn ensure_collection(&self, name: &str) -> RosterResult<bool>;
    /// Removes every document in the collection, returning how many went.
    async fn clear(&self, name: &str) -> RosterResult<u64>;
    /// Inserts all of `records` or none of them.
    async fn bulk_insert(&self, name: &str, records: Vec<Document>)
    -> RosterResult<InsertSummary>;
    async fn find_all(&self, name: &str) -> RosterResult<Vec<Document>>;
    async fn find_by_id(&self, name: &str, id: &str) -> RosterResult<Option<Document>>;
    async fn delete_by_id(&self, name: &str, id: &str) -> RosterResult<u64>;
    async fn close(self);
}

#[async_trait]
pub trait Connector: Send + Sync {
    type Store: RecordStore;

    async fn connect(&self) -> RosterResult<Self::Store>;
}

/// Pulls the id out of a document that's about to be stored, minting one if it has none.
pub fn take_id(document: &mut Document) -> RosterResult<String> {
    match document.remove(ID_FIELD) {
        None | Some(Value::Null) => Ok(Uuid::new_v4().to_string()),
        Some(Value::String(id)) => Ok(id),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(found) => Err(RosterError::InvalidDocumentId { found }),
    }
}

/// The inverse of [`take_id`], for documents on their way back out.
pub fn with_id(id: String, mut body: Document) -> Document {
    body.insert(ID_FIELD.to_string(), Value::String(id));
    body
}
