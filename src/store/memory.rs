use crate::{
    data::Document,
    error::{RosterError, RosterResult},
    store::{Connector, InsertSummary, RecordStore, take_id, with_id},
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Debug, Default)]
pub struct MemoryState {
    pub collections: BTreeMap<String, Vec<(String, Document)>>,
    pub connects: usize,
    pub closes: usize,
    pub refuse_connections: bool,
}

/// Hands out stores that all share one [`MemoryState`], so a test can look at what an import
/// left behind after the store has been closed.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryConnector {
    pub fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store poisoned")
    }

    pub fn refusing() -> Self {
        let connector = Self::default();
        connector.state().refuse_connections = true;
        connector
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.state()
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| with_id(id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> RosterResult<MemoryStore> {
        let mut state = self.state();
        if state.refuse_connections {
            return Err(RosterError::OpenDatabase {
                source: sqlx::Error::PoolClosed,
            });
        }
        state.connects += 1;

        Ok(MemoryStore {
            state: self.state.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory store poisoned")
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_collection(&self, name: &str) -> RosterResult<bool> {
        let mut state = self.state();
        if state.collections.contains_key(name) {
            return Ok(false);
        }
        state.collections.insert(name.to_string(), Vec::new());
        Ok(true)
    }

    async fn clear(&self, name: &str) -> RosterResult<u64> {
        Ok(self
            .state()
            .collections
            .get_mut(name)
            .map_or(0, |docs| docs.drain(..).count() as u64))
    }

    async fn bulk_insert(
        &self,
        name: &str,
        records: Vec<Document>,
    ) -> RosterResult<InsertSummary> {
        let attempted = records.len();
        let mut state = self.state();
        let Some(existing) = state.collections.get_mut(name) else {
            return Err(RosterError::BulkInsert {
                collection: name.to_string(),
                attempted,
                failed_at: 0,
                source: Box::new(RosterError::MissingCollection {
                    name: name.to_string(),
                }),
            });
        };

        let mut staged: Vec<(String, Document)> = Vec::with_capacity(attempted);
        for (index, mut record) in records.into_iter().enumerate() {
            let outcome = take_id(&mut record).and_then(|id| {
                let taken = existing.iter().chain(staged.iter()).any(|(other, _)| *other == id);
                if taken {
                    Err(RosterError::DuplicateId {
                        collection: name.to_string(),
                        id,
                    })
                } else {
                    Ok(id)
                }
            });

            match outcome {
                Ok(id) => staged.push((id, record)),
                Err(e) => {
                    return Err(RosterError::BulkInsert {
                        collection: name.to_string(),
                        attempted,
                        failed_at: index,
                        source: Box::new(e),
                    });
                }
            }
        }

        existing.extend(staged);
        Ok(InsertSummary {
            inserted_count: attempted,
        })
    }

    async fn find_all(&self, name: &str) -> RosterResult<Vec<Document>> {
        Ok(self
            .state()
            .collections
            .get(name)
            .map(|docs| {
                docs.iter()
                    .map(|(id, body)| with_id(id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_by_id(&self, name: &str, id: &str) -> RosterResult<Option<Document>> {
        Ok(self.state().collections.get(name).and_then(|docs| {
            docs.iter()
                .find(|(other, _)| other == id)
                .map(|(id, body)| with_id(id.clone(), body.clone()))
        }))
    }

    async fn delete_by_id(&self, name: &str, id: &str) -> RosterResult<u64> {
        let mut state = self.state();
        let Some(docs) = state.collections.get_mut(name) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(other, _)| other != id);
        Ok((before - docs.len()) as u64)
    }

    async fn close(self) {
        self.state().closes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn ensure_collection_is_idempotent() {
        let connector = MemoryConnector::default();
        let store = connector.connect().await.expect("connect");

        assert!(store.ensure_collection("students").await.expect("first"));
        assert!(!store.ensure_collection("students").await.expect("second"));
        assert_eq!(connector.state().collections.len(), 1);
    }

    #[tokio::test]
    async fn find_and_delete_by_id() {
        let connector = MemoryConnector::default();
        let store = connector.connect().await.expect("connect");
        store.ensure_collection("students").await.expect("ensure");
        store
            .bulk_insert(
                "students",
                vec![doc(json!({"id": "a", "first_name": "Ada"})), doc(json!({"id": "b"}))],
            )
            .await
            .expect("insert");

        let found = store.find_by_id("students", "a").await.expect("find");
        assert_eq!(found.and_then(|d| d.get("first_name").cloned()), Some(json!("Ada")));
        assert_eq!(store.find_by_id("students", "zzz").await.expect("find"), None);

        assert_eq!(store.delete_by_id("students", "a").await.expect("delete"), 1);
        assert_eq!(store.delete_by_id("students", "a").await.expect("delete"), 0);
        assert_eq!(store.find_all("students").await.expect("all").len(), 1);
    }

    #[tokio::test]
    async fn duplicate_ids_insert_nothing() {
        let connector = MemoryConnector::default();
        let store = connector.connect().await.expect("connect");
        store.ensure_collection("students").await.expect("ensure");

        let err = store
            .bulk_insert(
                "students",
                vec![doc(json!({"id": "a"})), doc(json!({"id": "b"})), doc(json!({"id": "a"}))],
            )
            .await
            .expect_err("duplicate");
        assert!(matches!(
            err,
            RosterError::BulkInsert {
                failed_at: 2,
                attempted: 3,
                ..
            }
        ));
        assert!(store.find_all("students").await.expect("all").is_empty());
    }

    #[tokio::test]
    async fn clearing_an_empty_collection_is_fine() {
        let connector = MemoryConnector::default();
        let store = connector.connect().await.expect("connect");
        assert_eq!(store.clear("students").await.expect("missing"), 0);
        store.ensure_collection("students").await.expect("ensure");
        assert_eq!(store.clear("students").await.expect("empty"), 0);
    }
}
