//! Operator lookups against a collection outside of an import. Each call opens its own
//! connection and closes it again whatever the outcome.

use crate::{
    data::Document,
    error::RosterResult,
    store::{Connector, RecordStore},
};

/// Every document in `collection`, or just the one with `id`. A missing id is an empty result.
pub async fn show(
    connector: &impl Connector,
    collection: &str,
    id: Option<&str>,
) -> RosterResult<Vec<Document>> {
    let store = connector.connect().await?;
    let outcome = match id {
        Some(id) => store
            .find_by_id(collection, id)
            .await
            .map(|found| found.into_iter().collect()),
        None => store.find_all(collection).await,
    };
    store.close().await;

    if let Ok(documents) = &outcome {
        debug!(collection, count = documents.len(), "Looked up documents");
    }
    outcome
}

pub async fn remove(connector: &impl Connector, collection: &str, id: &str) -> RosterResult<u64> {
    let store = connector.connect().await?;
    let outcome = store.delete_by_id(collection, id).await;
    store.close().await;

    match &outcome {
        Ok(0) => warn!(collection, id, "No document with that id"),
        Ok(_) => info!(collection, id, "Removed document"),
        Err(e) => error!(?e, collection, id, "Unable to remove document"),
    }
    outcome
}
