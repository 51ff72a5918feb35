//! One-shot full-replace import of a JSON records file into a collection.
//!
//! The sequence is ensure-collection, clear, bulk-insert, in that order and awaited one at a
//! time. It is not atomic across steps: a failed insert leaves the collection cleared, and two
//! imports racing on the same collection end with whichever inserted last.

use crate::{
    data::Document,
    error::{
        NotAnArraySnafu, ParseRecordsSnafu, ReadFileSnafu, RecordNotObjectSnafu, RosterResult,
    },
    store::{Connector, RecordStore},
};
use serde_json::Value;
use snafu::ResultExt;
use std::path::Path;

pub mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub collection_created: bool,
    pub removed_count: u64,
    pub inserted_count: usize,
}

pub struct Importer<C> {
    connector: C,
}

/// Reads and parses the whole file before anything touches the store.
pub async fn read_records(path: &Path) -> RosterResult<Vec<Document>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .context(ReadFileSnafu { path })?;
    parse_records(&contents, path)
}

pub fn parse_records(contents: &str, path: &Path) -> RosterResult<Vec<Document>> {
    let value: Value = serde_json::from_str(contents).context(ParseRecordsSnafu { path })?;
    let Value::Array(items) = value else {
        return NotAnArraySnafu { path }.fail();
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(document) => Ok(document),
            _ => RecordNotObjectSnafu { path, index }.fail(),
        })
        .collect()
}

impl<C: Connector> Importer<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub async fn run(&self, file_path: &Path, collection: &str) -> RosterResult<ImportSummary> {
        let records = read_records(file_path).await?;
        info!(count = records.len(), path = ?file_path, "Read records file");
        self.load(collection, records).await
    }

    /// Replaces the contents of `collection` with `records`. The connection is closed on every
    /// path out once it has been opened.
    pub async fn load(
        &self,
        collection: &str,
        records: Vec<Document>,
    ) -> RosterResult<ImportSummary> {
        let store = self.connector.connect().await?;
        let outcome = replace_contents(&store, collection, records).await;
        store.close().await;

        match &outcome {
            Ok(summary) => info!(
                collection,
                inserted = summary.inserted_count,
                "Import complete"
            ),
            Err(e) => error!(?e, collection, "Import failed"),
        }
        outcome
    }
}

async fn replace_contents(
    store: &impl RecordStore,
    collection: &str,
    records: Vec<Document>,
) -> RosterResult<ImportSummary> {
    let collection_created = store.ensure_collection(collection).await?;
    if collection_created {
        info!(collection, "Collection did not exist, created it");
    }

    let removed_count = store.clear(collection).await?;
    info!(collection, removed = removed_count, "Cleared existing documents");

    let summary = store.bulk_insert(collection, records).await?;
    info!(
        collection,
        inserted = summary.inserted_count,
        "Documents were inserted"
    );

    Ok(ImportSummary {
        collection_created,
        removed_count,
        inserted_count: summary.inserted_count,
    })
}
