//! Inventory data sources feeding the pipeline.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;

use stockroom_core::{DomainError, DomainResult, RecordId};

use crate::record::InventoryRecord;

/// Supplies the flat record list on demand.
///
/// No ordering is promised; grouping picks each group's display fields from
/// whichever record the source yields first.
pub trait InventorySource: Send + Sync {
    fn records(&self) -> DomainResult<Vec<InventoryRecord>>;
}

impl<S> InventorySource for Arc<S>
where
    S: InventorySource + ?Sized,
{
    fn records(&self) -> DomainResult<Vec<InventoryRecord>> {
        (**self).records()
    }
}

/// In-memory source for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySource {
    inner: RwLock<Vec<InventoryRecord>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            inner: RwLock::new(records),
        }
    }

    pub fn replace(&self, records: Vec<InventoryRecord>) {
        match self.inner.write() {
            Ok(mut inner) => *inner = records,
            Err(_) => tracing::warn!(
                dropped = records.len(),
                "in-memory source lock poisoned; replace ignored"
            ),
        }
    }

    /// Replace the record with the same id in place, or append it.
    pub fn upsert(&self, record: InventoryRecord) {
        let Ok(mut inner) = self.inner.write() else {
            tracing::warn!(id = %record.id, "in-memory source lock poisoned; upsert ignored");
            return;
        };
        match inner.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => inner.push(record),
        }
    }

    /// Returns true if a record was removed.
    pub fn remove(&self, id: &RecordId) -> bool {
        match self.inner.write() {
            Ok(mut inner) => {
                let before = inner.len();
                inner.retain(|r| &r.id != id);
                inner.len() != before
            }
            Err(_) => {
                tracing::warn!(%id, "in-memory source lock poisoned; remove ignored");
                false
            }
        }
    }
}

impl InventorySource for InMemorySource {
    fn records(&self) -> DomainResult<Vec<InventoryRecord>> {
        self.inner
            .read()
            .map(|inner| inner.clone())
            .map_err(|_| DomainError::source("in-memory source lock poisoned"))
    }
}

/// Reads a JSON array of records from disk on every call.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventorySource for JsonFileSource {
    fn records(&self) -> DomainResult<Vec<InventoryRecord>> {
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| DomainError::source(format!("{}: {e}", self.path.display())))?;
        records_from_json(&raw)
    }
}

/// Parse a JSON array of records.
///
/// Entries that cannot be read as a record (e.g. no `id`) are skipped with a
/// warning so one bad row does not hide the rest of the inventory. A payload
/// that is not an array at all is an error.
pub fn records_from_json(raw: &str) -> DomainResult<Vec<InventoryRecord>> {
    let rows: Vec<JsonValue> = serde_json::from_str(raw)
        .map_err(|e| DomainError::source(format!("expected a JSON array of records: {e}")))?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<InventoryRecord>(row) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable inventory record"),
        }
    }

    Ok(records)
}
