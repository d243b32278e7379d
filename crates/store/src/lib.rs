//! Schemaless JSON document store with live change subscriptions.
//!
//! Records are JSON objects grouped into named collections. Every mutation
//! is fanned out to subscribers as a [`ChangeEvent`].

mod error;
mod json_file;
pub mod query;

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::warn;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use query::{Direction, Filter, FilterOp, OrderBy, Query};

/// Validation hook for [`DocumentStore::update_checked`].
pub type RecordCheck<'a> = &'a (dyn Fn(&Value) -> Result<(), String> + Send + Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// A single mutation, carrying the record as it looks afterwards
/// (or, for removals, as it looked before).
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub collection: String,
    pub id: String,
    pub kind: ChangeKind,
    pub record: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new record under a fresh UUID and return that id.
    async fn insert(&self, collection: &str, record: Value) -> Result<String, StoreError>;

    /// Shallow-merge `partial` into an existing record. `id` cannot change.
    async fn update(&self, collection: &str, id: &str, partial: Value) -> Result<Value, StoreError> {
        self.update_checked(collection, id, partial, &|_: &Value| -> Result<(), String> { Ok(()) })
            .await
    }

    /// Like [`update`](Self::update), but `check` sees the merged record
    /// under the write lock. An `Err` leaves the stored record untouched and
    /// surfaces as [`StoreError::InvalidRecord`].
    async fn update_checked(
        &self,
        collection: &str,
        id: &str,
        partial: Value,
        check: RecordCheck<'_>,
    ) -> Result<Value, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Live changes to `collection` whose record matches every filter.
    fn subscribe(&self, collection: &str, filters: Vec<Filter>) -> Subscription;
}

/// Receiving half of a store subscription.
pub struct Subscription {
    collection: String,
    filters: Vec<Filter>,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    pub(crate) fn new(
        collection: &str,
        filters: Vec<Filter>,
        rx: broadcast::Receiver<ChangeEvent>,
    ) -> Self {
        Self {
            collection: collection.to_string(),
            filters,
            rx,
        }
    }

    /// Wait for the next matching event. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(event);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        collection = %self.collection,
                        skipped,
                        "Subscriber lagged, dropping missed change events"
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    fn accepts(&self, event: &ChangeEvent) -> bool {
        event.collection == self.collection && query::matches_all(&self.filters, &event.record)
    }

    pub fn into_stream(self) -> impl Stream<Item = ChangeEvent> + Send {
        futures::stream::unfold(self, |mut sub| async move {
            let event = sub.next().await?;
            Some((event, sub))
        })
    }
}
