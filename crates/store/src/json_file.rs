use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::collection_filename;
use crate::query::{Filter, Query};
use crate::{ChangeEvent, ChangeKind, DocumentStore, RecordCheck, StoreError, Subscription};

const EVENT_CAPACITY: usize = 256;

type Collection = IndexMap<String, Value>;

/// In-memory collections, optionally mirrored to
/// `{data_dir}/collections/{collection}.json`.
///
/// Each collection file is read on first access and rewritten in full after
/// every mutation. A mutation only becomes visible (and is only broadcast)
/// once its file write has succeeded.
pub struct JsonFileStore {
    base_dir: Option<PathBuf>,
    collections: RwLock<HashMap<String, Collection>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl JsonFileStore {
    /// Persisting store rooted at `data_dir`. Creates the directory tree.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        let base_dir = data_dir.join("collections");
        std::fs::create_dir_all(&base_dir)?;
        info!(path = %base_dir.display(), "Document store opened");
        Ok(Self::with_base_dir(Some(base_dir)))
    }

    /// Store that never touches disk.
    pub fn in_memory() -> Self {
        Self::with_base_dir(None)
    }

    fn with_base_dir(base_dir: Option<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            base_dir,
            collections: RwLock::new(HashMap::new()),
            events,
        }
    }

    fn collection_path(&self, collection: &str) -> Option<PathBuf> {
        self.base_dir
            .as_ref()
            .map(|dir| dir.join(collection_filename(collection)))
    }

    /// Load a collection from disk (lazy, on first access).
    async fn ensure_loaded(&self, collection: &str) -> Result<(), StoreError> {
        if self.collections.read().await.contains_key(collection) {
            return Ok(());
        }

        let mut loaded = Collection::new();
        if let Some(path) = self.collection_path(collection) {
            if tokio::fs::try_exists(&path).await? {
                let content = tokio::fs::read_to_string(&path).await?;
                let records: Vec<Value> = serde_json::from_str(&content)?;
                for record in records {
                    match record.get("id").and_then(Value::as_str) {
                        Some(id) => {
                            loaded.insert(id.to_string(), record.clone());
                        }
                        None => warn!(
                            path = %path.display(),
                            "Skipping stored record without an id"
                        ),
                    }
                }
                debug!(collection, count = loaded.len(), "Collection loaded");
            }
        }

        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_insert(loaded);
        Ok(())
    }

    /// Rewrite the collection file. Caller holds the write lock, so writes to
    /// one file land in mutation order.
    async fn persist(&self, collection: &str, records: &Collection) -> Result<(), StoreError> {
        let Some(path) = self.collection_path(collection) else {
            return Ok(());
        };
        let values: Vec<&Value> = records.values().collect();
        let json = serde_json::to_string_pretty(&values)?;
        tokio::fs::write(&path, json).await?;
        Ok(())
    }

    fn emit(&self, collection: &str, id: &str, kind: ChangeKind, record: Value) {
        // No receivers is not an error.
        let _ = self.events.send(ChangeEvent {
            collection: collection.to_string(),
            id: id.to_string(),
            kind,
            record,
        });
    }
}

fn as_object(record: Value) -> Result<Map<String, Value>, StoreError> {
    match record {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn insert(&self, collection: &str, record: Value) -> Result<String, StoreError> {
        let mut object = as_object(record)?;
        self.ensure_loaded(collection).await?;

        let id = Uuid::new_v4().to_string();
        object.insert("id".to_string(), Value::String(id.clone()));
        let record = Value::Object(object);

        {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection.to_string()).or_default();
            records.insert(id.clone(), record.clone());
            if let Err(e) = self.persist(collection, records).await {
                records.shift_remove(&id);
                return Err(e);
            }
        }

        debug!(collection, %id, "Record inserted");
        self.emit(collection, &id, ChangeKind::Added, record);
        Ok(id)
    }

    async fn update_checked(
        &self,
        collection: &str,
        id: &str,
        partial: Value,
        check: RecordCheck<'_>,
    ) -> Result<Value, StoreError> {
        let partial = as_object(partial)?;
        self.ensure_loaded(collection).await?;

        let merged = {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection.to_string()).or_default();
            let Some(Value::Object(existing)) = records.get(id) else {
                return Err(StoreError::NotFound {
                    collection: collection.to_string(),
                    id: id.to_string(),
                });
            };

            let mut fields = existing.clone();
            for (key, value) in partial {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
            let merged = Value::Object(fields);
            check(&merged).map_err(StoreError::InvalidRecord)?;

            // Same key, so the record keeps its position.
            let previous = records.insert(id.to_string(), merged.clone());
            if let Err(e) = self.persist(collection, records).await {
                if let Some(previous) = previous {
                    records.insert(id.to_string(), previous);
                }
                return Err(e);
            }
            merged
        };

        debug!(collection, id, "Record updated");
        self.emit(collection, id, ChangeKind::Modified, merged.clone());
        Ok(merged)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        self.ensure_loaded(collection).await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        self.ensure_loaded(collection).await?;

        let removed = {
            let mut collections = self.collections.write().await;
            let records = collections.entry(collection.to_string()).or_default();
            // shift_remove keeps the insertion order of the rest.
            match records.shift_remove_full(id) {
                Some((index, key, record)) => {
                    if let Err(e) = self.persist(collection, records).await {
                        records.shift_insert(index, key, record);
                        return Err(e);
                    }
                    Some(record)
                }
                None => None,
            }
        };

        match removed {
            Some(record) => {
                debug!(collection, id, "Record deleted");
                self.emit(collection, id, ChangeKind::Removed, record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.ensure_loaded(collection).await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| query.apply(records.values()))
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: &str, filters: Vec<Filter>) -> Subscription {
        Subscription::new(collection, filters, self.events.subscribe())
    }
}
