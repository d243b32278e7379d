use thiserror::Error;

/// Errors produced by [`DocumentStore`](crate::DocumentStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a collection name to a safe JSON filename.
pub(crate) fn collection_filename(collection: &str) -> String {
    let safe: String = collection
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}.json")
}
