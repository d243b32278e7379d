use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("Record type '{declared}' does not match payload kind '{payload}'")]
    PayloadMismatch {
        declared: crate::ContentType,
        payload: crate::ContentType,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
