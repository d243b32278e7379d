//! Document ingestion: text extraction, heuristic classification, and
//! draft-template building for uploaded teaching material.

pub mod classify;
pub mod convert;
pub mod document;
pub mod template;

pub use classify::classify;
pub use convert::{convert_document, ConvertedDocument};
pub use document::{extract_text, ExtractedDocument, ExtractionError};
pub use template::{build_draft, DraftMeta};
