mod docx;
mod pdf;
mod plain;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File extensions accepted by [`extract_text`].
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt", "text", "md", "markdown"];

/// A page of extracted text with metadata.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number (for PDFs). For DOCX/TXT/MD, always 1.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
    /// Headings found on this page (Markdown ATX lines, DOCX heading styles).
    pub headings: Vec<String>,
}

/// Result of extracting text from a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// File type: "pdf", "docx", "txt", "md"
    pub file_type: String,
    /// Extracted pages with text and metadata.
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Get all text concatenated.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Total character count across all pages.
    pub fn total_chars(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }

    /// Headings reported by the parser itself, in page order.
    pub fn structural_headings(&self) -> Vec<String> {
        self.pages.iter().flat_map(|p| p.headings.iter().cloned()).collect()
    }
}

/// Lower-cased extension of `filename`, or empty when there is none.
pub fn file_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Extract text from file bytes based on file type.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = file_extension(filename);
    let file_type = ext.as_str();

    let pages = match file_type {
        "pdf" => pdf::extract_pdf(bytes)?,
        "docx" => docx::extract_docx(bytes)?,
        "txt" | "text" => plain::extract_plain(bytes, false)?,
        "md" | "markdown" => plain::extract_plain(bytes, true)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        pages,
    })
}

/// Decode bytes as UTF-8 without a leading byte order mark, falling back to
/// lossy conversion.
pub(crate) fn decode_utf8(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_extension() {
        let err = extract_text(b"hello", "slides.pptx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t == "pptx"));
    }

    #[test]
    fn rejects_missing_extension() {
        let err = extract_text(b"hello", "README").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t.is_empty()));
    }

    #[test]
    fn every_supported_extension_dispatches() {
        for ext in SUPPORTED_EXTENSIONS {
            let result = extract_text(b"plain words", &format!("file.{ext}"));
            assert!(
                !matches!(result, Err(ExtractionError::UnsupportedType(_))),
                "{ext} was rejected"
            );
        }
    }

    #[test]
    fn extension_is_case_insensitive() {
        let doc = extract_text(b"Counting to ten", "Numbers.TXT").unwrap();
        assert_eq!(doc.file_type, "txt");
        assert_eq!(doc.full_text(), "Counting to ten");
    }

    #[test]
    fn full_text_joins_pages() {
        let doc = ExtractedDocument {
            filename: "a.pdf".into(),
            file_type: "pdf".into(),
            pages: vec![
                PageContent { page_number: 1, text: "one".into(), headings: vec![] },
                PageContent { page_number: 2, text: "two".into(), headings: vec!["H".into()] },
            ],
        };
        assert_eq!(doc.full_text(), "one\n\ntwo");
        assert_eq!(doc.total_chars(), 6);
        assert_eq!(doc.structural_headings(), vec!["H"]);
    }
}
