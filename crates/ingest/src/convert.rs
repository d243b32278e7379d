use serde::Serialize;
use tracing::info;

use brightpath_core::ClassifiedContent;

use crate::classify::classify;
use crate::document::{extract_text, ExtractionError};

/// Extraction summary plus classification for one uploaded file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedDocument {
    pub file_name: String,
    pub file_type: String,
    pub page_count: usize,
    pub char_count: usize,
    /// Headings the file format marks as such (Markdown `#`, DOCX heading
    /// styles), independent of what the classifier inferred.
    pub structural_headings: Vec<String>,
    pub classified: ClassifiedContent,
}

/// Extract text from `bytes` and classify it.
///
/// Extraction failures are returned as-is; classification only runs once
/// text (possibly empty) has been obtained.
pub fn convert_document(bytes: &[u8], file_name: &str) -> Result<ConvertedDocument, ExtractionError> {
    let doc = extract_text(bytes, file_name)?;
    let full_text = doc.full_text();
    let classified = classify(&full_text, file_name);
    let structural_headings = doc.structural_headings();

    info!(
        "Converted '{}' (type={}): {} pages, {} chars, {} marked headings -> {} ({} headings, {} questions)",
        file_name,
        doc.file_type,
        doc.pages.len(),
        doc.total_chars(),
        structural_headings.len(),
        classified.content_type,
        classified.headings.len(),
        classified.questions.len(),
    );

    Ok(ConvertedDocument {
        file_name: doc.filename.clone(),
        file_type: doc.file_type.clone(),
        page_count: doc.pages.len(),
        char_count: doc.total_chars(),
        structural_headings,
        classified,
    })
}

#[cfg(test)]
mod tests {
    use brightpath_core::ContentType;

    use super::*;

    #[test]
    fn converts_markdown_quiz() {
        let md = b"# Weekly Quiz\n\nWhich planet is red?\nA) Mars\nB) Venus\n";
        let converted = convert_document(md, "week1.md").unwrap();
        assert_eq!(converted.file_type, "md");
        assert_eq!(converted.page_count, 1);
        assert_eq!(converted.classified.content_type, ContentType::Assessment);
        assert_eq!(converted.classified.questions[0].options, vec!["Mars", "Venus"]);
        assert_eq!(converted.structural_headings, vec!["Weekly Quiz"]);
    }

    #[test]
    fn plain_text_has_no_marked_headings() {
        let converted = convert_document(b"# Weekly Quiz
Notes", "week1.txt").unwrap();
        assert!(converted.structural_headings.is_empty());
    }

    #[test]
    fn docx_heading_styles_are_exposed() {
        use std::io::{Cursor, Write};

        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Rivers</w:t></w:r></w:p>
<w:p><w:r><w:t>Rivers flow to the sea.</w:t></w:r></w:p>
<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>The Nile</w:t></w:r></w:p>
</w:body></w:document>"#;
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let converted = convert_document(&bytes, "rivers.docx").unwrap();
        assert_eq!(converted.file_type, "docx");
        assert_eq!(converted.structural_headings, vec!["Rivers", "The Nile"]);
    }

    #[test]
    fn empty_text_file_is_a_lesson() {
        let converted = convert_document(b"", "notes.txt").unwrap();
        assert_eq!(converted.char_count, 0);
        assert_eq!(converted.classified.content_type, ContentType::Lesson);
    }

    #[test]
    fn unsupported_file_skips_classification() {
        let err = convert_document(b"\x89PNG", "diagram.png").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(_)));
    }

    #[test]
    fn serializes_camel_case() {
        let converted = convert_document(b"Let's play", "fun.txt").unwrap();
        let value = serde_json::to_value(&converted).unwrap();
        assert_eq!(value["fileType"], "txt");
        assert_eq!(value["structuralHeadings"], serde_json::json!([]));
        assert_eq!(value["classified"]["contentType"], "game");
    }
}
