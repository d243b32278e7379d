//! DOCX text extraction: unzip the container and walk `word/document.xml`.

use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{ExtractionError, PageContent};

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::DocxError(format!("not a DOCX container: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::DocxError(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    let (text, headings) = parse_document_xml(&xml)?;
    Ok(vec![PageContent {
        page_number: 1,
        text: text.trim().to_string(),
        headings,
    }])
}

/// Walk WordprocessingML and return `(plain_text, heading_paragraphs)`.
///
/// Each `w:p` ends a line; `w:tab` and `w:br` map to tab and newline.
/// Paragraphs whose style id starts with `Heading` or equals `Title` are
/// also reported as headings.
pub(crate) fn parse_document_xml(xml: &str) -> Result<(String, Vec<String>), ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut text = String::new();
    let mut headings = Vec::new();
    let mut paragraph = String::new();
    let mut paragraph_is_heading = false;
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::DocxError(format!("XML error at {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:p" => {
                    paragraph.clear();
                    paragraph_is_heading = false;
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                b"w:pStyle" => paragraph_is_heading = is_heading_style(&e)?,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let run = t
                    .unescape()
                    .map_err(|e| ExtractionError::DocxError(e.to_string()))?;
                paragraph.push_str(&run);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let line = paragraph.trim();
                    if paragraph_is_heading && !line.is_empty() {
                        headings.push(line.to_string());
                    }
                    text.push_str(&paragraph);
                    text.push('\n');
                    paragraph.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((text, headings))
}

fn is_heading_style(element: &BytesStart<'_>) -> Result<bool, ExtractionError> {
    let attr = element
        .try_get_attribute("w:val")
        .map_err(|e| ExtractionError::DocxError(e.to_string()))?;
    let Some(attr) = attr else {
        return Ok(false);
    };
    let style = attr
        .unescape_value()
        .map_err(|e| ExtractionError::DocxError(e.to_string()))?;
    Ok(style.starts_with("Heading") || style == "Title")
}
