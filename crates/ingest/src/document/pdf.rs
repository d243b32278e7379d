use super::{ExtractionError, PageContent};

pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<PageContent>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        // Scanned/image PDF: no text layer. The classifier treats this as an
        // empty lesson, so hand back a single empty page instead of failing.
        tracing::warn!("PDF has no extractable text layer");
        return Ok(vec![PageContent {
            page_number: 1,
            text: String::new(),
            headings: Vec::new(),
        }]);
    }

    // pdf-extract returns all text as one string; form feeds separate pages.
    let pages: Vec<PageContent> = if text.contains('\x0C') {
        text.split('\x0C')
            .enumerate()
            .filter(|(_, page_text)| !page_text.trim().is_empty())
            .map(|(i, page_text)| PageContent {
                page_number: i + 1,
                text: page_text.trim().to_string(),
                headings: Vec::new(),
            })
            .collect()
    } else {
        vec![PageContent {
            page_number: 1,
            text: trimmed.to_string(),
            headings: Vec::new(),
        }]
    };

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let result = extract_pdf(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::PdfError(_))));
    }
}
