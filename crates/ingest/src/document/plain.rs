//! Plain text and Markdown. Both become a single page; Markdown also reports
//! its ATX headings (`#` through `######`).

use std::sync::LazyLock;

use regex::Regex;

use super::{decode_utf8, ExtractionError, PageContent};

static ATX_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}#{1,6}(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid regex"));

pub fn extract_plain(bytes: &[u8], markdown: bool) -> Result<Vec<PageContent>, ExtractionError> {
    let text = decode_utf8(bytes);
    let headings = if markdown { markdown_headings(&text) } else { Vec::new() };

    Ok(vec![PageContent {
        page_number: 1,
        text: text.trim().to_string(),
        headings,
    }])
}

/// Heading text in document order. Lines inside fenced code blocks are
/// skipped, as are `#tag` lines with no space after the hashes.
fn markdown_headings(text: &str) -> Vec<String> {
    let mut headings = Vec::new();
    let mut fence: Option<&str> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();
        let marker = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m));
        match (fence, marker) {
            (None, Some(m)) => {
                fence = Some(m);
                continue;
            }
            (Some(open), Some(m)) if open == m => {
                fence = None;
                continue;
            }
            (Some(_), _) => continue,
            (None, None) => {}
        }

        if let Some(caps) = ATX_HEADING.captures(line) {
            let heading = caps.get(1).map_or("", |m| m.as_str()).trim();
            if !heading.is_empty() {
                headings.push(heading.to_string());
            }
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(md: &str) -> Vec<String> {
        extract_plain(md.as_bytes(), true).unwrap().remove(0).headings
    }

    #[test]
    fn text_keeps_lines_and_has_no_headings() {
        let pages = extract_plain(b"# Not markdown here\nWhat is 2+2?\nA. 3\nB. 4", false).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text.lines().count(), 4);
        assert!(pages[0].headings.is_empty());
    }

    #[test]
    fn empty_input_is_one_empty_page() {
        let pages = extract_plain(b"  \n ", true).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "");
        assert!(pages[0].headings.is_empty());
    }

    #[test]
    fn byte_order_mark_and_bad_bytes() {
        let pages = extract_plain(b"\xEF\xBB\xBFcaf\xE9 time", false).unwrap();
        assert!(pages[0].text.starts_with("caf"));
        assert!(pages[0].text.ends_with("time"));
        assert!(!pages[0].text.starts_with('\u{FEFF}'));
    }

    #[test]
    fn atx_levels_and_closing_hashes() {
        let md = "# Weather\n\nIt rains.\n\n## Clouds ##\n\n   ### Snow\n###### Hail\n";
        assert_eq!(headings(md), vec!["Weather", "Clouds", "Snow", "Hail"]);
    }

    #[test]
    fn hashtags_and_deep_hashes_are_text() {
        assert!(headings("#science\n####### seven\n#\n    # indented code\n").is_empty());
    }

    #[test]
    fn fenced_code_is_skipped() {
        let md = "# Loops\n```python\n# a comment\n```\n~~~\n## also code\n~~~\n## Practice\n";
        assert_eq!(headings(md), vec!["Loops", "Practice"]);
    }
}
