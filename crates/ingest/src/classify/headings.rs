use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on headings returned by [`extract_headings`].
pub const MAX_HEADINGS: usize = 10;

/// Headings are shorter than this many characters.
const MAX_HEADING_CHARS: usize = 100;

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid regex"));

/// Collect heading candidates in document order, keeping the first ten.
///
/// A trimmed line of 1..100 characters is a candidate when it is already
/// upper case or starts with a number followed by a dot (`"3. Colours"`).
/// Short all-caps acronyms and answer lines like `"A. 3"` qualify too.
pub fn extract_headings(full_text: &str) -> Vec<String> {
    full_text
        .split('\n')
        .map(str::trim)
        .filter(|line| is_heading_candidate(line))
        .take(MAX_HEADINGS)
        .map(str::to_string)
        .collect()
}

fn is_heading_candidate(line: &str) -> bool {
    let len = line.chars().count();
    if len == 0 || len >= MAX_HEADING_CHARS {
        return false;
    }
    line == line.to_uppercase() || NUMBERED.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_caps_and_numbered_lines() {
        let text = "ANIMALS\nDogs are friendly.\n1. Farm animals\n2) not numbered with dot\n";
        assert_eq!(extract_headings(text), vec!["ANIMALS", "1. Farm animals"]);
    }

    #[test]
    fn lines_are_trimmed() {
        assert_eq!(extract_headings("   COLOURS  \r\n"), vec!["COLOURS"]);
    }

    #[test]
    fn long_lines_are_skipped() {
        let long = "A".repeat(100);
        let ok = "B".repeat(99);
        let text = format!("{long}\n{ok}");
        assert_eq!(extract_headings(&text), vec![ok]);
    }

    #[test]
    fn caseless_lines_count_as_upper() {
        // Digits and punctuation have no case, so they equal their upper form.
        assert_eq!(extract_headings("42\n---"), vec!["42", "---"]);
    }

    #[test]
    fn blank_text_has_no_headings() {
        assert!(extract_headings("").is_empty());
        assert!(extract_headings("  \n\t\n ").is_empty());
    }
}
