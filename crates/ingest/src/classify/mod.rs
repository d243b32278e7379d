//! Heuristic document classifier.
//!
//! Turns extracted text plus the original filename into a
//! [`ClassifiedContent`]: a coarse content type chosen by ordered
//! first-match rules, up to ten heading candidates, pre-extracted quiz
//! questions for assessments, and the renderer hints for the chosen type.
//! Output is a draft for a teacher to review, never a final answer.

mod elements;
mod headings;
mod questions;
mod rules;

pub use elements::interactive_elements;
pub use headings::{extract_headings, MAX_HEADINGS};
pub use questions::{extract_questions, template_questions};
pub use rules::detect_content_type;

use brightpath_core::{ClassifiedContent, ContentType};

/// Classify `full_text` extracted from `file_name`.
///
/// Total over every input: empty or whitespace-only text yields a lesson
/// with no headings and no questions.
pub fn classify(full_text: &str, file_name: &str) -> ClassifiedContent {
    let content_type = detect_content_type(full_text, file_name);
    let headings = extract_headings(full_text);

    let questions = if content_type == ContentType::Assessment {
        let extracted = extract_questions(full_text);
        if extracted.is_empty() {
            tracing::debug!(file_name, "no questions found, using template questions");
            template_questions()
        } else {
            extracted
        }
    } else {
        Vec::new()
    };

    tracing::debug!(
        file_name,
        content_type = %content_type,
        headings = headings.len(),
        questions = questions.len(),
        "classified document"
    );

    ClassifiedContent {
        content_type,
        headings,
        questions,
        interactive_elements: interactive_elements(content_type),
    }
}
