//! Ordered content-type rules. The first rule whose text or filename markers
//! match wins; nothing is scored.

use brightpath_core::ContentType;

struct Rule {
    content_type: ContentType,
    /// Lower-case substrings searched in the document text.
    text_markers: &'static [&'static str],
    /// Lower-case substrings searched in the filename.
    name_markers: &'static [&'static str],
}

const RULES: [Rule; 3] = [
    Rule {
        content_type: ContentType::Assessment,
        text_markers: &[
            "?",
            "what is",
            "how many",
            "which of the following",
            "choose the correct",
            "select the best",
            "true or false",
            "multiple choice",
        ],
        name_markers: &["quiz", "test", "exam"],
    },
    Rule {
        content_type: ContentType::Game,
        text_markers: &["game", "play"],
        name_markers: &["game"],
    },
    Rule {
        content_type: ContentType::Activity,
        text_markers: &["activity", "exercise"],
        name_markers: &["activity"],
    },
];

/// Pick the content type for a document. Falls back to [`ContentType::Lesson`].
pub fn detect_content_type(full_text: &str, file_name: &str) -> ContentType {
    let text = full_text.to_lowercase();
    let name = file_name.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            rule.text_markers.iter().any(|m| text.contains(m))
                || rule.name_markers.iter().any(|m| name.contains(m))
        })
        .map(|rule| rule.content_type)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_mark_alone_is_assessment() {
        assert_eq!(detect_content_type("Ready?", "notes.txt"), ContentType::Assessment);
    }

    #[test]
    fn phrases_match_case_insensitively() {
        assert_eq!(
            detect_content_type("TRUE OR FALSE: cats bark", "a.txt"),
            ContentType::Assessment
        );
        assert_eq!(detect_content_type("Free PLAY time", "a.txt"), ContentType::Game);
    }

    #[test]
    fn filename_markers() {
        assert_eq!(detect_content_type("", "Unit3_QUIZ.pdf"), ContentType::Assessment);
        assert_eq!(detect_content_type("", "final-exam.docx"), ContentType::Assessment);
        assert_eq!(detect_content_type("", "memory_game.pdf"), ContentType::Game);
        assert_eq!(detect_content_type("", "activity-sheet.pdf"), ContentType::Activity);
    }

    #[test]
    fn filename_beats_later_text_rules() {
        // "exercise" would make it an activity, but the quiz filename wins first.
        assert_eq!(detect_content_type("exercise", "quiz.pdf"), ContentType::Assessment);
    }

    #[test]
    fn substring_matches_inside_words() {
        // "display" contains "play": markers are substrings, not words.
        assert_eq!(detect_content_type("Display the chart", "a.txt"), ContentType::Game);
    }

    #[test]
    fn no_marker_is_lesson() {
        assert_eq!(detect_content_type("Plants need sunlight.", "plants.pdf"), ContentType::Lesson);
    }
}
