use std::sync::LazyLock;

use regex::Regex;

use brightpath_core::Question;

static QUESTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(what|how|which|where|when|why|who)").expect("valid regex"));

/// `A.`, `b)`, `3.`, `4)` and so on.
static OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-dA-D]|[1-4])[.)]").expect("valid regex"));

/// Group question lines with the lettered/numbered option lines that follow.
///
/// The first option of every question is recorded as its correct answer;
/// no answer key is parsed. Questions without options are dropped.
pub fn extract_questions(full_text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<String> = None;
    let mut options: Vec<String> = Vec::new();

    for line in full_text.split('\n').map(str::trim) {
        if is_question_start(line) {
            flush(&mut questions, current.take(), &mut options);
            current = Some(line.to_string());
        } else if let Some(option) = option_text(line) {
            if current.is_some() && !option.is_empty() {
                options.push(option.to_string());
            }
        }
    }
    flush(&mut questions, current, &mut options);

    questions
}

fn is_question_start(line: &str) -> bool {
    line.contains('?') || QUESTION_START.is_match(line)
}

fn option_text(line: &str) -> Option<&str> {
    let prefix = OPTION_PREFIX.find(line)?;
    Some(line[prefix.end()..].trim())
}

fn flush(questions: &mut Vec<Question>, current: Option<String>, options: &mut Vec<String>) {
    let taken = std::mem::take(options);
    if let Some(text) = current {
        if let Some(question) = Question::with_first_option_correct(text, taken) {
            questions.push(question);
        }
    }
}

/// Placeholder questions for assessments with nothing extractable.
pub fn template_questions() -> Vec<Question> {
    let generic = [
        (
            "What is the main idea of this lesson?",
            ["The main topic discussed", "A small detail", "Something unrelated", "None of the above"],
        ),
        (
            "Which statement best describes what you learned?",
            ["A key fact from the lesson", "A guess", "An opinion", "I am not sure"],
        ),
    ];

    generic
        .into_iter()
        .filter_map(|(text, options)| {
            Question::with_first_option_correct(
                text.to_string(),
                options.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_options_under_question() {
        let text = "What is 2+2?\nA. 3\nB. 4\nC. 5";
        let questions = extract_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "What is 2+2?");
        assert_eq!(questions[0].options, vec!["3", "4", "5"]);
        assert_eq!(questions[0].correct_answer, "3");
        assert_eq!(questions[0].explanation, "Answer: 3");
    }

    #[test]
    fn multiple_questions_mixed_prefixes() {
        let text = "Which animal barks?\na) Dog\nb) Cat\n\nhow many legs does a spider have\n1. Six\n2) Eight";
        let questions = extract_questions(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options, vec!["Dog", "Cat"]);
        assert_eq!(questions[1].question_text, "how many legs does a spider have");
        assert_eq!(questions[1].options, vec!["Six", "Eight"]);
    }

    #[test]
    fn question_without_options_is_dropped() {
        let text = "Why is the sky blue?\nWhere do birds sleep?\nA. Nests";
        let questions = extract_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "Where do birds sleep?");
    }

    #[test]
    fn empty_option_text_is_discarded() {
        let text = "Who wrote it?\nA.\nB. Ann\nC)   ";
        let questions = extract_questions(text);
        assert_eq!(questions[0].options, vec!["Ann"]);
        assert_eq!(questions[0].correct_answer, "Ann");
    }

    #[test]
    fn options_before_any_question_are_ignored() {
        let text = "A. stray\nWhen does school start?\nA. 8am";
        let questions = extract_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["8am"]);
    }

    #[test]
    fn out_of_range_prefixes_are_not_options() {
        let text = "What colour is grass?\nE. Purple\n5. Blue\nA. Green";
        let questions = extract_questions(text);
        assert_eq!(questions[0].options, vec!["Green"]);
    }

    #[test]
    fn option_with_question_mark_starts_new_question() {
        let text = "What is red?\nA. Why not?\nB. A colour";
        let questions = extract_questions(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "A. Why not?");
        assert_eq!(questions[0].options, vec!["A colour"]);
    }

    #[test]
    fn templates_are_well_formed() {
        let templates = template_questions();
        assert_eq!(templates.len(), 2);
        for q in &templates {
            assert_eq!(q.options.len(), 4);
            assert!(q.options.contains(&q.correct_answer));
        }
    }
}
