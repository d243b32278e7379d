use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Coarse category assigned to an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Lesson,
    Assessment,
    Game,
    Activity,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Lesson,
        ContentType::Assessment,
        ContentType::Game,
        ContentType::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Lesson => "lesson",
            ContentType::Assessment => "assessment",
            ContentType::Game => "game",
            ContentType::Activity => "activity",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or(CoreError::UnknownContentType(wanted))
    }
}

/// A multiple-choice question pre-extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

impl Question {
    /// Build a question whose answer is the first option.
    ///
    /// Returns `None` when there are no options.
    pub fn with_first_option_correct(question_text: String, options: Vec<String>) -> Option<Self> {
        let first = options.first()?.clone();
        Some(Self {
            question_text,
            explanation: format!("Answer: {first}"),
            correct_answer: first,
            options,
        })
    }
}

/// Renderer hint pair, e.g. `{ "type": "quiz", "element": "multiple-choice" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub element: String,
}

impl InteractiveElement {
    pub fn new(kind: &str, element: &str) -> Self {
        Self {
            kind: kind.to_string(),
            element: element.to_string(),
        }
    }
}

/// Output of the document classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedContent {
    pub content_type: ContentType,
    pub headings: Vec<String>,
    pub questions: Vec<Question>,
    pub interactive_elements: Vec<InteractiveElement>,
}
