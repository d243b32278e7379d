//! Persisted lesson/quiz drafts as stored in the `contents` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{ContentType, InteractiveElement, Question};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// One stored lesson, quiz, game, or activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Empty until the store assigns one.
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub status: ContentStatus,
    pub source_file: String,
    #[serde(default)]
    pub headings: Vec<String>,
    pub payload: ContentPayload,
    #[serde(default)]
    pub interactive_elements: Vec<InteractiveElement>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    /// `type` must name the same template as `payload.kind`.
    pub fn check_payload(&self) -> Result<(), CoreError> {
        let payload = self.payload.content_type();
        if payload != self.content_type {
            return Err(CoreError::PayloadMismatch {
                declared: self.content_type,
                payload,
            });
        }
        Ok(())
    }

    /// Deserialize a stored value and reject type/payload mismatches.
    pub fn validated(value: serde_json::Value) -> Result<Self, CoreError> {
        let record = Self::from_value(value)?;
        record.check_payload()?;
        Ok(record)
    }
}

/// Template-specific body, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentPayload {
    Lesson(LessonPayload),
    Assessment(AssessmentPayload),
    Game(GamePayload),
    Activity(ActivityPayload),
}

impl ContentPayload {
    pub fn content_type(&self) -> ContentType {
        match self {
            ContentPayload::Lesson(_) => ContentType::Lesson,
            ContentPayload::Assessment(_) => ContentType::Assessment,
            ContentPayload::Game(_) => ContentType::Game,
            ContentPayload::Activity(_) => ContentType::Activity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSection {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPayload {
    pub sections: Vec<LessonSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    pub time_limit_minutes: u32,
    /// Percentage required to pass (0-100).
    pub passing_score: u32,
    pub shuffle_questions: bool,
    pub show_feedback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentPayload {
    pub questions: Vec<Question>,
    pub settings: QuizSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    pub level_names: Vec<String>,
    pub rounds_per_level: u32,
    pub reward: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPayload {
    pub steps: Vec<String>,
    pub estimated_minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContentRecord {
        let now = Utc::now();
        ContentRecord {
            id: String::new(),
            content_type: ContentType::Activity,
            title: "Sorting Shapes".into(),
            category: "math".into(),
            status: ContentStatus::Draft,
            source_file: "shapes.txt".into(),
            headings: vec!["STEP ONE".into()],
            payload: ContentPayload::Activity(ActivityPayload {
                steps: vec!["STEP ONE".into()],
                estimated_minutes: 15,
            }),
            interactive_elements: vec![InteractiveElement::new("timer", "countdown")],
            created_by: "teacher-1".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn record_json_shape() {
        let value = sample().to_value().unwrap();
        assert_eq!(value["type"], "activity");
        assert_eq!(value["status"], "draft");
        assert_eq!(value["createdBy"], "teacher-1");
        assert_eq!(value["payload"]["kind"], "activity");
        assert_eq!(value["payload"]["estimatedMinutes"], 15);
    }

    #[test]
    fn record_survives_store_value() {
        let record = sample();
        let back = ContentRecord::from_value(record.to_value().unwrap()).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.payload.content_type(), ContentType::Activity);
    }

    #[test]
    fn mismatched_type_and_payload_is_rejected() {
        let mut value = sample().to_value().unwrap();
        value["type"] = "game".into();
        assert!(ContentRecord::from_value(value.clone()).is_ok());
        let err = ContentRecord::validated(value).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PayloadMismatch { declared: ContentType::Game, payload: ContentType::Activity }
        ));
    }

    #[test]
    fn matching_record_validates() {
        let record = sample();
        assert_eq!(ContentRecord::validated(record.to_value().unwrap()).unwrap(), record);
    }
}
