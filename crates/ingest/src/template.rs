//! Presentation templates: wrap a classification into a storable draft.

use chrono::Utc;

use brightpath_core::{
    ActivityPayload, AssessmentPayload, ClassifiedContent, ContentPayload, ContentRecord,
    ContentStatus, ContentType, GamePayload, LessonPayload, LessonSection, QuizSettings,
};

/// Teacher-supplied metadata for a new draft.
#[derive(Debug, Clone)]
pub struct DraftMeta {
    /// Explicit title; derived from headings or filename when absent.
    pub title: Option<String>,
    pub category: String,
    pub created_by: String,
    pub source_file: String,
}

const DEFAULT_PASSING_SCORE: u32 = 70;
const MINUTES_PER_FIVE_QUESTIONS: u32 = 10;
const GAME_LEVELS: usize = 3;
const ROUNDS_PER_LEVEL: u32 = 5;
const ACTIVITY_MINUTES: u32 = 15;

/// Build an unsaved draft record (empty `id`) from a classification.
pub fn build_draft(classified: &ClassifiedContent, meta: DraftMeta) -> ContentRecord {
    let now = Utc::now();
    let title = meta
        .title
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| default_title(&classified.headings, &meta.source_file));

    ContentRecord {
        id: String::new(),
        content_type: classified.content_type,
        title,
        category: meta.category,
        status: ContentStatus::Draft,
        source_file: meta.source_file,
        headings: classified.headings.clone(),
        payload: build_payload(classified),
        interactive_elements: classified.interactive_elements.clone(),
        created_by: meta.created_by,
        created_at: now,
        updated_at: now,
    }
}

fn build_payload(classified: &ClassifiedContent) -> ContentPayload {
    let headings = &classified.headings;
    match classified.content_type {
        ContentType::Lesson => {
            let sections = if headings.is_empty() {
                vec![LessonSection {
                    heading: "Introduction".to_string(),
                    body: String::new(),
                }]
            } else {
                headings
                    .iter()
                    .map(|h| LessonSection {
                        heading: h.clone(),
                        body: String::new(),
                    })
                    .collect()
            };
            ContentPayload::Lesson(LessonPayload { sections })
        }
        ContentType::Assessment => ContentPayload::Assessment(AssessmentPayload {
            questions: classified.questions.clone(),
            settings: QuizSettings {
                time_limit_minutes: time_limit_for(classified.questions.len()),
                passing_score: DEFAULT_PASSING_SCORE,
                shuffle_questions: false,
                show_feedback: true,
            },
        }),
        ContentType::Game => {
            let level_names = (0..GAME_LEVELS)
                .map(|i| {
                    headings
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| format!("Level {}", i + 1))
                })
                .collect();
            ContentPayload::Game(GamePayload {
                level_names,
                rounds_per_level: ROUNDS_PER_LEVEL,
                reward: "stars".to_string(),
            })
        }
        ContentType::Activity => {
            let steps = if headings.is_empty() {
                vec!["Step 1".to_string()]
            } else {
                headings.clone()
            };
            ContentPayload::Activity(ActivityPayload {
                steps,
                estimated_minutes: ACTIVITY_MINUTES,
            })
        }
    }
}

/// Ten minutes per started block of five questions, never less than ten.
fn time_limit_for(question_count: usize) -> u32 {
    let blocks = question_count.div_ceil(5).max(1) as u32;
    blocks * MINUTES_PER_FIVE_QUESTIONS
}

fn default_title(headings: &[String], source_file: &str) -> String {
    if let Some(first) = headings.first() {
        return first.clone();
    }
    let stem = source_file
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(source_file);
    let title = stem.replace(['_', '-'], " ").trim().to_string();
    if title.is_empty() {
        "Untitled".to_string()
    } else {
        title
    }
}
