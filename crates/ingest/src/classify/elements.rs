use brightpath_core::{ContentType, InteractiveElement};

/// Fixed renderer hints for each content type.
pub fn interactive_elements(content_type: ContentType) -> Vec<InteractiveElement> {
    let pairs: [(&str, &str); 3] = match content_type {
        ContentType::Lesson => [("text", "reading"), ("image", "illustration"), ("audio", "narration")],
        ContentType::Assessment => [
            ("quiz", "multiple-choice"),
            ("feedback", "instant"),
            ("progress", "score-tracker"),
        ],
        ContentType::Game => [("game", "drag-and-drop"), ("reward", "stars"), ("audio", "sound-effects")],
        ContentType::Activity => [
            ("activity", "step-by-step"),
            ("checklist", "completion"),
            ("timer", "countdown"),
        ],
    };

    pairs
        .into_iter()
        .map(|(kind, element)| InteractiveElement::new(kind, element))
        .collect()
}
