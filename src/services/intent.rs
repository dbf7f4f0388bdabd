use crate::models::ChatMessage;

const MEETING_KEYWORDS: &[&str] = &[
    "meeting",
    "schedule",
    "call",
    "discuss",
    "meet",
    "appointment",
    "conference",
];

/// Keyword heuristic over the whole log.
pub fn has_meeting_intent(messages: &[ChatMessage]) -> bool {
    let text = messages
        .iter()
        .map(|m| m.body.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    MEETING_KEYWORDS.iter().any(|k| text.contains(k))
}
