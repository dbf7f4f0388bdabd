use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{AnalysisRequest, MeetingAnalyzer};
use crate::models::{AvailabilityMention, MeetingAnalysis, Participant};
use crate::services::ai::{LlmProvider, Message};
use crate::services::proposal::tomorrow;

const SYSTEM_PROMPT: &str = r#"You analyze group chat conversations for meeting scheduling intent and extract availability information.

Return ONLY valid JSON (no markdown, no explanation) with this exact structure:
{
  "has_meeting_intent": true,
  "participants": [{"name": "string", "email": "string"}],
  "availability_mentions": [
    {"person": "string", "availability": "string", "time_mentions": ["string"]}
  ],
  "suggested_times": ["YYYY-MM-DD HH:MM AM"],
  "missing_info": ["string"],
  "follow_up_questions": ["string"]
}

Rules:
- Extract the exact clock times mentioned in the chat (9 AM, 2 PM, 6 PM, ...).
- If several times are mentioned, put the time most people agree on FIRST.
- Every suggested time uses the date given below and the format "YYYY-MM-DD HH:MM AM".
"#;

/// Hands the transcript to an external language model.
pub struct DelegatedAnalyzer {
    llm: Box<dyn LlmProvider>,
    timeout: Duration,
}

impl DelegatedAnalyzer {
    pub fn new(llm: Box<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }
}

#[async_trait]
impl MeetingAnalyzer for DelegatedAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest<'_>) -> anyhow::Result<MeetingAnalysis> {
        let transcript = request
            .messages
            .iter()
            .map(|m| m.transcript_line())
            .collect::<Vec<_>>()
            .join("\n");
        let date_str = tomorrow(request.today).format("%Y-%m-%d");

        let system = format!(
            "{SYSTEM_PROMPT}- Use {date_str} for every suggestion, e.g. \"9 AM works for me\" becomes \"{date_str} 09:00 AM\".\n"
        );
        let messages = [Message::user(format!("Chat conversation:\n{transcript}"))];

        let response = tokio::time::timeout(self.timeout, self.llm.chat(&system, &messages))
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "{} analyzer timed out after {:?}",
                    self.llm.name(),
                    self.timeout
                )
            })??;

        tracing::debug!(provider = self.llm.name(), raw = %response, "analyzer response");

        parse_analysis_response(&response, request.participants)
    }

    fn name(&self) -> &'static str {
        "delegated"
    }
}

/// Validates an untrusted analyzer response field by field. Absent or
/// mistyped fields fall back to `false` or empty collections; the
/// participant list always comes from the chat log itself.
pub fn parse_analysis_response(
    response: &str,
    participants: &[Participant],
) -> anyhow::Result<MeetingAnalysis> {
    let value = extract_json_object(response)
        .ok_or_else(|| anyhow::anyhow!("analyzer response contains no JSON object"))?;

    Ok(MeetingAnalysis {
        has_meeting_intent: value
            .get("has_meeting_intent")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        participants: participants.to_vec(),
        availability_mentions: value
            .get("availability_mentions")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(parse_mention).collect())
            .unwrap_or_default(),
        suggested_times: string_list(&value, "suggested_times"),
        missing_info: string_list(&value, "missing_info"),
        follow_up_questions: string_list(&value, "follow_up_questions"),
    })
}

fn extract_json_object(response: &str) -> Option<serde_json::Map<String, Value>> {
    // Well-behaved providers return a bare object.
    if let Ok(Value::Object(map)) = serde_json::from_str(response) {
        return Some(map);
    }

    // ```json ... ``` wrapper
    let trimmed = response.trim();
    let cleaned = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(Value::Object(map)) = serde_json::from_str(cleaned) {
        return Some(map);
    }

    // Object surrounded by prose
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn string_list(value: &serde_json::Map<String, Value>, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| non_blank_strings(items))
        .unwrap_or_default()
}

// Non-string and whitespace-only entries are dropped.
fn non_blank_strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_mention(item: &Value) -> Option<AvailabilityMention> {
    let person = item.get("person")?.as_str()?.to_string();
    let availability = item
        .get("availability")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let time_mentions = item
        .get("time_mentions")
        .and_then(Value::as_array)
        .map(|t| non_blank_strings(t))
        .unwrap_or_default();

    Some(AvailabilityMention {
        person,
        availability,
        time_mentions,
    })
}
