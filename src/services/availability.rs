use chrono::NaiveDate;

use crate::models::{AvailabilityMention, ChatMessage};
use crate::services::extract::{extract_time_mentions, has_availability_language};

const MAX_SUGGESTIONS: usize = 3;
const FALLBACK_TIMES: [&str; 3] = ["10:00 AM", "03:00 PM", "05:00 PM"];

/// One mention per message that talks about availability or names a time.
pub fn collect_mentions(messages: &[ChatMessage]) -> Vec<AvailabilityMention> {
    messages
        .iter()
        .filter_map(|msg| {
            let time_mentions = extract_time_mentions(&msg.body);
            if time_mentions.is_empty() && !has_availability_language(&msg.body) {
                return None;
            }
            Some(AvailabilityMention {
                person: msg.sender_name.clone(),
                availability: msg.body.clone(),
                time_mentions,
            })
        })
        .collect()
}

/// Ranked candidate times, each prefixed with `date` ("YYYY-MM-DD HH:MM AM").
///
/// Ranking is by first occurrence across the log, not by how many people
/// named a time. Falls back to a fixed triple when nothing was extracted.
pub fn suggest_times(mentions: &[AvailabilityMention], date: NaiveDate) -> Vec<String> {
    let mut unique: Vec<&str> = Vec::new();
    for token in mentions.iter().flat_map(|m| m.time_mentions.iter()) {
        if !unique.contains(&token.as_str()) {
            unique.push(token);
        }
    }
    unique.truncate(MAX_SUGGESTIONS);

    if unique.is_empty() {
        unique.extend(FALLBACK_TIMES);
    }

    let date_str = date.format("%Y-%m-%d");
    unique.iter().map(|t| format!("{date_str} {t}")).collect()
}
