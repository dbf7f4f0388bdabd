use serde::{Deserialize, Serialize};

use super::Participant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityMention {
    pub person: String,
    /// The raw statement, i.e. the full message body.
    pub availability: String,
    pub time_mentions: Vec<String>,
}

/// Structured availability model extracted from a chat log.
///
/// Every collection is always present when serialized, regardless of which
/// analyzer produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MeetingAnalysis {
    pub has_meeting_intent: bool,
    pub participants: Vec<Participant>,
    pub availability_mentions: Vec<AvailabilityMention>,
    /// Highest-consensus first.
    pub suggested_times: Vec<String>,
    pub missing_info: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

impl MeetingAnalysis {
    pub fn no_intent(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            ..Self::default()
        }
    }
}
