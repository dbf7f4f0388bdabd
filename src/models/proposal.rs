use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingProposal {
    /// Date plus time of day, e.g. "2026-10-19 06:00 PM".
    pub proposed_time: String,
    pub timezone: String,
    pub duration_minutes: i32,
    pub participants: Vec<String>,
    pub reasoning: String,
}
