use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::MeetingProposal;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub proposed_time: String,
    pub timezone: String,
    pub duration_minutes: i32,
    pub participants: Vec<String>,
    pub reasoning: String,
    pub status: MeetingStatus,
    pub created_at: NaiveDateTime,
}

impl Meeting {
    pub fn from_proposal(
        title: &str,
        proposal: MeetingProposal,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            proposed_time: proposal.proposed_time,
            timezone: proposal.timezone,
            duration_minutes: proposal.duration_minutes,
            participants: proposal.participants,
            reasoning: proposal.reasoning,
            status: MeetingStatus::Proposed,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Proposed,
    Confirmed,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Proposed => "proposed",
            MeetingStatus::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => MeetingStatus::Confirmed,
            _ => MeetingStatus::Proposed,
        }
    }
}
