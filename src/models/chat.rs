use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    #[serde(rename = "user_name")]
    pub sender_name: String,
    #[serde(rename = "user_email")]
    pub sender_contact: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(rename = "timestamp")]
    pub sent_at: NaiveDateTime,
}

impl ChatMessage {
    pub fn new(
        sender_name: &str,
        sender_contact: &str,
        body: &str,
        sent_at: NaiveDateTime,
    ) -> Self {
        Self {
            sender_name: sender_name.to_string(),
            sender_contact: sender_contact.to_string(),
            body: body.to_string(),
            sent_at,
        }
    }

    /// Transcript line as fed to the external analyzer.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender_name, self.body)
    }
}

/// A distinct chat participant, keyed by contact address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}
