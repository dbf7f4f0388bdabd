use std::collections::HashSet;

use crate::models::{ChatMessage, Participant};

/// Distinct senders in order of first appearance. The first display name
/// seen for a contact wins; senders without a name or contact are skipped.
pub fn resolve_participants(messages: &[ChatMessage]) -> Vec<Participant> {
    let mut seen = HashSet::new();
    let mut participants = Vec::new();

    for msg in messages {
        let name = msg.sender_name.trim();
        let email = msg.sender_contact.trim();
        if name.is_empty() || email.is_empty() {
            continue;
        }
        if seen.insert(email.to_string()) {
            participants.push(Participant {
                name: name.to_string(),
                email: email.to_string(),
            });
        }
    }

    participants
}
