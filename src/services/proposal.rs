use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{MeetingAnalysis, MeetingProposal};

pub const DEFAULT_DURATION_MINUTES: i32 = 60;
pub const DEFAULT_TIMEZONE: &str = "UTC";

const CONSENSUS_REASONING: &str =
    "Based on the most agreed-upon time from the group chat conversation.";
const REDATED_REASONING: &str = "Based on a suggested time from the chat, scheduled for tomorrow.";
const DEFAULT_REASONING: &str = "Scheduled for tomorrow afternoon based on typical business hours, \
     as no specific times were mentioned.";

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Resolves an analysis into a single proposal relative to `today`.
pub fn propose_on(analysis: &MeetingAnalysis, today: NaiveDate) -> MeetingProposal {
    let participants = analysis
        .participants
        .iter()
        .map(|p| p.name.clone())
        .collect();
    let date_str = tomorrow(today).format("%Y-%m-%d").to_string();
    let default_slot = || (format!("{date_str} 14:00"), DEFAULT_REASONING);

    let (proposed_time, reasoning) = match analysis.suggested_times.first() {
        Some(candidate) => match dated(candidate) {
            Some(verbatim) => (verbatim, CONSENSUS_REASONING),
            None => match time_of_day(candidate) {
                Some(time) => {
                    tracing::debug!(
                        candidate = %candidate,
                        "suggested time has no date, using tomorrow"
                    );
                    (format!("{date_str} {time}"), REDATED_REASONING)
                }
                None => {
                    tracing::warn!(
                        candidate = %candidate,
                        "unusable suggested time, using default slot"
                    );
                    default_slot()
                }
            },
        },
        None => {
            tracing::warn!("no suggested times, falling back to default proposal");
            default_slot()
        }
    };

    MeetingProposal {
        proposed_time,
        timezone: DEFAULT_TIMEZONE.to_string(),
        duration_minutes: DEFAULT_DURATION_MINUTES,
        participants,
        reasoning: reasoning.to_string(),
    }
}

// "YYYY-MM-DD HH:MM AM" and "YYYY-MM-DD HH:MM" pass through as written;
// ISO "YYYY-MM-DDTHH:MM[:SS]" is rewritten into the 12-hour form.
fn dated(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if NaiveDateTime::parse_from_str(candidate, "%Y-%m-%d %I:%M %p").is_ok()
        || NaiveDateTime::parse_from_str(candidate, "%Y-%m-%d %H:%M").is_ok()
    {
        return Some(candidate.to_string());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(candidate, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %I:%M %p").to_string())
}

// Trailing clock time of an undated candidate: "HH:MM AM", "2 PM", "2pm" or "14:00".
fn time_of_day(candidate: &str) -> Option<String> {
    let tokens: Vec<&str> = candidate.split_whitespace().collect();
    let (last, rest) = tokens.split_last()?;

    let spaced_meridiem = last.eq_ignore_ascii_case("am") || last.eq_ignore_ascii_case("pm");
    if spaced_meridiem {
        let hour = rest.last()?;
        return is_clock_time(hour, last).then(|| format!("{hour} {last}"));
    }

    let lower = last.to_ascii_lowercase();
    if let Some(hour) = lower.strip_suffix("am").or_else(|| lower.strip_suffix("pm")) {
        let meridiem = &last[hour.len()..];
        return is_clock_time(&last[..hour.len()], meridiem).then(|| last.to_string());
    }

    NaiveTime::parse_from_str(last, "%H:%M")
        .is_ok()
        .then(|| last.to_string())
}

fn is_clock_time(hour: &str, meridiem: &str) -> bool {
    let text = if hour.contains(':') {
        format!("{hour} {meridiem}")
    } else {
        format!("{hour}:00 {meridiem}")
    };
    NaiveTime::parse_from_str(&text, "%I:%M %p").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    fn analysis(times: &[&str]) -> MeetingAnalysis {
        MeetingAnalysis {
            has_meeting_intent: true,
            participants: vec![
                Participant {
                    name: "Alice".to_string(),
                    email: "alice@example.com".to_string(),
                },
                Participant {
                    name: "Bob".to_string(),
                    email: "bob@example.com".to_string(),
                },
            ],
            suggested_times: times.iter().map(|t| t.to_string()).collect(),
            ..MeetingAnalysis::default()
        }
    }

    #[test]
    fn test_dated_candidate_used_verbatim() {
        let candidates = analysis(&["2026-04-01 06:00 PM", "2026-04-01 09:00 AM"]);
        let proposal = propose_on(&candidates, today());
        assert_eq!(proposal.proposed_time, "2026-04-01 06:00 PM");
        assert_eq!(proposal.reasoning, CONSENSUS_REASONING);
        assert_eq!(proposal.participants, vec!["Alice", "Bob"]);
        assert_eq!(proposal.duration_minutes, 60);
        assert_eq!(proposal.timezone, "UTC");
    }

    #[test]
    fn test_24_hour_dated_candidate_used_verbatim() {
        let proposal = propose_on(&analysis(&["2026-04-02 14:00"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-02 14:00");
        assert_eq!(proposal.reasoning, CONSENSUS_REASONING);
    }

    #[test]
    fn test_undated_candidate_gets_tomorrow() {
        let proposal = propose_on(&analysis(&["Friday at 2 PM"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 2 PM");
        assert_eq!(proposal.reasoning, REDATED_REASONING);

        let proposal = propose_on(&analysis(&["09:00 AM"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 09:00 AM");

        let proposal = propose_on(&analysis(&["around 6pm"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 6pm");

        let proposal = propose_on(&analysis(&["after lunch, 15:30"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 15:30");
        assert_eq!(proposal.reasoning, REDATED_REASONING);
    }

    #[test]
    fn test_iso_candidate_keeps_single_date() {
        let proposal = propose_on(&analysis(&["2026-04-01T18:00:00"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 06:00 PM");
        assert_eq!(proposal.reasoning, CONSENSUS_REASONING);

        let proposal = propose_on(&analysis(&["2026-04-03T09:30"]), today());
        assert_eq!(proposal.proposed_time, "2026-04-03 09:30 AM");
    }

    #[test]
    fn test_candidate_without_clock_time_uses_default_slot() {
        for candidate in ["", "   ", "noon-ish", "PM", "25 pm", "2026-04-01"] {
            let proposal = propose_on(&analysis(&[candidate]), today());
            assert_eq!(proposal.proposed_time, "2026-04-01 14:00", "{candidate:?}");
            assert_eq!(proposal.reasoning, DEFAULT_REASONING);
        }
    }

    #[test]
    fn test_empty_suggestions_use_default_slot() {
        let proposal = propose_on(&analysis(&[]), today());
        assert_eq!(proposal.proposed_time, "2026-04-01 14:00");
        assert_eq!(proposal.reasoning, DEFAULT_REASONING);
        assert_eq!(proposal.duration_minutes, 60);
    }

    #[test]
    fn test_idempotent() {
        let a = analysis(&["noon-ish"]);
        assert_eq!(propose_on(&a, today()), propose_on(&a, today()));
    }
}
