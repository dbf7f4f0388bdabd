use chrono::{NaiveDate, Utc};

use crate::models::{ChatMessage, MeetingAnalysis, MeetingProposal};
use crate::services::analyzer::{AnalysisRequest, HeuristicAnalyzer, MeetingAnalyzer};
use crate::services::participants::resolve_participants;
use crate::services::proposal;

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulingError {
    NoMeetingIntent,
}

impl std::fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::NoMeetingIntent => write!(f, "No meeting intent detected"),
        }
    }
}

impl std::error::Error for SchedulingError {}

/// Turns a chat log into an analysis and a single proposal.
///
/// The optional delegated analyzer is tried first; any failure is logged and
/// the heuristic result is returned instead, so analysis never fails.
pub struct MeetingScheduler {
    delegated: Option<Box<dyn MeetingAnalyzer>>,
    heuristic: HeuristicAnalyzer,
}

impl MeetingScheduler {
    pub fn heuristic() -> Self {
        Self {
            delegated: None,
            heuristic: HeuristicAnalyzer,
        }
    }

    pub fn with_delegate(delegated: Box<dyn MeetingAnalyzer>) -> Self {
        Self {
            delegated: Some(delegated),
            heuristic: HeuristicAnalyzer,
        }
    }

    pub async fn analyze(&self, messages: &[ChatMessage]) -> MeetingAnalysis {
        self.analyze_on(messages, Utc::now().date_naive()).await
    }

    pub async fn analyze_on(&self, messages: &[ChatMessage], today: NaiveDate) -> MeetingAnalysis {
        let participants = resolve_participants(messages);

        if messages.is_empty() || participants.is_empty() {
            return MeetingAnalysis::no_intent(participants);
        }

        let request = AnalysisRequest {
            messages,
            participants: &participants,
            today,
        };

        if let Some(delegated) = &self.delegated {
            match delegated.analyze(&request).await {
                Ok(analysis) => {
                    tracing::info!(
                        analyzer = delegated.name(),
                        has_intent = analysis.has_meeting_intent,
                        suggestions = analysis.suggested_times.len(),
                        "chat analyzed"
                    );
                    return analysis;
                }
                Err(e) => {
                    tracing::warn!(
                        analyzer = delegated.name(),
                        error = %e,
                        "delegated analysis failed, falling back to heuristic"
                    );
                }
            }
        }

        let analysis = self.heuristic.run(&request);
        tracing::info!(
            analyzer = self.heuristic.name(),
            has_intent = analysis.has_meeting_intent,
            suggestions = analysis.suggested_times.len(),
            "chat analyzed"
        );
        analysis
    }

    /// Name of the analyzer consulted first.
    pub fn analyzer_name(&self) -> &'static str {
        self.delegated
            .as_ref()
            .map_or(self.heuristic.name(), |delegated| delegated.name())
    }

    /// Analysis plus proposal, rejected when the chat shows no meeting intent.
    pub async fn schedule(
        &self,
        messages: &[ChatMessage],
    ) -> Result<(MeetingAnalysis, MeetingProposal), SchedulingError> {
        let today = Utc::now().date_naive();
        let analysis = self.analyze_on(messages, today).await;
        if !analysis.has_meeting_intent {
            return Err(SchedulingError::NoMeetingIntent);
        }
        let proposal = proposal::propose_on(&analysis, today);
        Ok((analysis, proposal))
    }
}
