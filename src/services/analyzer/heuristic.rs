use async_trait::async_trait;

use super::{AnalysisRequest, MeetingAnalyzer};
use crate::models::MeetingAnalysis;
use crate::services::availability::{collect_mentions, suggest_times};
use crate::services::intent::has_meeting_intent;
use crate::services::proposal::tomorrow;

const MISSING_INFO: [&str; 2] = ["Specific time preferences", "Meeting duration"];
const FOLLOW_UP_QUESTIONS: [&str; 2] = [
    "What time works best for everyone?",
    "How long should the meeting be?",
];

/// Keyword intent plus catalogue time extraction. Always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn run(&self, request: &AnalysisRequest<'_>) -> MeetingAnalysis {
        let has_intent = has_meeting_intent(request.messages);
        let mentions = collect_mentions(request.messages);

        let (suggested_times, missing_info, follow_up_questions) = if has_intent {
            (
                suggest_times(&mentions, tomorrow(request.today)),
                MISSING_INFO.iter().map(|s| s.to_string()).collect(),
                FOLLOW_UP_QUESTIONS.iter().map(|s| s.to_string()).collect(),
            )
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };

        MeetingAnalysis {
            has_meeting_intent: has_intent,
            participants: request.participants.to_vec(),
            availability_mentions: mentions,
            suggested_times,
            missing_info,
            follow_up_questions,
        }
    }
}

#[async_trait]
impl MeetingAnalyzer for HeuristicAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest<'_>) -> anyhow::Result<MeetingAnalysis> {
        Ok(self.run(request))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
