pub mod delegated;
pub mod heuristic;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{ChatMessage, MeetingAnalysis, Participant};

pub use delegated::DelegatedAnalyzer;
pub use heuristic::HeuristicAnalyzer;

/// Input shared by every analyzer: the ordered log, its resolved
/// participants and the day the analysis is run on.
pub struct AnalysisRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub participants: &'a [Participant],
    pub today: NaiveDate,
}

#[async_trait]
pub trait MeetingAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest<'_>) -> anyhow::Result<MeetingAnalysis>;

    fn name(&self) -> &'static str;
}
