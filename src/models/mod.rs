pub mod analysis;
pub mod chat;
pub mod meeting;
pub mod proposal;

pub use analysis::{AvailabilityMention, MeetingAnalysis};
pub use chat::{ChatMessage, Participant, User};
pub use meeting::{Meeting, MeetingStatus};
pub use proposal::MeetingProposal;
