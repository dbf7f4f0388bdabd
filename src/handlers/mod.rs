pub mod chats;
pub mod health;
pub mod meetings;
pub mod users;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/users", get(users::get_users).post(users::create_user))
        .route("/api/chats", get(chats::get_chats).post(chats::create_message))
        .route("/api/chats/events", get(chats::events_stream))
        .route("/api/analyze-chat", post(meetings::analyze_chat))
        .route("/api/schedule-meeting", post(meetings::schedule_meeting))
        .route("/api/meetings", get(meetings::get_meetings))
        .route("/api/confirm-meeting/:id", post(meetings::confirm_meeting))
        .route("/api/clear-all-data", delete(meetings::clear_all_data))
        .with_state(state)
}
