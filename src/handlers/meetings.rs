use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Meeting, MeetingAnalysis, MeetingStatus};
use crate::state::AppState;

const DEFAULT_TITLE: &str = "Group Meeting";

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// POST /api/analyze-chat
pub async fn analyze_chat(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MeetingAnalysis>, AppError> {
    let messages = {
        let db = state.db()?;
        queries::list_chat_messages(&db)?
    };

    Ok(Json(state.scheduler.analyze(&messages).await))
}

// POST /api/schedule-meeting
#[derive(Deserialize, Default)]
pub struct ScheduleRequest {
    pub title: Option<String>,
}

pub async fn schedule_meeting(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ScheduleRequest>>,
) -> Result<(StatusCode, Json<Meeting>), AppError> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);

    let messages = {
        let db = state.db()?;
        queries::list_chat_messages(&db)?
    };

    let (_, proposal) = state.scheduler.schedule(&messages).await?;
    let meeting = Meeting::from_proposal(title, proposal, Utc::now().naive_utc());

    {
        let db = state.db()?;
        queries::create_meeting(&db, &meeting)?;
    }

    tracing::info!(
        meeting_id = %meeting.id,
        proposed_time = %meeting.proposed_time,
        participants = meeting.participants.len(),
        "meeting proposed"
    );

    Ok((StatusCode::CREATED, Json(meeting)))
}

// GET /api/meetings
pub async fn get_meetings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Meeting>>, AppError> {
    let meetings = {
        let db = state.db()?;
        queries::list_meetings(&db)?
    };
    Ok(Json(meetings))
}

// POST /api/confirm-meeting/:id
pub async fn confirm_meeting(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Meeting>, AppError> {
    let meeting = {
        let db = state.db()?;
        if queries::update_meeting_status(&db, &id, &MeetingStatus::Confirmed)? {
            queries::get_meeting(&db, &id)?
        } else {
            None
        }
    };

    let meeting = meeting.ok_or_else(|| AppError::NotFound(format!("meeting {id}")))?;
    tracing::info!(meeting_id = %id, "meeting confirmed");
    Ok(Json(meeting))
}

// DELETE /api/clear-all-data
pub async fn clear_all_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    {
        let db = state.db()?;
        queries::clear_all(&db)?;
    }

    tracing::info!("all data cleared");
    Ok(Json(serde_json::json!({"message": "All data cleared successfully"})))
}
