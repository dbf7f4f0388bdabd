use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::ChatMessage;
use crate::state::AppState;

// GET /api/chats
pub async fn get_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = {
        let db = state.db()?;
        queries::list_chat_messages(&db)?
    };
    Ok(Json(messages))
}

// POST /api/chats
#[derive(Deserialize)]
pub struct NewChatMessage {
    pub user_name: String,
    pub user_email: String,
    pub message: String,
}

pub async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewChatMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    if body.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".to_string()));
    }

    let message = ChatMessage {
        sender_name: body.user_name.trim().to_string(),
        sender_contact: body.user_email.trim().to_string(),
        body: body.message,
        sent_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db()?;
        queries::insert_chat_message(&db, &message)?;
    }

    // Broadcast to SSE subscribers; ignore if no receivers
    let _ = state.chat_tx.send(message.clone());

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/chats/events — SSE stream of new messages
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.chat_tx.subscribe();

    let live_stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(message) => {
            let data = serde_json::to_string(&message).unwrap_or_default();
            Some(Ok::<_, Infallible>(Event::default().data(data).event("chat_message")))
        }
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "chat event subscriber lagged");
            None
        }
    });

    let keepalive_stream = tokio_stream::StreamExt::map(
        tokio_stream::wrappers::IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok::<_, Infallible>(Event::default().comment("keepalive")),
    );

    Sse::new(StreamExt::merge(live_stream, keepalive_stream))
}
