use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::User;
use crate::state::AppState;

// GET /api/users
pub async fn get_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, AppError> {
    let users = {
        let db = state.db()?;
        queries::list_users(&db)?
    };
    Ok(Json(users))
}

// POST /api/users
#[derive(Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let name = body.name.trim();
    let email = body.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }

    let user = User {
        name: name.to_string(),
        email: email.to_string(),
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db()?;
        queries::create_user(&db, &user)?;
    }

    tracing::info!(email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}
