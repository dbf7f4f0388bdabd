use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::ChatMessage;
use crate::services::scheduler::MeetingScheduler;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub scheduler: MeetingScheduler,
    pub chat_tx: broadcast::Sender<ChatMessage>,
}

impl AppState {
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("database lock poisoned")))
    }
}
