//! Application state for shared services

use std::sync::Arc;

use crate::config::AppConfig;
use crate::infrastructure::services::ChatService;

/// Shared handles cloned into every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(chat_service: Arc<ChatService>, config: Arc<AppConfig>) -> Self {
        Self {
            chat_service,
            config,
        }
    }
}
