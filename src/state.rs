use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::error;

use crate::config::Config;
use crate::error::AppError;
use crate::service::chatbot::ChatBot;
use crate::service::leave_manager::LeaveManager;
use crate::service::session::SessionManager;
use crate::store::LocalStore;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    leaves: RwLock<LeaveManager>,
    sessions: RwLock<SessionManager>,
    pub chatbot: ChatBot,
}

impl AppState {
    pub fn load(store: Arc<LocalStore>, config: &Config) -> Self {
        Self {
            leaves: RwLock::new(LeaveManager::load(store.clone())),
            sessions: RwLock::new(SessionManager::load(store)),
            chatbot: ChatBot::new(config.chat_typing_delay),
        }
    }

    pub fn leaves(&self) -> Result<RwLockReadGuard<'_, LeaveManager>, AppError> {
        self.leaves.read().map_err(|_| poisoned("leave requests"))
    }

    pub fn leaves_mut(&self) -> Result<RwLockWriteGuard<'_, LeaveManager>, AppError> {
        self.leaves.write().map_err(|_| poisoned("leave requests"))
    }

    pub fn sessions(&self) -> Result<RwLockReadGuard<'_, SessionManager>, AppError> {
        self.sessions.read().map_err(|_| poisoned("session"))
    }

    pub fn sessions_mut(&self) -> Result<RwLockWriteGuard<'_, SessionManager>, AppError> {
        self.sessions.write().map_err(|_| poisoned("session"))
    }
}

fn poisoned(what: &str) -> AppError {
    error!(what, "State lock poisoned");
    AppError::Internal
}
