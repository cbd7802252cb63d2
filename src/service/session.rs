use std::sync::Arc;

use derive_more::Display;
use tracing::{error, info};

use crate::model::role::Role;
use crate::model::session::SessionIdentity;
use crate::store::LocalStore;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    #[display(fmt = "Username must not be empty")]
    EmptyUsername,
}

impl std::error::Error for SessionError {}

/// The one signed-in identity. There is no password check; any non-empty
/// username gets in with whichever role it asks for.
pub struct SessionManager {
    current: Option<SessionIdentity>,
    store: Arc<LocalStore>,
}

impl SessionManager {
    pub fn load(store: Arc<LocalStore>) -> Self {
        let current = store.load_session_or_default();
        if let Some(identity) = &current {
            info!(username = %identity.username, role = %identity.role, "Restored saved session");
        }
        Self { current, store }
    }

    pub fn login(&mut self, role: Role, username: &str) -> Result<SessionIdentity, SessionError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SessionError::EmptyUsername);
        }

        let identity = SessionIdentity {
            role,
            username: username.to_string(),
        };
        self.current = Some(identity.clone());
        self.persist();

        info!(username, %role, "Signed in");
        Ok(identity)
    }

    /// Signing out twice is fine.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!(username = %identity.username, "Signed out");
        }
        self.persist();
    }

    pub fn current(&self) -> Option<&SessionIdentity> {
        self.current.as_ref()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_session(self.current.as_ref()) {
            error!(error = %e, "Failed to save session");
        }
    }
}
