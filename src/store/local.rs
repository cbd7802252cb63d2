use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::model::leave_request::LeaveRequest;
use crate::model::session::SessionIdentity;
use crate::store::StoreError;
use crate::store::kv::KeyValueStore;

pub const SESSION_KEY: &str = "hrUser";
pub const REQUESTS_KEY: &str = "hrRequests";

/// Typed access to the two saved entries. Each key is saved on its own;
/// there is no atomicity across them.
pub struct LocalStore {
    kv: Box<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn load_session(&self) -> Result<Option<SessionIdentity>, StoreError> {
        self.read(SESSION_KEY)
    }

    /// `None` clears the saved session.
    pub fn save_session(&self, session: Option<&SessionIdentity>) -> Result<(), StoreError> {
        match session {
            Some(identity) => self.write(SESSION_KEY, identity),
            None => self.kv.remove(SESSION_KEY),
        }
    }

    pub fn load_requests(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.read(REQUESTS_KEY)?.unwrap_or_default())
    }

    pub fn save_requests(&self, requests: &[LeaveRequest]) -> Result<(), StoreError> {
        self.write(REQUESTS_KEY, requests)
    }

    /// Startup load. A malformed entry is logged and treated as absent; the
    /// next save overwrites it.
    pub fn load_session_or_default(&self) -> Option<SessionIdentity> {
        self.load_session().unwrap_or_else(|e| {
            warn!(key = SESSION_KEY, error = %e, "Ignoring unreadable saved session");
            None
        })
    }

    pub fn load_requests_or_default(&self) -> Vec<LeaveRequest> {
        self.load_requests().unwrap_or_else(|e| {
            warn!(key = REQUESTS_KEY, error = %e, "Ignoring unreadable saved requests");
            Vec::new()
        })
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(text) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.kv.set(key, &text)
    }
}
