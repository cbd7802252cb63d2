use std::sync::Arc;

use chrono::{DateTime, Utc};
use derive_more::Display;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::model::leave_request::{
    Classification, Decision, LeaveRequest, NewLeaveRequest, RequestStatus,
};
use crate::service::analytics::RequestSummary;
use crate::service::classifier::classify;
use crate::store::LocalStore;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LeaveError {
    #[display(fmt = "Please fill in all required fields ({} is blank)", _0)]
    MissingField(&'static str),
    #[display(fmt = "start_date cannot be after end_date")]
    InvalidDateRange,
    #[display(fmt = "Leave request {} not found", _0)]
    NotFound(String),
    #[display(fmt = "Leave request {} is already {}", id, status)]
    AlreadyDecided { id: String, status: RequestStatus },
}

impl std::error::Error for LeaveError {}

/// Narrows a listing; `None` fields match everything.
#[derive(Debug, Default, Clone)]
pub struct LeaveQuery<'a> {
    pub employee_name: Option<&'a str>,
    pub status: Option<RequestStatus>,
    pub classification: Option<Classification>,
}

/// Owns the request collection and writes it back to the store after every
/// change. A failed write is logged; the in-memory change still stands.
pub struct LeaveManager {
    requests: Vec<LeaveRequest>,
    store: Arc<LocalStore>,
}

impl LeaveManager {
    pub fn new(store: Arc<LocalStore>, requests: Vec<LeaveRequest>) -> Self {
        Self { requests, store }
    }

    /// Start from whatever the store holds.
    pub fn load(store: Arc<LocalStore>) -> Self {
        let requests = store.load_requests_or_default();
        info!(count = requests.len(), "Loaded leave requests");
        Self::new(store, requests)
    }

    pub fn submit(&mut self, new: NewLeaveRequest) -> Result<LeaveRequest, LeaveError> {
        self.submit_at(new, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        new: NewLeaveRequest,
        submitted_at: DateTime<Utc>,
    ) -> Result<LeaveRequest, LeaveError> {
        if new.employee_name.trim().is_empty() {
            return Err(LeaveError::MissingField("employee_name"));
        }
        if new.reason.trim().is_empty() {
            return Err(LeaveError::MissingField("reason"));
        }
        if new.start_date > new.end_date {
            return Err(LeaveError::InvalidDateRange);
        }

        let request = LeaveRequest {
            id: self.next_id(),
            classification: classify(&new.reason),
            employee_name: new.employee_name,
            leave_type: new.leave_type,
            reason: new.reason,
            start_date: new.start_date,
            end_date: new.end_date,
            status: RequestStatus::Pending,
            submitted_at,
        };

        info!(
            id = %request.id,
            employee = %request.employee_name,
            classification = %request.classification,
            "Leave request submitted"
        );

        self.requests.push(request.clone());
        self.persist();
        Ok(request)
    }

    /// Move a pending request to approved or rejected. Decided requests stay
    /// as they are.
    pub fn set_status(&mut self, id: &str, decision: Decision) -> Result<LeaveRequest, LeaveError> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| LeaveError::NotFound(id.to_string()))?;

        if request.status.is_terminal() {
            debug!(id, status = %request.status, "Ignoring decision on a decided request");
            return Err(LeaveError::AlreadyDecided {
                id: id.to_string(),
                status: request.status,
            });
        }

        request.status = decision.status();
        let updated = request.clone();
        info!(id, status = %updated.status, "Leave request decided");

        self.persist();
        Ok(updated)
    }

    pub fn get(&self, id: &str) -> Option<&LeaveRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Everything, in submission order.
    pub fn all(&self) -> &[LeaveRequest] {
        &self.requests
    }

    pub fn list_for(&self, employee_name: &str) -> Vec<&LeaveRequest> {
        self.query(&LeaveQuery {
            employee_name: Some(employee_name),
            ..Default::default()
        })
    }

    pub fn query(&self, query: &LeaveQuery<'_>) -> Vec<&LeaveRequest> {
        self.requests
            .iter()
            .filter(|r| query.employee_name.is_none_or(|name| r.employee_name == name))
            .filter(|r| query.status.is_none_or(|s| r.status == s))
            .filter(|r| query.classification.is_none_or(|c| r.classification == c))
            .collect()
    }

    pub fn aggregate(&self) -> RequestSummary {
        RequestSummary::tally(&self.requests)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_requests(&self.requests) {
            error!(error = %e, "Failed to save leave requests");
        }
    }
}
