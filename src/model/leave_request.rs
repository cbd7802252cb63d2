use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Emergency,
    Bereavement,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Approved and rejected requests never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Classification {
    Leave,
    Expense,
    Transfer,
}

/// Admin action on a pending request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// Stored leave request. Field names follow the saved `hrRequests` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": "0d8c4f1e-6a43-4e0b-9a55-34a4b0d2c7a1",
    "employeeName": "alice",
    "type": "sick",
    "reason": "doctor appointment",
    "startDate": "2024-01-10",
    "endDate": "2024-01-11",
    "status": "pending",
    "classification": "leave",
    "submittedAt": "2024-01-09T08:30:00Z"
}))]
pub struct LeaveRequest {
    pub id: String,
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub reason: String,
    #[schema(example = "2024-01-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-01-11", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub status: RequestStatus,
    pub classification: Classification,
    #[schema(example = "2024-01-09T08:30:00Z", format = "date-time", value_type = String)]
    pub submitted_at: DateTime<Utc>,
}

/// Fields supplied by the submitter. Everything else is assigned on submit.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub reason: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample() -> LeaveRequest {
        LeaveRequest {
            id: "req-1".into(),
            employee_name: "alice".into(),
            leave_type: LeaveType::Bereavement,
            reason: "family funeral".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            status: RequestStatus::Approved,
            classification: Classification::Leave,
            submitted_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_saved_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "req-1",
                "employeeName": "alice",
                "type": "bereavement",
                "reason": "family funeral",
                "startDate": "2024-03-04",
                "endDate": "2024-03-06",
                "status": "approved",
                "classification": "leave",
                "submittedAt": "2024-03-01T09:15:00Z"
            })
        );
    }

    #[test]
    fn reads_millisecond_timestamps_from_browser_saves() {
        let raw = json!({
            "id": "1718000000000",
            "employeeName": "bob",
            "type": "vacation",
            "reason": "beach",
            "startDate": "2024-06-10",
            "endDate": "2024-06-14",
            "status": "pending",
            "classification": "leave",
            "submittedAt": "2024-06-01T12:00:00.123Z"
        });
        let req: LeaveRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.submitted_at.timestamp_subsec_millis(), 123);
        assert_eq!(req.leave_type, LeaveType::Vacation);
    }

    #[test]
    fn only_pending_is_open() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert_eq!(Decision::Reject.status(), RequestStatus::Rejected);
    }
}
