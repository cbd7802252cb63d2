use serde::Serialize;
use utoipa::ToSchema;

use crate::model::leave_request::{Classification, LeaveRequest, LeaveType, RequestStatus};

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn sum(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClassificationCounts {
    pub leave: usize,
    pub expense: usize,
    pub transfer: usize,
}

impl ClassificationCounts {
    pub fn sum(&self) -> usize {
        self.leave + self.expense + self.transfer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LeaveTypeCount {
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub count: usize,
}

/// Admin dashboard figures.
#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "total": 2,
    "by_status": { "pending": 1, "approved": 1, "rejected": 0 },
    "by_classification": { "leave": 1, "expense": 1, "transfer": 0 },
    "by_leave_type": [ { "type": "sick", "count": 2 } ],
    "approval_rate": 50
}))]
pub struct RequestSummary {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_classification: ClassificationCounts,
    /// In order of first appearance.
    pub by_leave_type: Vec<LeaveTypeCount>,
    /// Whole percent of requests approved, 0 when there are none.
    pub approval_rate: u32,
}

impl RequestSummary {
    pub fn tally(requests: &[LeaveRequest]) -> Self {
        let mut summary = RequestSummary {
            total: requests.len(),
            ..Default::default()
        };

        for req in requests {
            match req.status {
                RequestStatus::Pending => summary.by_status.pending += 1,
                RequestStatus::Approved => summary.by_status.approved += 1,
                RequestStatus::Rejected => summary.by_status.rejected += 1,
            }

            match req.classification {
                Classification::Leave => summary.by_classification.leave += 1,
                Classification::Expense => summary.by_classification.expense += 1,
                Classification::Transfer => summary.by_classification.transfer += 1,
            }

            match summary
                .by_leave_type
                .iter_mut()
                .find(|c| c.leave_type == req.leave_type)
            {
                Some(existing) => existing.count += 1,
                None => summary.by_leave_type.push(LeaveTypeCount {
                    leave_type: req.leave_type,
                    count: 1,
                }),
            }
        }

        if summary.total > 0 {
            let rate = summary.by_status.approved as f64 * 100.0 / summary.total as f64;
            summary.approval_rate = rate.round() as u32;
        }

        summary
    }
}
