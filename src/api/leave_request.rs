use crate::error::AppError;
use crate::model::leave_request::{
    Classification, Decision, LeaveRequest, LeaveType, NewLeaveRequest, RequestStatus,
};
use crate::service::leave_manager::{LeaveError, LeaveQuery};
use crate::session::extractor::SessionUser;
use crate::state::AppState;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};

/// Submit form. Every field is required; missing or blank ones are reported
/// together as a single "fill in all fields" error.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeave {
    #[serde(rename = "type")]
    #[schema(example = "sick")]
    pub leave_type: Option<String>,
    #[schema(example = "doctor appointment")]
    pub reason: Option<String>,
    #[schema(example = "2024-01-10", format = "date")]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-11", format = "date")]
    pub end_date: Option<String>,
}

fn filled(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {field}: `{raw}`")))
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    #[schema(example = "alice")]
    /// Filter by submitter name (exact match)
    pub employee_name: Option<String>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<RequestStatus>,
    #[schema(example = "expense")]
    /// Filter by derived classification
    pub classification: Option<Classification>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    #[schema(example = 1)]
    pub total: usize,
}

const MISSING_FIELDS: &str = "Please fill in all required fields.";

/* =========================
Submit leave request
========================= */
/// Submit a leave request as the signed-in employee
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request form",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Missing field or bad date range", body = Object, example = json!({
            "message": "Please fill in all required fields."
        })),
        (status = 401, description = "Not signed in")
    ),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip(user, state, payload), fields(employee = %user.username))]
pub async fn create_leave(
    user: SessionUser,
    state: web::Data<AppState>,
    payload: web::Json<CreateLeave>,
) -> Result<impl Responder, AppError> {
    let CreateLeave {
        leave_type,
        reason,
        start_date,
        end_date,
    } = payload.into_inner();

    let (Some(leave_type), Some(reason), Some(start_date), Some(end_date)) = (
        filled(leave_type),
        filled(reason),
        filled(start_date),
        filled(end_date),
    ) else {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    };

    let leave_type: LeaveType = leave_type
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid leave type: `{leave_type}`")))?;
    let start_date = parse_date("startDate", &start_date)?;
    let end_date = parse_date("endDate", &end_date)?;

    let created = state.leaves_mut()?.submit(NewLeaveRequest {
        employee_name: user.username,
        leave_type,
        reason,
        start_date,
        end_date,
    });

    match created {
        Ok(request) => Ok(HttpResponse::Created().json(request)),
        Err(LeaveError::MissingField(_)) => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        Err(e) => Err(e.into()),
    }
}

/* =========================
Approve leave (Admin)
========================= */
/// Approve a pending leave request
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request 42 not found"
        })),
        (status = 409, description = "Leave request already decided", body = Object, example = json!({
            "message": "Leave request 42 is already rejected"
        }))
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    user: Option<SessionUser>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    decide(user, &state, &path.into_inner(), Decision::Approve)
}

/* =========================
Reject leave (Admin)
========================= */
/// Reject a pending leave request
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request 42 not found"
        })),
        (status = 409, description = "Leave request already decided", body = Object, example = json!({
            "message": "Leave request 42 is already approved"
        }))
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    user: Option<SessionUser>,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    decide(user, &state, &path.into_inner(), Decision::Reject)
}

fn decide(
    user: Option<SessionUser>,
    state: &AppState,
    leave_id: &str,
    decision: Decision,
) -> Result<HttpResponse, AppError> {
    let updated = state.leaves_mut()?.set_status(leave_id, decision)?;

    // roles are not enforced; the decider is only recorded in the log
    match &user {
        Some(u) => info!(leave_id, by = %u.username, role = %u.role, ?decision, "Decision recorded"),
        None => info!(leave_id, ?decision, "Decision recorded without a session"),
    }

    Ok(HttpResponse::Ok().json(updated))
}

/// Fetch one leave request
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request 42 not found"
        }))
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let leave_id = path.into_inner();
    let leaves = state.leaves()?;

    match leaves.get(&leave_id) {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Err(LeaveError::NotFound(leave_id).into()),
    }
}

/// The signed-in employee's own requests, oldest first
#[utoipa::path(
    get,
    path = "/api/leave/mine",
    responses(
        (status = 200, description = "Requests submitted by the current user", body = [LeaveRequest]),
        (status = 401, description = "Not signed in")
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    user: SessionUser,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let leaves = state.leaves()?;
    Ok(HttpResponse::Ok().json(leaves.list_for(&user.username)))
}

/// All leave requests, filtered and paginated, in submission order
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    state: web::Data<AppState>,
    query: web::Query<LeaveFilter>,
) -> Result<impl Responder, AppError> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    // pages past the addressable range come back empty
    let offset = (page - 1)
        .checked_mul(per_page)
        .and_then(|o| usize::try_from(o).ok())
        .unwrap_or(usize::MAX);

    let leaves = state.leaves()?;
    let matching = leaves.query(&LeaveQuery {
        employee_name: query.employee_name.as_deref(),
        status: query.status,
        classification: query.classification,
    });

    let response = LeaveListResponse {
        total: matching.len(),
        data: matching
            .into_iter()
            .skip(offset)
            .take(usize::try_from(per_page).unwrap_or(usize::MAX))
            .cloned()
            .collect(),
        page,
        per_page,
    };

    Ok(HttpResponse::Ok().json(response))
}
