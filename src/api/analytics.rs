use actix_web::{HttpResponse, Responder, web};

use crate::error::AppError;
use crate::service::analytics::RequestSummary;
use crate::state::AppState;

/// Totals by status, classification and leave type
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    responses(
        (status = 200, description = "Request summary", body = RequestSummary)
    ),
    tag = "Analytics"
)]
pub async fn summary(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let summary: RequestSummary = state.leaves()?.aggregate();
    Ok(HttpResponse::Ok().json(summary))
}
