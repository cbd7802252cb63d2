use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::role::Role;
use crate::model::session::SessionIdentity;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "employee")]
    pub role: Role,
    #[schema(example = "alice")]
    pub username: String,
}

/// Sign in with any non-empty username. A `password` field, if sent, is ignored.
#[utoipa::path(
    post,
    path = "/session/login",
    request_body(
        content = LoginReqDto,
        description = "Role and display name",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Signed in", body = SessionIdentity),
        (status = 400, description = "Empty username", body = Object, example = json!({
            "message": "Username must not be empty"
        }))
    ),
    tag = "Session"
)]
#[instrument(
    name = "session_login",
    skip(state, payload),
    fields(username = %payload.username, role = %payload.role)
)]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    info!("Login request received");

    let identity = state
        .sessions_mut()?
        .login(payload.role, &payload.username)?;

    Ok(HttpResponse::Ok().json(identity))
}

/// Sign out; succeeds whether or not anyone was signed in
#[utoipa::path(
    post,
    path = "/session/logout",
    responses(
        (status = 204, description = "Signed out")
    ),
    tag = "Session"
)]
pub async fn logout(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    state.sessions_mut()?.logout();
    Ok(HttpResponse::NoContent().finish())
}

/// Who is signed in
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current identity", body = SessionIdentity),
        (status = 401, description = "Nobody signed in", body = Object, example = json!({
            "message": "Not signed in"
        }))
    ),
    tag = "Session"
)]
pub async fn current(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let sessions = state.sessions()?;
    let identity = sessions.current().ok_or(AppError::NotSignedIn)?;
    Ok(HttpResponse::Ok().json(identity))
}
