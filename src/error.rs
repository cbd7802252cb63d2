use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

use crate::service::leave_manager::LeaveError;
use crate::service::session::SessionError;

/// Error returned by handlers; rendered as `{"message": ...}`.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    #[display(fmt = "Not signed in")]
    NotSignedIn,
    #[display(fmt = "{}", _0)]
    Leave(LeaveError),
    #[display(fmt = "{}", _0)]
    Session(SessionError),
    /// Detail is logged where it happens, never sent to the client.
    #[display(fmt = "Internal Server Error")]
    Internal,
}

impl std::error::Error for AppError {}

impl From<LeaveError> for AppError {
    fn from(e: LeaveError) -> Self {
        AppError::Leave(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Session(_) => StatusCode::BAD_REQUEST,
            AppError::NotSignedIn => StatusCode::UNAUTHORIZED,
            AppError::Leave(e) => match e {
                LeaveError::MissingField(_) | LeaveError::InvalidDateRange => {
                    StatusCode::BAD_REQUEST
                }
                LeaveError::NotFound(_) => StatusCode::NOT_FOUND,
                LeaveError::AlreadyDecided { .. } => StatusCode::CONFLICT,
            },
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
