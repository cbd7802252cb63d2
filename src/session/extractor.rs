use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::error::AppError;
use crate::model::role::Role;
use crate::state::AppState;

/// The signed-in user, taken from the saved session. Handlers that need an
/// identity take this as an argument; a missing session is a 401.
pub struct SessionUser {
    pub username: String,
    pub role: Role,
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = match req.app_data::<Data<AppState>>() {
            Some(s) => s,
            None => {
                tracing::error!("AppState missing from app data");
                return ready(Err(AppError::Internal));
            }
        };

        let sessions = match state.sessions() {
            Ok(s) => s,
            Err(e) => return ready(Err(e)),
        };

        ready(
            sessions
                .current()
                .map(|identity| SessionUser {
                    username: identity.username.clone(),
                    role: identity.role,
                })
                .ok_or(AppError::NotSignedIn),
        )
    }
}
