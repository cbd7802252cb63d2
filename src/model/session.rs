use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::role::Role;

/// Who is signed in. Any non-empty username is accepted; nothing is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "role": "employee", "username": "alice" }))]
pub struct SessionIdentity {
    pub role: Role,
    pub username: String,
}
