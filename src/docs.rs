use crate::api::chat::{ChatExchange, ChatRequest};
use crate::api::leave_request::{CreateLeave, LeaveFilter, LeaveListResponse};
use crate::model::leave_request::{Classification, LeaveRequest, LeaveType, RequestStatus};
use crate::model::role::Role;
use crate::model::session::SessionIdentity;
use crate::service::analytics::{
    ClassificationCounts, LeaveTypeCount, RequestSummary, StatusCounts,
};
use crate::service::chatbot::{ChatMessage, Sender};
use crate::session::handlers::LoginReqDto;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Desk API",
        version = "0.1.0",
        description = r#"
## HR Self-Service Desk

A small HR self-service demo: employees sign in with any name, submit leave
requests and chat with a scripted HR assistant; an admin reviews requests and
sees simple analytics.

### Key Features
- **Leave Requests**
  - Submit, list your own, approve or reject pending requests
  - Each request is classified as leave, expense or transfer from its reason
- **HR Assistant**
  - Keyword-matched answers about leave, benefits, remote work and more
- **Analytics**
  - Counts by status, classification and leave type, plus approval rate

### Sessions
There is no password check. Signing in records a role and a display name;
the employee endpoints use that name.

### Response Format
- JSON responses; errors carry a `message` field
- Pagination supported for the admin request list
"#,
    ),
    paths(
        crate::session::handlers::login,
        crate::session::handlers::logout,
        crate::session::handlers::current,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::analytics::summary,

        crate::api::chat::welcome,
        crate::api::chat::send_message
    ),
    components(
        schemas(
            LoginReqDto,
            SessionIdentity,
            Role,
            CreateLeave,
            LeaveFilter,
            LeaveListResponse,
            LeaveRequest,
            LeaveType,
            RequestStatus,
            Classification,
            RequestSummary,
            StatusCounts,
            ClassificationCounts,
            LeaveTypeCount,
            ChatRequest,
            ChatExchange,
            ChatMessage,
            Sender
        )
    ),
    tags(
        (name = "Session", description = "Sign in and out"),
        (name = "Leave", description = "Leave request APIs"),
        (name = "Analytics", description = "Admin summary figures"),
        (name = "Chat", description = "HR assistant"),
    )
)]
pub struct ApiDoc;
