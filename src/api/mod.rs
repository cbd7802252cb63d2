pub mod analytics;
pub mod chat;
pub mod leave_request;
