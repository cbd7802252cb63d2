pub mod analytics;
pub mod chatbot;
pub mod classifier;
pub mod leave_manager;
pub mod session;
