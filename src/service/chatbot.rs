use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

pub const WELCOME: &str = "Hello! I'm your HR assistant. I can help you with company policies, leave requests, benefits, and more. What would you like to know?";

/// Keyword table, checked in order. The first keyword found in the message
/// picks the reply.
const RESPONSES: &[(&str, &str)] = &[
    (
        "leave",
        "Our leave policy allows 20 vacation days and 10 sick days per year. Leave requests should be submitted at least 2 weeks in advance for approval.",
    ),
    (
        "vacation",
        "Vacation requests can be submitted through the leave request form. You have access to your annual vacation balance in your profile.",
    ),
    (
        "sick",
        "Sick leave can be taken when needed. Please notify your manager and submit the request as soon as possible.",
    ),
    (
        "benefits",
        "We offer comprehensive health insurance, dental, vision, 401k matching, and flexible work arrangements.",
    ),
    (
        "policy",
        "You can find all company policies in our employee handbook. Specific questions about policies can be directed to HR.",
    ),
    (
        "overtime",
        "Overtime must be pre-approved by your manager. Overtime rates are 1.5x your regular hourly rate.",
    ),
    (
        "remote",
        "Remote work is available 2-3 days per week depending on your role. Please coordinate with your manager.",
    ),
    (
        "training",
        "Professional development opportunities include conferences, online courses, and internal training programs.",
    ),
    (
        "performance",
        "Performance reviews are conducted annually with mid-year check-ins. Goals are set collaboratively with managers.",
    ),
];

const GREETINGS: &[&str] = &["hello", "hi"];
const GREETING_REPLY: &str = "Hello! How can I assist you with HR-related questions today?";

const HELP_REPLY: &str = "I can help you with: leave policies, benefits, remote work, training opportunities, performance reviews, and general company policies. What specifically would you like to know?";

const FALLBACK_REPLY: &str = "I understand you're asking about HR policies. Could you be more specific? I can help with leave policies, benefits, remote work, training, or general company policies.";

/// Canned reply for one message. Earlier turns play no part.
pub fn respond(user_text: &str) -> &'static str {
    let text = user_text.to_lowercase();

    if let Some(&(_, reply)) = RESPONSES.iter().find(|(keyword, _)| text.contains(*keyword)) {
        return reply;
    }

    if GREETINGS.iter().any(|g| text.contains(*g)) {
        return GREETING_REPLY;
    }

    if text.contains("help") {
        return HELP_REPLY;
    }

    FALLBACK_REPLY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    #[schema(example = "2024-01-09T08:30:00Z", format = "date-time", value_type = String)]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot)
    }
}

/// Wraps [`respond`] with the pause that shows "typing" in the chat window.
#[derive(Debug, Clone)]
pub struct ChatBot {
    typing_delay: Duration,
}

impl ChatBot {
    pub fn new(typing_delay: Duration) -> Self {
        Self { typing_delay }
    }

    pub fn welcome(&self) -> ChatMessage {
        ChatMessage::bot(WELCOME)
    }

    pub async fn reply(&self, user_text: &str) -> ChatMessage {
        if !self.typing_delay.is_zero() {
            actix_web::rt::time::sleep(self.typing_delay).await;
        }
        ChatMessage::bot(respond(user_text))
    }
}
