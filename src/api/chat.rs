use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::service::chatbot::ChatMessage;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    #[schema(example = "How many vacation days do I get?")]
    pub message: String,
}

/// Both bubbles of one exchange.
#[derive(Serialize, ToSchema)]
pub struct ChatExchange {
    pub user: ChatMessage,
    pub bot: ChatMessage,
}

/// Conversation opener
#[utoipa::path(
    get,
    path = "/api/chat/welcome",
    responses(
        (status = 200, description = "Greeting from the assistant", body = ChatMessage)
    ),
    tag = "Chat"
)]
pub async fn welcome(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.chatbot.welcome())
}

/// Ask the HR assistant a question; the reply arrives after a short typing pause
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body(
        content = ChatRequest,
        description = "User message",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "User message and assistant reply", body = ChatExchange),
        (status = 400, description = "Empty message", body = Object, example = json!({
            "message": "Message must not be empty"
        }))
    ),
    tag = "Chat"
)]
pub async fn send_message(
    state: web::Data<AppState>,
    payload: web::Json<ChatRequest>,
) -> Result<impl Responder, AppError> {
    let text = payload.into_inner().message;
    if text.trim().is_empty() {
        return Err(AppError::BadRequest("Message must not be empty".to_string()));
    }

    let user = ChatMessage::user(text);
    let bot = state.chatbot.reply(&user.content).await;
    debug!(question = %user.content, "Chat reply sent");

    Ok(HttpResponse::Ok().json(ChatExchange { user, bot }))
}
