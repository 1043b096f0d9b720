use axum::{Extension, Json};
use duka_core::types::{ChatReply, ChatTurn};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
}

/// POST /api/chat. Public. Always answers 200: a missing or malformed body
/// is treated as an empty history, and upstream trouble is absorbed by the
/// assistant's fallback reply.
pub async fn chat(
    Extension(state): Extension<AppState>,
    body: Option<Json<ChatRequest>>,
) -> Json<ChatReply> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    Json(state.assistant.reply(&req.messages).await)
}
