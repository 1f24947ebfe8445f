use serde::{Deserialize, Serialize};

use crate::chat::repo::Message;

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    50
}

/// Response for POST /chat: the persisted user row and the AI's reply row.
#[derive(Debug, Serialize)]
pub struct ChatExchange {
    pub message: Message,
    pub reply: Message,
}

/// Response for POST /ai/recommend.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub daily_calorie_target: i32,
    pub recommendation: String,
}
