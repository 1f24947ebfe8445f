use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::{repo_types::User, services::AuthUser},
    chat::{
        dto::{ChatExchange, RecommendationResponse, SendMessageRequest, TranscriptQuery},
        repo::{self, Message, AI_PEER},
        services,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", get(get_transcript).post(send_message))
        .route("/ai/recommend", post(recommend))
}

#[instrument(skip(state))]
pub async fn get_transcript(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<TranscriptQuery>,
) -> Result<Json<Vec<Message>>, (StatusCode, String)> {
    let limit = params.limit.clamp(1, 200);
    let messages = repo::transcript(&state.db, user_id, limit)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "transcript load failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    Ok(Json(messages))
}

#[instrument(skip(state, payload))]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SendMessageRequest>,
) -> Result<Json<ChatExchange>, (StatusCode, String)> {
    let text = payload.message.trim();
    if text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Message is required".into()));
    }

    let user = load_user(&state, user_id).await?;

    let message = repo::append(&state.db, user_id, AI_PEER, text)
        .await
        .map_err(|e| {
            error!(error = %e, "persist user message failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let reply_text = services::dietitian_reply(&state, &user, text)
        .await
        .map_err(|e| {
            error!(error = %e, "dietitian reply failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let reply = repo::append(&state.db, AI_PEER, user_id, &reply_text)
        .await
        .map_err(|e| {
            error!(error = %e, "persist reply failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    info!(user_id = %user_id, message_id = %message.id, "chat exchange completed");
    Ok(Json(ChatExchange { message, reply }))
}

#[instrument(skip(state))]
pub async fn recommend(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RecommendationResponse>, (StatusCode, String)> {
    let user = load_user(&state, user_id).await?;
    let (daily_calorie_target, recommendation) = services::recommend_meals(&state, &user).await;
    Ok(Json(RecommendationResponse {
        daily_calorie_target,
        recommendation,
    }))
}

async fn load_user(state: &AppState, user_id: uuid::Uuid) -> Result<User, (StatusCode, String)> {
    User::find_by_id(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "load user failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))
}
