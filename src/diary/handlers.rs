use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::services::AuthUser,
    diary::{
        dto::{CreateLogRequest, DiaryDayResponse, DiaryQuery, DayTotals, DiaryEntry},
        repo::{self, DiaryLog},
    },
    food,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/diary", get(get_day).post(create_log))
}

#[instrument(skip(state, payload))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<DiaryLog>), (StatusCode, String)> {
    if payload.quantity <= 0.0 {
        return Err((StatusCode::BAD_REQUEST, "Quantity must be positive".into()));
    }
    let log_date = payload
        .log_date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    // The food must exist in the local catalog
    match food::repo::find_by_id(&state.db, payload.food_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Food not found".into())),
        Err(e) => {
            error!(error = %e, food_id = %payload.food_id, "food lookup failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    }

    let duplicate = repo::exists(
        &state.db,
        user_id,
        payload.food_id,
        payload.meal_type,
        log_date,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "duplicate check failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    if duplicate {
        warn!(user_id = %user_id, food_id = %payload.food_id, "duplicate diary log");
        return Err((
            StatusCode::CONFLICT,
            "This food is already logged for that meal".into(),
        ));
    }

    let log = repo::insert(
        &state.db,
        user_id,
        payload.food_id,
        payload.meal_type,
        payload.quantity,
        log_date,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "insert diary log failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(user_id = %user_id, log_id = %log.id, %log_date, "diary log created");
    Ok((StatusCode::CREATED, Json(log)))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<DiaryQuery>,
) -> Result<Json<DiaryDayResponse>, (StatusCode, String)> {
    let date = params
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let rows = repo::list_for_day(&state.db, user_id, date)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user_id, "diary day load failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    let entries: Vec<DiaryEntry> = rows.into_iter().map(DiaryEntry::from).collect();
    let totals = DayTotals::accumulate(&entries);
    Ok(Json(DiaryDayResponse {
        date,
        entries,
        totals,
    }))
}
