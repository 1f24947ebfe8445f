use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument};

use crate::{
    auth::services::AuthUser,
    food::{
        dto::{CreateFoodRequest, FoodSearchQuery},
        repo::{self, FoodItem},
        services,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/food", get(search_food))
        .route("/food/barcode/:upc", get(lookup_barcode))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/food/custom", post(create_custom))
}

#[instrument(skip(state))]
pub async fn search_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(params): Query<FoodSearchQuery>,
) -> Result<Json<Vec<FoodItem>>, (StatusCode, String)> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query parameter q is required".into()));
    }
    let limit = params.limit.clamp(1, 100);

    let items = repo::search(&state.db, query, limit).await.map_err(|e| {
        error!(error = %e, query, "food search failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn lookup_barcode(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(upc): Path<String>,
) -> Result<Json<FoodItem>, (StatusCode, String)> {
    let upc = upc.trim();
    if upc.is_empty() || !upc.chars().all(|c| c.is_ascii_digit()) {
        return Err((StatusCode::BAD_REQUEST, "Invalid barcode".into()));
    }

    match services::lookup_or_fill(&state, upc).await {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Food not found".into())),
        Err(e) => {
            error!(error = %e, upc, "barcode lookup failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Barcode lookup failed".into()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_custom(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodItem>), (StatusCode, String)> {
    if let Err(reason) = payload.validate() {
        return Err((StatusCode::BAD_REQUEST, reason.into()));
    }

    let item = repo::insert_custom(&state.db, &payload).await.map_err(|e| {
        error!(error = %e, "insert custom food failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    info!(user_id = %user_id, food_id = %item.id, name = %item.name, "custom food created");
    Ok((StatusCode::CREATED, Json(item)))
}
