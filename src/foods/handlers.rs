use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        repo::Role,
        services::{require_role, AuthUser},
    },
    error::ApiError,
    foods::{
        dto::{CreateFoodRequest, FoodSearchQuery},
        repo::{self, FoodItem},
    },
    state::AppState,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/:id", get(get_food))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodItem>), ApiError> {
    require_role(&auth, Role::Dietitian)?;

    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Food name is required".into()));
    }
    if payload.calories < 0.0 {
        return Err(ApiError::Validation("Calories cannot be negative".into()));
    }

    if repo::find_by_name(&state.db, payload.name.trim())
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Food already in the catalog".into()));
    }

    let food = repo::create(&state.db, &payload).await?;
    info!(food_id = %food.id, name = %food.name, "food item created");
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(q): Query<FoodSearchQuery>,
) -> Result<Json<Vec<FoodItem>>, ApiError> {
    let term = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let foods = repo::search(&state.db, term).await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FoodItem>, ApiError> {
    let food = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food not found".into()))?;
    Ok(Json(food))
}
