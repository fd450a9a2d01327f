use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        repo::Role,
        services::{require_my_patient, require_role, AuthUser},
    },
    error::ApiError,
    foods,
    plans::{
        dto::{CreatePlanRequest, PlanResponse},
        repo::{self, NewPlanItem},
    },
    state::AppState,
};

pub fn dietitian_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/dietitian/patients/:patient_id/diet-plans",
            get(patient_plans).post(create_plan),
        )
        .route("/dietitian/diet-plans/:id", delete(delete_plan))
}

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/patient/diet-plans", get(my_plans))
}

#[instrument(skip(state, payload))]
pub async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    Json(payload): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<PlanResponse>), ApiError> {
    let patient = require_my_patient(&state.db, &auth, patient_id).await?;

    if payload.meals.iter().all(|m| m.items.is_empty()) {
        return Err(ApiError::Validation(
            "Plan must contain at least one item".into(),
        ));
    }

    let mut items = Vec::new();
    for meal in &payload.meals {
        for item in &meal.items {
            if foods::repo::find_by_id(&state.db, item.food_id).await?.is_none() {
                return Err(ApiError::NotFound(format!(
                    "Food {} not found",
                    item.food_id
                )));
            }
            items.push(NewPlanItem {
                slot: meal.meal_type,
                food_item_id: item.food_id,
                quantity: item.quantity,
                unit: item.unit.clone(),
                notes: item.notes.clone(),
            });
        }
    }

    let name = payload.name.as_deref().unwrap_or("Weekly Plan");
    let plan = repo::create_plan(
        &state.db,
        patient.id,
        auth.id,
        name,
        payload.instructions.as_deref(),
        &items,
    )
    .await?;

    info!(plan_id = %plan.id, patient_id = %patient.id, items = items.len(), "diet plan created");

    let items = repo::fetch_items(&state.db, plan.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlanResponse::from_parts(plan, items)),
    ))
}

#[instrument(skip(state))]
pub async fn patient_plans(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let patient = require_my_patient(&state.db, &auth, patient_id).await?;
    plans_for(&state, patient.id).await
}

#[instrument(skip(state))]
pub async fn my_plans(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    require_role(&auth, Role::Patient)?;
    plans_for(&state, auth.id).await
}

async fn plans_for(state: &AppState, patient_id: Uuid) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let plans = repo::list_for_patient(&state.db, patient_id).await?;
    let mut responses = Vec::with_capacity(plans.len());
    for plan in plans {
        let items = repo::fetch_items(&state.db, plan.id).await?;
        responses.push(PlanResponse::from_parts(plan, items));
    }
    Ok(Json(responses))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_role(&auth, Role::Dietitian)?;

    let deleted = repo::delete_by_creator(&state.db, id, auth.id).await?;
    if !deleted {
        warn!(plan_id = %id, dietitian_id = %auth.id, "delete rejected, plan missing or not owned");
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    info!(plan_id = %id, "diet plan deleted");
    Ok(StatusCode::NO_CONTENT)
}
