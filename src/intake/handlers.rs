use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{
        repo::Role,
        services::{require_my_patient, require_role, AuthUser},
    },
    error::ApiError,
    intake::{
        dto::{parse_date, DateQuery, DayLogResponse, LogIntakeRequest},
        services,
    },
    state::AppState,
};

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/patient/intake", get(my_log).post(log_intake))
}

pub fn dietitian_routes() -> Router<AppState> {
    Router::new().route("/dietitian/patients/:patient_id/logs", get(patient_log))
}

#[instrument(skip(state, payload))]
pub async fn log_intake(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<LogIntakeRequest>,
) -> Result<Json<DayLogResponse>, ApiError> {
    require_role(&auth, Role::Patient)?;
    let log = services::append_entry(&state, auth.id, payload).await?;
    Ok(Json(log))
}

#[instrument(skip(state))]
pub async fn my_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(q): Query<DateQuery>,
) -> Result<Json<DayLogResponse>, ApiError> {
    require_role(&auth, Role::Patient)?;
    let date = parse_date(&q.date)?;
    let log = services::day_log(&state, auth.id, date).await?;
    Ok(Json(log))
}

#[instrument(skip(state))]
pub async fn patient_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    Query(q): Query<DateQuery>,
) -> Result<Json<DayLogResponse>, ApiError> {
    let patient = require_my_patient(&state.db, &auth, patient_id).await?;
    let date = parse_date(&q.date)?;
    let log = services::day_log(&state, patient.id, date).await?;
    Ok(Json(log))
}
