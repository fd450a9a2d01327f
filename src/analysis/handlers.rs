use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    analysis::{
        dto::{AnalysisQuery, AnalysisResponse},
        services,
    },
    auth::{
        repo::Role,
        services::{require_my_patient, require_role, AuthUser},
    },
    error::ApiError,
    state::AppState,
};

pub fn patient_routes() -> Router<AppState> {
    Router::new().route("/patient/analysis", get(my_analysis))
}

pub fn dietitian_routes() -> Router<AppState> {
    Router::new().route(
        "/dietitian/patients/:patient_id/analysis",
        get(patient_analysis),
    )
}

#[instrument(skip(state))]
pub async fn my_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(q): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    require_role(&auth, Role::Patient)?;
    let analysis = services::compose_analysis(&state, auth.id, &q.from, &q.to).await?;
    Ok(Json(analysis))
}

#[instrument(skip(state))]
pub async fn patient_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(patient_id): Path<Uuid>,
    Query(q): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let patient = require_my_patient(&state.db, &auth, patient_id).await?;
    let analysis = services::compose_analysis(&state, patient.id, &q.from, &q.to).await?;
    Ok(Json(analysis))
}
