use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::auth::repo::{Role, User};
use crate::error::ApiError;
use crate::foods;
use crate::intake::dto::{group_entries, parse_date, DayLogResponse, LogIntakeRequest, MealSet};
use crate::intake::repo;
use crate::state::AppState;

/// Appends one consumed item to the patient's day log, creating the log on
/// first use. The entry caches `calories per serving x quantity` as logged.
pub async fn append_entry(
    state: &AppState,
    patient_id: Uuid,
    req: LogIntakeRequest,
) -> Result<DayLogResponse, ApiError> {
    let food = foods::repo::find_by_id(&state.db, req.food_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Food not found".into()))?;

    let patient = User::find_by_id(&state.db, patient_id)
        .await?
        .filter(|u| u.role == Role::Patient)
        .ok_or_else(|| ApiError::NotFound("Patient not found".into()))?;

    let date = parse_date(&req.date)?;
    let calories = food.calories * req.quantity;

    repo::append_entry(
        &state.db,
        patient.id,
        patient.dietitian_id,
        date,
        req.meal_type,
        food.id,
        req.quantity,
        &req.unit,
        calories,
    )
    .await?;

    info!(
        patient_id = %patient.id,
        food_id = %food.id,
        slot = ?req.meal_type,
        calories,
        "intake entry logged"
    );

    day_log(state, patient_id, date).await
}

/// Returns the day's log, or a fully populated empty shape when none exists.
pub async fn day_log(
    state: &AppState,
    patient_id: Uuid,
    date: Date,
) -> Result<DayLogResponse, ApiError> {
    match repo::fetch_log(&state.db, patient_id, date).await? {
        Some(log) => {
            let entries = repo::fetch_entries(&state.db, log.id).await?;
            Ok(DayLogResponse {
                date: log.log_date,
                meals: group_entries(entries),
                total_calories: log.total_calories,
            })
        }
        None => Ok(DayLogResponse {
            date,
            meals: MealSet::default(),
            total_calories: 0.0,
        }),
    }
}
