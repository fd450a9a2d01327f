use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// One of the four fixed daily eating occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_slot", rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Day-level intake log. At most one row exists per (patient, log_date);
/// the unique constraint in the schema enforces it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IntakeLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub dietitian_id: Option<Uuid>,
    pub log_date: Date,
    pub total_calories: f64,
    pub created_at: OffsetDateTime,
}

/// Entry row joined with the subset of catalog fields the wire shape needs.
#[derive(Debug, Clone, FromRow)]
pub struct EntryWithFood {
    pub id: Uuid,
    pub slot: MealSlot,
    pub quantity: f64,
    pub unit: String,
    pub calories: f64,
    pub food_id: Uuid,
    pub food_name: String,
    pub food_serving_size: String,
    pub food_calories: f64,
}

/// Resolves or creates the day's log and appends one entry, in a single
/// transaction. The upsert makes concurrent first-appends for the same day
/// land on the same row instead of racing a find-then-create. An existing
/// log with no clinician reference gets it backfilled here.
#[allow(clippy::too_many_arguments)]
pub async fn append_entry(
    db: &PgPool,
    patient_id: Uuid,
    dietitian_id: Option<Uuid>,
    date: Date,
    slot: MealSlot,
    food_item_id: Uuid,
    quantity: f64,
    unit: &str,
    calories: f64,
) -> anyhow::Result<Uuid> {
    let mut tx = db.begin().await?;

    let log_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO intake_logs (patient_id, dietitian_id, log_date)
        VALUES ($1, $2, $3)
        ON CONFLICT (patient_id, log_date)
        DO UPDATE SET dietitian_id = COALESCE(intake_logs.dietitian_id, EXCLUDED.dietitian_id)
        RETURNING id
        "#,
    )
    .bind(patient_id)
    .bind(dietitian_id)
    .bind(date)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO intake_entries (log_id, slot, food_item_id, quantity, unit, calories)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(log_id)
    .bind(slot)
    .bind(food_item_id)
    .bind(quantity)
    .bind(unit)
    .bind(calories)
    .execute(&mut *tx)
    .await?;

    // running cached sum, incremented rather than recomputed
    sqlx::query(
        r#"
        UPDATE intake_logs
        SET total_calories = total_calories + $2
        WHERE id = $1
        "#,
    )
    .bind(log_id)
    .bind(calories)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(log_id)
}

pub async fn fetch_log(
    db: &PgPool,
    patient_id: Uuid,
    date: Date,
) -> anyhow::Result<Option<IntakeLog>> {
    let log = sqlx::query_as::<_, IntakeLog>(
        r#"
        SELECT id, patient_id, dietitian_id, log_date, total_calories, created_at
        FROM intake_logs
        WHERE patient_id = $1 AND log_date = $2
        "#,
    )
    .bind(patient_id)
    .bind(date)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn fetch_entries(db: &PgPool, log_id: Uuid) -> anyhow::Result<Vec<EntryWithFood>> {
    let entries = sqlx::query_as::<_, EntryWithFood>(
        r#"
        SELECT e.id, e.slot, e.quantity, e.unit, e.calories,
               f.id AS food_id,
               f.name AS food_name,
               f.serving_size AS food_serving_size,
               f.calories AS food_calories
        FROM intake_entries e
        JOIN food_items f ON f.id = e.food_item_id
        WHERE e.log_id = $1
        ORDER BY e.created_at
        "#,
    )
    .bind(log_id)
    .fetch_all(db)
    .await?;
    Ok(entries)
}
