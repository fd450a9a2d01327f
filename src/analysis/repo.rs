use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::analysis::engine::EntryNutrients;

/// Count of day-log rows in the inclusive range. This is a document count;
/// a log whose meals are all empty still counts.
pub async fn count_logs(
    db: &PgPool,
    patient_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM intake_logs
        WHERE patient_id = $1 AND log_date BETWEEN $2 AND $3
        "#,
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .fetch_one(db)
    .await?;
    Ok(count)
}

/// Every entry in the range with the catalog's current per-serving values.
/// The entry's own cached calorie snapshot is deliberately not selected.
pub async fn fetch_entry_nutrients(
    db: &PgPool,
    patient_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<EntryNutrients>> {
    let entries = sqlx::query_as::<_, EntryNutrients>(
        r#"
        SELECT e.quantity,
               f.calories, f.protein_g, f.carbs_g, f.fat_g,
               f.vata_effect, f.pitta_effect, f.kapha_effect
        FROM intake_entries e
        JOIN intake_logs l ON l.id = e.log_id
        JOIN food_items f ON f.id = e.food_item_id
        WHERE l.patient_id = $1 AND l.log_date BETWEEN $2 AND $3
        "#,
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await?;
    Ok(entries)
}
