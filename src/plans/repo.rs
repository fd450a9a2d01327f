use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::intake::repo::MealSlot;

/// Prescription header. Plans are append-only: a newer plan supersedes the
/// old one, nothing is edited in place.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DietPlan {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub dietitian_id: Uuid,
    pub name: String,
    pub instructions: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewPlanItem {
    pub slot: MealSlot,
    pub food_item_id: Uuid,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
}

/// Plan item joined with the catalog subset used by the wire shape.
#[derive(Debug, Clone, FromRow)]
pub struct PlanItemWithFood {
    pub slot: MealSlot,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub food_id: Uuid,
    pub food_name: String,
    pub food_serving_size: String,
    pub food_calories: f64,
}

/// Per-item nutrient values for target resolution, read live from the
/// catalog.
#[derive(Debug, Clone, FromRow)]
pub struct PlanItemNutrients {
    pub quantity: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

pub async fn create_plan(
    db: &PgPool,
    patient_id: Uuid,
    dietitian_id: Uuid,
    name: &str,
    instructions: Option<&str>,
    items: &[NewPlanItem],
) -> anyhow::Result<DietPlan> {
    let mut tx = db.begin().await?;

    let plan = sqlx::query_as::<_, DietPlan>(
        r#"
        INSERT INTO diet_plans (patient_id, dietitian_id, name, instructions)
        VALUES ($1, $2, $3, $4)
        RETURNING id, patient_id, dietitian_id, name, instructions, created_at
        "#,
    )
    .bind(patient_id)
    .bind(dietitian_id)
    .bind(name)
    .bind(instructions)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        sqlx::query(
            r#"
            INSERT INTO diet_plan_items (plan_id, slot, food_item_id, quantity, unit, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(plan.id)
        .bind(item.slot)
        .bind(item.food_item_id)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(&item.notes)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(plan)
}

pub async fn list_for_patient(db: &PgPool, patient_id: Uuid) -> anyhow::Result<Vec<DietPlan>> {
    let plans = sqlx::query_as::<_, DietPlan>(
        r#"
        SELECT id, patient_id, dietitian_id, name, instructions, created_at
        FROM diet_plans
        WHERE patient_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(patient_id)
    .fetch_all(db)
    .await?;
    Ok(plans)
}

/// The most recently created plan is the only one used for targets.
pub async fn find_active(db: &PgPool, patient_id: Uuid) -> anyhow::Result<Option<DietPlan>> {
    let plan = sqlx::query_as::<_, DietPlan>(
        r#"
        SELECT id, patient_id, dietitian_id, name, instructions, created_at
        FROM diet_plans
        WHERE patient_id = $1
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(patient_id)
    .fetch_optional(db)
    .await?;
    Ok(plan)
}

pub async fn fetch_items(db: &PgPool, plan_id: Uuid) -> anyhow::Result<Vec<PlanItemWithFood>> {
    let items = sqlx::query_as::<_, PlanItemWithFood>(
        r#"
        SELECT i.slot, i.quantity, i.unit, i.notes,
               f.id AS food_id,
               f.name AS food_name,
               f.serving_size AS food_serving_size,
               f.calories AS food_calories
        FROM diet_plan_items i
        JOIN food_items f ON f.id = i.food_item_id
        WHERE i.plan_id = $1
        ORDER BY i.slot, i.id
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

pub async fn fetch_plan_nutrients(
    db: &PgPool,
    plan_id: Uuid,
) -> anyhow::Result<Vec<PlanItemNutrients>> {
    let items = sqlx::query_as::<_, PlanItemNutrients>(
        r#"
        SELECT i.quantity, f.calories, f.protein_g, f.carbs_g, f.fat_g
        FROM diet_plan_items i
        JOIN food_items f ON f.id = i.food_item_id
        WHERE i.plan_id = $1
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;
    Ok(items)
}

/// Deletes a plan, but only for the dietitian who created it.
pub async fn delete_by_creator(
    db: &PgPool,
    plan_id: Uuid,
    dietitian_id: Uuid,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM diet_plans
        WHERE id = $1 AND dietitian_id = $2
        "#,
    )
    .bind(plan_id)
    .bind(dietitian_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}
