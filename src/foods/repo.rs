use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::foods::dto::CreateFoodRequest;

/// Directional effect of a food on one dosha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "dosha_effect", rename_all = "lowercase")]
pub enum DoshaEffect {
    Pacifies,
    Aggravates,
    Neutral,
}

impl Default for DoshaEffect {
    fn default() -> Self {
        Self::Neutral
    }
}

/// Per-dosha classification of a catalog item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct DoshaProfile {
    #[sqlx(rename = "vata_effect")]
    #[serde(default)]
    pub vata: DoshaEffect,
    #[sqlx(rename = "pitta_effect")]
    #[serde(default)]
    pub pitta: DoshaEffect,
    #[sqlx(rename = "kapha_effect")]
    #[serde(default)]
    pub kapha: DoshaEffect,
}

impl Default for DoshaProfile {
    fn default() -> Self {
        Self {
            vata: DoshaEffect::Neutral,
            pitta: DoshaEffect::Neutral,
            kapha: DoshaEffect::Neutral,
        }
    }
}

/// Immutable catalog row: nutrient values per serving plus Ayurvedic
/// properties. Never mutated by the intake or analysis paths.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "servingSize")]
    pub serving_size: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub rasa: Option<String>,
    pub virya: Option<String>,
    pub vipaka: Option<String>,
    pub guna: Option<String>,
    #[sqlx(flatten)]
    #[serde(rename = "doshaEffect")]
    pub dosha: DoshaProfile,
    pub created_at: OffsetDateTime,
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
    let food = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, name, serving_size, calories, protein_g, carbs_g, fat_g, fiber_g,
               rasa, virya, vipaka, guna, vata_effect, pitta_effect, kapha_effect, created_at
        FROM food_items
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(food)
}

/// Case-insensitive exact name match, the lookup used before creating a new
/// catalog row from an external source.
pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<FoodItem>> {
    let food = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, name, serving_size, calories, protein_g, carbs_g, fat_g, fiber_g,
               rasa, virya, vipaka, guna, vata_effect, pitta_effect, kapha_effect, created_at
        FROM food_items
        WHERE lower(name) = lower($1)
        LIMIT 1
        "#,
    )
    .bind(name)
    .fetch_optional(db)
    .await?;
    Ok(food)
}

pub async fn search(db: &PgPool, term: Option<&str>) -> anyhow::Result<Vec<FoodItem>> {
    let foods = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, name, serving_size, calories, protein_g, carbs_g, fat_g, fiber_g,
               rasa, virya, vipaka, guna, vata_effect, pitta_effect, kapha_effect, created_at
        FROM food_items
        WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
        ORDER BY name
        LIMIT 20
        "#,
    )
    .bind(term)
    .fetch_all(db)
    .await?;
    Ok(foods)
}

pub async fn create(db: &PgPool, req: &CreateFoodRequest) -> anyhow::Result<FoodItem> {
    let food = sqlx::query_as::<_, FoodItem>(
        r#"
        INSERT INTO food_items
            (name, serving_size, calories, protein_g, carbs_g, fat_g, fiber_g,
             rasa, virya, vipaka, guna, vata_effect, pitta_effect, kapha_effect)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING id, name, serving_size, calories, protein_g, carbs_g, fat_g, fiber_g,
                  rasa, virya, vipaka, guna, vata_effect, pitta_effect, kapha_effect, created_at
        "#,
    )
    .bind(&req.name)
    .bind(&req.serving_size)
    .bind(req.calories)
    .bind(req.protein_g)
    .bind(req.carbs_g)
    .bind(req.fat_g)
    .bind(req.fiber_g)
    .bind(&req.rasa)
    .bind(&req.virya)
    .bind(&req.vipaka)
    .bind(&req.guna)
    .bind(req.dosha.vata)
    .bind(req.dosha.pitta)
    .bind(req.dosha.kapha)
    .fetch_one(db)
    .await?;
    Ok(food)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dosha_effect_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&DoshaEffect::Aggravates).unwrap(),
            r#""aggravates""#
        );
        let parsed: DoshaEffect = serde_json::from_str(r#""pacifies""#).unwrap();
        assert_eq!(parsed, DoshaEffect::Pacifies);
    }

    #[test]
    fn dosha_profile_defaults_to_neutral() {
        let profile = DoshaProfile::default();
        assert_eq!(profile.vata, DoshaEffect::Neutral);
        assert_eq!(profile.pitta, DoshaEffect::Neutral);
        assert_eq!(profile.kapha, DoshaEffect::Neutral);
    }

    #[test]
    fn dosha_profile_deserializes_partial_object() {
        let profile: DoshaProfile = serde_json::from_str(r#"{"vata":"aggravates"}"#).unwrap();
        assert_eq!(profile.vata, DoshaEffect::Aggravates);
        assert_eq!(profile.pitta, DoshaEffect::Neutral);
    }
}
