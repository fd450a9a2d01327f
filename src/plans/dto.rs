use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::intake::dto::FoodRef;
use crate::intake::repo::MealSlot;
use crate::plans::repo::{DietPlan, PlanItemWithFood};

#[derive(Debug, Deserialize)]
pub struct PlanItemRequest {
    #[serde(rename = "foodId")]
    pub food_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanMealRequest {
    #[serde(rename = "mealType")]
    pub meal_type: MealSlot,
    pub items: Vec<PlanItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    pub meals: Vec<PlanMealRequest>,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "serving".into()
}

#[derive(Debug, Serialize)]
pub struct PlanItemDto {
    #[serde(rename = "foodItem")]
    pub food_item: FoodRef,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanMealDto {
    #[serde(rename = "mealType")]
    pub meal_type: MealSlot,
    pub items: Vec<PlanItemDto>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: Uuid,
    #[serde(rename = "patientId")]
    pub patient_id: Uuid,
    #[serde(rename = "dietitianId")]
    pub dietitian_id: Uuid,
    pub name: String,
    pub instructions: Option<String>,
    pub meals: Vec<PlanMealDto>,
    #[serde(rename = "createdAt")]
    pub created_at: OffsetDateTime,
}

impl PlanResponse {
    /// Groups flat item rows back into per-meal sections, emitting only
    /// slots that carry items.
    pub fn from_parts(plan: DietPlan, items: Vec<PlanItemWithFood>) -> Self {
        let mut meals: Vec<PlanMealDto> = Vec::new();
        for item in items {
            let dto = PlanItemDto {
                food_item: FoodRef {
                    id: item.food_id,
                    name: item.food_name,
                    serving_size: item.food_serving_size,
                    calories: item.food_calories,
                },
                quantity: item.quantity,
                unit: item.unit,
                notes: item.notes,
            };
            match meals.iter_mut().find(|m| m.meal_type == item.slot) {
                Some(meal) => meal.items.push(dto),
                None => meals.push(PlanMealDto {
                    meal_type: item.slot,
                    items: vec![dto],
                }),
            }
        }

        Self {
            id: plan.id,
            patient_id: plan.patient_id,
            dietitian_id: plan.dietitian_id,
            name: plan.name,
            instructions: plan.instructions,
            meals,
            created_at: plan.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> DietPlan {
        DietPlan {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            dietitian_id: Uuid::new_v4(),
            name: "Pitta Pacifying Plan".into(),
            instructions: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn row(slot: MealSlot, name: &str) -> PlanItemWithFood {
        PlanItemWithFood {
            slot,
            quantity: 1.0,
            unit: "serving".into(),
            notes: None,
            food_id: Uuid::new_v4(),
            food_name: name.into(),
            food_serving_size: "100g".into(),
            food_calories: 100.0,
        }
    }

    #[test]
    fn items_group_by_meal_slot() {
        let response = PlanResponse::from_parts(
            plan(),
            vec![
                row(MealSlot::Breakfast, "Oats"),
                row(MealSlot::Breakfast, "Ghee"),
                row(MealSlot::Dinner, "Khichdi"),
            ],
        );
        assert_eq!(response.meals.len(), 2);
        assert_eq!(response.meals[0].meal_type, MealSlot::Breakfast);
        assert_eq!(response.meals[0].items.len(), 2);
        assert_eq!(response.meals[1].meal_type, MealSlot::Dinner);
    }

    #[test]
    fn create_request_defaults_quantity_and_unit() {
        let body = r#"{
            "meals": [
                {"mealType": "lunch", "items": [
                    {"foodId": "7f7c3ea5-9f44-47b2-8f3a-55a1a2b44d20"}
                ]}
            ]
        }"#;
        let req: CreatePlanRequest = serde_json::from_str(body).unwrap();
        assert!(req.name.is_none());
        let item = &req.meals[0].items[0];
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.unit, "serving");
    }
}
