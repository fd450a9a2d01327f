use serde::{Deserialize, Serialize};
use time::{format_description::FormatItem, macros::format_description, Date};
use uuid::Uuid;

use crate::error::ApiError;
use crate::intake::repo::{EntryWithFood, MealSlot};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` wire date into a calendar day. Bad input is
/// rejected before any query runs.
pub fn parse_date(input: &str) -> Result<Date, ApiError> {
    Date::parse(input.trim(), &DATE_FORMAT)
        .map_err(|_| ApiError::Validation(format!("Invalid date '{input}', expected YYYY-MM-DD")))
}

/// Body of the log-intake write endpoint.
#[derive(Debug, Deserialize)]
pub struct LogIntakeRequest {
    pub date: String,
    #[serde(rename = "mealType")]
    pub meal_type: MealSlot,
    #[serde(rename = "foodId")]
    pub food_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "serving".into()
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: String,
}

/// Catalog subset embedded in each returned entry.
#[derive(Debug, Clone, Serialize)]
pub struct FoodRef {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "servingSize")]
    pub serving_size: String,
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDto {
    pub id: Uuid,
    #[serde(rename = "foodItem")]
    pub food_item: FoodRef,
    pub quantity: f64,
    pub unit: String,
    /// Insertion-time snapshot, kept independent of later catalog edits.
    pub calories: f64,
}

impl From<EntryWithFood> for EntryDto {
    fn from(e: EntryWithFood) -> Self {
        Self {
            id: e.id,
            food_item: FoodRef {
                id: e.food_id,
                name: e.food_name,
                serving_size: e.food_serving_size,
                calories: e.food_calories,
            },
            quantity: e.quantity,
            unit: e.unit,
            calories: e.calories,
        }
    }
}

/// The four meal slots in wire shape. Always fully populated so callers
/// never branch on absence.
#[derive(Debug, Default, Serialize)]
pub struct MealSet {
    pub breakfast: Vec<EntryDto>,
    pub lunch: Vec<EntryDto>,
    pub dinner: Vec<EntryDto>,
    pub snack: Vec<EntryDto>,
}

pub fn group_entries(entries: Vec<EntryWithFood>) -> MealSet {
    let mut meals = MealSet::default();
    for entry in entries {
        let slot = entry.slot;
        let dto = EntryDto::from(entry);
        match slot {
            MealSlot::Breakfast => meals.breakfast.push(dto),
            MealSlot::Lunch => meals.lunch.push(dto),
            MealSlot::Dinner => meals.dinner.push(dto),
            MealSlot::Snack => meals.snack.push(dto),
        }
    }
    meals
}

#[derive(Debug, Serialize)]
pub struct DayLogResponse {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meals: MealSet,
    #[serde(rename = "totalCalories")]
    pub total_calories: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(slot: MealSlot, calories: f64) -> EntryWithFood {
        EntryWithFood {
            id: Uuid::new_v4(),
            slot,
            quantity: 1.0,
            unit: "serving".into(),
            calories,
            food_id: Uuid::new_v4(),
            food_name: "Rice".into(),
            food_serving_size: "100g".into(),
            food_calories: calories,
        }
    }

    #[test]
    fn parse_date_accepts_iso_days() {
        assert_eq!(parse_date("2025-01-20").unwrap(), date!(2025 - 01 - 20));
        assert_eq!(parse_date(" 2025-01-20 ").unwrap(), date!(2025 - 01 - 20));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn log_request_fills_quantity_and_unit_defaults() {
        let body = r#"{
            "date": "2025-01-20",
            "mealType": "lunch",
            "foodId": "7f7c3ea5-9f44-47b2-8f3a-55a1a2b44d20"
        }"#;
        let req: LogIntakeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.meal_type, MealSlot::Lunch);
        assert_eq!(req.quantity, 1.0);
        assert_eq!(req.unit, "serving");
    }

    #[test]
    fn group_entries_routes_each_slot() {
        let meals = group_entries(vec![
            entry(MealSlot::Breakfast, 120.0),
            entry(MealSlot::Snack, 80.0),
            entry(MealSlot::Breakfast, 90.0),
        ]);
        assert_eq!(meals.breakfast.len(), 2);
        assert_eq!(meals.snack.len(), 1);
        assert!(meals.lunch.is_empty());
        assert!(meals.dinner.is_empty());
    }

    #[test]
    fn empty_day_serializes_all_four_slots() {
        let response = DayLogResponse {
            date: date!(2025 - 01 - 20),
            meals: MealSet::default(),
            total_calories: 0.0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["date"], "2025-01-20");
        assert_eq!(json["totalCalories"], 0.0);
        for slot in ["breakfast", "lunch", "dinner", "snack"] {
            assert!(json["meals"][slot].as_array().unwrap().is_empty());
        }
    }
}
