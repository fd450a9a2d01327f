use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::TargetDefaults;
use crate::plans::repo::{self, PlanItemNutrients};

/// Plan name reported when a patient has no diet plan.
pub const FALLBACK_PLAN_NAME: &str = "Default RDA";

/// Rounded daily macro totals, used for both targets and intake averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Clone)]
pub struct ResolvedTargets {
    pub targets: MacroTotals,
    pub plan_name: String,
}

pub fn fallback_targets(defaults: &TargetDefaults) -> MacroTotals {
    MacroTotals {
        calories: defaults.calories.round() as i64,
        protein: defaults.protein.round() as i64,
        carbs: defaults.carbs.round() as i64,
        fat: defaults.fat.round() as i64,
    }
}

/// Reduces a plan's full meal set into one daily prescription: per-serving
/// values times quantity, summed over every item of every meal.
pub fn sum_plan_items(items: &[PlanItemNutrients]) -> MacroTotals {
    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;

    for item in items {
        calories += item.calories * item.quantity;
        protein += item.protein_g * item.quantity;
        carbs += item.carbs_g * item.quantity;
        fat += item.fat_g * item.quantity;
    }

    MacroTotals {
        calories: calories.round() as i64,
        protein: protein.round() as i64,
        carbs: carbs.round() as i64,
        fat: fat.round() as i64,
    }
}

/// Resolves daily targets from the patient's most recent plan, or the
/// configured fallback when no plan exists. Older plans are never consulted.
pub async fn resolve_targets(
    db: &PgPool,
    defaults: &TargetDefaults,
    patient_id: Uuid,
) -> anyhow::Result<ResolvedTargets> {
    match repo::find_active(db, patient_id).await? {
        None => Ok(ResolvedTargets {
            targets: fallback_targets(defaults),
            plan_name: FALLBACK_PLAN_NAME.into(),
        }),
        Some(plan) => {
            let items = repo::fetch_plan_nutrients(db, plan.id).await?;
            Ok(ResolvedTargets {
                targets: sum_plan_items(&items),
                plan_name: plan.name,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, calories: f64, protein: f64, carbs: f64, fat: f64) -> PlanItemNutrients {
        PlanItemNutrients {
            quantity,
            calories,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
        }
    }

    #[test]
    fn fallback_matches_configured_defaults() {
        let targets = fallback_targets(&TargetDefaults::default());
        assert_eq!(
            targets,
            MacroTotals {
                calories: 2000,
                protein: 50,
                carbs: 250,
                fat: 70,
            }
        );
    }

    #[test]
    fn sums_across_all_items_with_quantity() {
        let items = vec![
            item(2.0, 150.0, 5.0, 30.0, 1.0),
            item(1.0, 100.0, 10.0, 0.0, 4.0),
        ];
        let totals = sum_plan_items(&items);
        assert_eq!(totals.calories, 400);
        assert_eq!(totals.protein, 20);
        assert_eq!(totals.carbs, 60);
        assert_eq!(totals.fat, 6);
    }

    #[test]
    fn rounds_to_nearest_integer() {
        let items = vec![item(0.5, 105.0, 3.4, 20.6, 1.5)];
        let totals = sum_plan_items(&items);
        assert_eq!(totals.calories, 53); // 52.5 rounds away from zero
        assert_eq!(totals.protein, 2); // 1.7
        assert_eq!(totals.carbs, 10); // 10.3
        assert_eq!(totals.fat, 1); // 0.75
    }

    #[test]
    fn empty_plan_sums_to_zero() {
        assert_eq!(sum_plan_items(&[]), MacroTotals::default());
    }
}
