use serde::Serialize;
use sqlx::FromRow;
use time::Date;

use crate::foods::repo::DoshaEffect;
use crate::plans::targets::MacroTotals;

/// One consumed entry with the food's current per-serving values and dosha
/// classification. Nutrients here come from the catalog as it is now, not
/// from the entry's cached calorie snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct EntryNutrients {
    pub quantity: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub vata_effect: DoshaEffect,
    pub pitta_effect: DoshaEffect,
    pub kapha_effect: DoshaEffect,
}

/// Aggravation event counts per dosha. Each aggravating entry counts once
/// per dosha it aggravates; pacifying and neutral entries count nowhere,
/// so `Neutral` stays at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DoshaCounts {
    pub vata: i64,
    pub pitta: i64,
    pub kapha: i64,
    pub neutral: i64,
}

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub days_logged: i64,
    pub totals: MacroTotals,
    pub dosha: DoshaCounts,
}

/// Number of calendar days spanned by the inclusive range, floor of one.
/// A reversed range degrades to one day rather than erroring.
pub fn span_days(start: Date, end: Date) -> i64 {
    ((end - start).whole_days() + 1).max(1)
}

/// Folds the range's entries into daily-average macro totals and dosha
/// aggravation counts. Totals are summed as per-serving value times
/// quantity, divided by the day span, and rounded per field. Dosha counts
/// are raw event counts and are never averaged.
pub fn aggregate_entries(
    entries: &[EntryNutrients],
    days_logged: i64,
    days_diff: i64,
) -> Aggregate {
    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;
    let mut dosha = DoshaCounts::default();

    for entry in entries {
        let qty = entry.quantity;
        calories += entry.calories * qty;
        protein += entry.protein_g * qty;
        carbs += entry.carbs_g * qty;
        fat += entry.fat_g * qty;

        if entry.vata_effect == DoshaEffect::Aggravates {
            dosha.vata += 1;
        }
        if entry.pitta_effect == DoshaEffect::Aggravates {
            dosha.pitta += 1;
        }
        if entry.kapha_effect == DoshaEffect::Aggravates {
            dosha.kapha += 1;
        }
    }

    let span = days_diff.max(1) as f64;
    Aggregate {
        days_logged,
        totals: MacroTotals {
            calories: (calories / span).round() as i64,
            protein: (protein / span).round() as i64,
            carbs: (carbs / span).round() as i64,
            fat: (fat / span).round() as i64,
        },
        dosha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(quantity: f64, calories: f64) -> EntryNutrients {
        EntryNutrients {
            quantity,
            calories,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            vata_effect: DoshaEffect::Neutral,
            pitta_effect: DoshaEffect::Neutral,
            kapha_effect: DoshaEffect::Neutral,
        }
    }

    fn vata_aggravating(calories: f64) -> EntryNutrients {
        EntryNutrients {
            vata_effect: DoshaEffect::Aggravates,
            ..entry(1.0, calories)
        }
    }

    #[test]
    fn empty_range_yields_zeros_without_error() {
        let result = aggregate_entries(&[], 0, 7);
        assert_eq!(result.days_logged, 0);
        assert_eq!(result.totals, MacroTotals::default());
        assert_eq!(result.dosha, DoshaCounts::default());
    }

    #[test]
    fn single_day_range_is_not_averaged() {
        let result = aggregate_entries(&[entry(1.0, 500.0)], 1, 1);
        assert_eq!(result.totals.calories, 500);
    }

    #[test]
    fn two_day_range_averages_and_rounds() {
        // 500 kcal on day one, 300 kcal on day two
        let entries = vec![entry(1.0, 500.0), entry(1.0, 300.0)];
        let result = aggregate_entries(&entries, 2, 2);
        assert_eq!(result.totals.calories, 400);
    }

    #[test]
    fn quantity_scales_every_nutrient() {
        let entries = vec![EntryNutrients {
            protein_g: 10.0,
            carbs_g: 20.0,
            fat_g: 5.0,
            ..entry(2.5, 100.0)
        }];
        let result = aggregate_entries(&entries, 1, 1);
        assert_eq!(result.totals.calories, 250);
        assert_eq!(result.totals.protein, 25);
        assert_eq!(result.totals.carbs, 50);
        assert_eq!(result.totals.fat, 13); // 12.5 rounds up
    }

    #[test]
    fn aggravating_entries_count_once_each() {
        let entries = vec![
            vata_aggravating(100.0),
            vata_aggravating(100.0),
            vata_aggravating(100.0),
        ];
        let result = aggregate_entries(&entries, 1, 1);
        assert_eq!(result.dosha.vata, 3);
        assert_eq!(result.dosha.pitta, 0);
        assert_eq!(result.dosha.kapha, 0);
        assert_eq!(result.dosha.neutral, 0);
    }

    #[test]
    fn pacifying_and_neutral_never_count() {
        let entries = vec![EntryNutrients {
            vata_effect: DoshaEffect::Pacifies,
            pitta_effect: DoshaEffect::Neutral,
            kapha_effect: DoshaEffect::Pacifies,
            ..entry(1.0, 100.0)
        }];
        let result = aggregate_entries(&entries, 1, 1);
        assert_eq!(result.dosha, DoshaCounts::default());
    }

    #[test]
    fn one_entry_can_aggravate_several_doshas() {
        let entries = vec![EntryNutrients {
            vata_effect: DoshaEffect::Aggravates,
            pitta_effect: DoshaEffect::Aggravates,
            kapha_effect: DoshaEffect::Neutral,
            ..entry(1.0, 100.0)
        }];
        let result = aggregate_entries(&entries, 1, 1);
        assert_eq!(result.dosha.vata, 1);
        assert_eq!(result.dosha.pitta, 1);
        assert_eq!(result.dosha.kapha, 0);
    }

    #[test]
    fn dosha_counts_are_not_averaged_over_the_span() {
        let entries = vec![vata_aggravating(100.0), vata_aggravating(100.0)];
        let result = aggregate_entries(&entries, 2, 7);
        assert_eq!(result.dosha.vata, 2);
        assert_eq!(result.totals.calories, 29); // 200 / 7 rounded
    }

    #[test]
    fn span_is_inclusive_of_both_endpoints() {
        let d = date!(2025 - 01 - 20);
        assert_eq!(span_days(d, d), 1);
        assert_eq!(span_days(d, date!(2025 - 01 - 21)), 2);
        assert_eq!(span_days(date!(2025 - 01 - 01), date!(2025 - 01 - 31)), 31);
    }

    #[test]
    fn reversed_span_floors_at_one_day() {
        assert_eq!(span_days(date!(2025 - 01 - 21), date!(2025 - 01 - 20)), 1);
    }

    #[test]
    fn dosha_counts_serialize_capitalized() {
        let json = serde_json::to_value(DoshaCounts {
            vata: 2,
            pitta: 0,
            kapha: 1,
            neutral: 0,
        })
        .unwrap();
        assert_eq!(json["Vata"], 2);
        assert_eq!(json["Kapha"], 1);
        assert!(json.get("vata").is_none());
    }
}
