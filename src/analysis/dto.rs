use serde::{Deserialize, Serialize};

use crate::analysis::engine::DoshaCounts;
use crate::plans::targets::MacroTotals;

/// `from`/`to` as `YYYY-MM-DD`, both days included.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub from: String,
    pub to: String,
}

/// Target-vs-actual comparison over a date range. The same shape serves the
/// patient viewing their own data and the dietitian viewing a patient's.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    #[serde(rename = "daysLogged")]
    pub days_logged: i64,
    pub totals: MacroTotals,
    pub targets: MacroTotals,
    #[serde(rename = "planName")]
    pub plan_name: String,
    #[serde(rename = "doshaAnalysis")]
    pub dosha_analysis: DoshaCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_the_wire_field_names() {
        let response = AnalysisResponse {
            days_logged: 3,
            totals: MacroTotals {
                calories: 1800,
                protein: 60,
                carbs: 220,
                fat: 55,
            },
            targets: MacroTotals {
                calories: 2000,
                protein: 50,
                carbs: 250,
                fat: 70,
            },
            plan_name: "Default RDA".into(),
            dosha_analysis: DoshaCounts::default(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["daysLogged"], 3);
        assert_eq!(json["totals"]["calories"], 1800);
        assert_eq!(json["targets"]["fat"], 70);
        assert_eq!(json["planName"], "Default RDA");
        assert_eq!(json["doshaAnalysis"]["Vata"], 0);
        assert_eq!(json["doshaAnalysis"]["Neutral"], 0);
    }
}
