use serde::Deserialize;

use crate::foods::repo::DoshaProfile;

/// Manual catalog entry. Nutrient values are per serving.
#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    #[serde(rename = "servingSize", default = "default_serving_size")]
    pub serving_size: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub rasa: Option<String>,
    #[serde(default)]
    pub virya: Option<String>,
    #[serde(default)]
    pub vipaka: Option<String>,
    #[serde(default)]
    pub guna: Option<String>,
    #[serde(rename = "doshaEffect", default)]
    pub dosha: DoshaProfile,
}

fn default_serving_size() -> String {
    "100g".into()
}

#[derive(Debug, Deserialize)]
pub struct FoodSearchQuery {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::repo::DoshaEffect;

    #[test]
    fn create_request_fills_defaults() {
        let body = r#"{"name": "Mung Dal", "calories": 105}"#;
        let req: CreateFoodRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.serving_size, "100g");
        assert_eq!(req.protein_g, 0.0);
        assert_eq!(req.dosha.vata, DoshaEffect::Neutral);
    }

    #[test]
    fn create_request_parses_dosha_effects() {
        let body = r#"{
            "name": "Chili",
            "calories": 40,
            "doshaEffect": {"vata": "neutral", "pitta": "aggravates", "kapha": "pacifies"}
        }"#;
        let req: CreateFoodRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.dosha.pitta, DoshaEffect::Aggravates);
        assert_eq!(req.dosha.kapha, DoshaEffect::Pacifies);
    }
}
