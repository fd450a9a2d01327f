use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Daily nutrient targets used when a patient has no diet plan. Overridable
/// per deployment so clinical defaults are not baked into the engine.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TargetDefaults {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for TargetDefaults {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 50.0,
            carbs: 250.0,
            fat: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub targets: TargetDefaults,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "ayurcare".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "ayurcare-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };

        let defaults = TargetDefaults::default();
        let targets = TargetDefaults {
            calories: env_f64("DEFAULT_TARGET_CALORIES", defaults.calories),
            protein: env_f64("DEFAULT_TARGET_PROTEIN", defaults.protein),
            carbs: env_f64("DEFAULT_TARGET_CARBS", defaults.carbs),
            fat: env_f64("DEFAULT_TARGET_FAT", defaults.fat),
        };

        Ok(Self {
            database_url,
            jwt,
            targets,
        })
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}
