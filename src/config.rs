use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// FoodData Central, used to backfill the local catalog on barcode misses.
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionApiConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Generative-language API behind the dietitian chat.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerativeApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub nutrition: NutritionApiConfig,
    pub generative: GenerativeApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "nutriplan".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "nutriplan-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let nutrition = NutritionApiConfig {
            api_key: std::env::var("FDC_API_KEY").unwrap_or_default(),
            base_url: std::env::var("FDC_BASE_URL")
                .unwrap_or_else(|_| "https://api.nal.usda.gov/fdc".into()),
        };
        let generative = GenerativeApiConfig {
            api_key: std::env::var("GENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GENAI_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".into()),
            model: std::env::var("GENAI_MODEL")
                .unwrap_or_else(|_| "google/gemini-flash-1.5".into()),
        };
        Ok(Self {
            database_url,
            jwt,
            nutrition,
            generative,
        })
    }
}
