use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ProviderError;
use crate::config::NutritionApiConfig;

// FoodData Central nutrient ids for the macros we store.
const NUTRIENT_ENERGY_KCAL: u32 = 1008;
const NUTRIENT_PROTEIN: u32 = 1003;
const NUTRIENT_FAT: u32 = 1004;
const NUTRIENT_CARBS: u32 = 1005;

/// A catalog row fetched from the external nutrition database,
/// normalized to per-serving macros.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFood {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub serving_size: f64,
    pub serving_unit: String,
    pub fdc_id: Option<i64>,
}

#[async_trait]
pub trait NutritionApi: Send + Sync {
    /// Look a product up by UPC. `Ok(None)` means the upstream database
    /// has no entry for the code.
    async fn lookup_barcode(&self, upc: &str) -> Result<Option<ExternalFood>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: i64,
    description: String,
    serving_size: Option<f64>,
    serving_size_unit: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

/// FoodData Central client. One request per lookup, no retry; callers
/// cache hits in the local catalog.
pub struct FdcClient {
    config: NutritionApiConfig,
    http: reqwest::Client,
}

impl FdcClient {
    pub fn new(config: NutritionApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NutritionApi for FdcClient {
    async fn lookup_barcode(&self, upc: &str) -> Result<Option<ExternalFood>, ProviderError> {
        let url = format!("{}/v1/foods/search", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", upc),
                ("dataType", "Branded"),
                ("pageSize", "1"),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                service: "FoodData Central",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: SearchResponse =
            response.json().await.map_err(|e| ProviderError::Payload {
                service: "FoodData Central",
                detail: e.to_string(),
            })?;

        let Some(food) = parsed.foods.into_iter().next() else {
            debug!(upc, "no branded food for barcode");
            return Ok(None);
        };

        Ok(Some(normalize(food)))
    }
}

fn normalize(food: SearchFood) -> ExternalFood {
    let mut out = ExternalFood {
        name: food.description,
        calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
        serving_size: food.serving_size.unwrap_or(100.0),
        serving_unit: food.serving_size_unit.unwrap_or_else(|| "g".into()),
        fdc_id: Some(food.fdc_id),
    };
    for n in food.food_nutrients {
        let (Some(id), Some(value)) = (n.nutrient_id, n.value) else {
            continue;
        };
        match id {
            NUTRIENT_ENERGY_KCAL => out.calories = value,
            NUTRIENT_PROTEIN => out.protein_g = value,
            NUTRIENT_CARBS => out.carbs_g = value,
            NUTRIENT_FAT => out.fat_g = value,
            _ => {}
        }
    }
    if out.calories == 0.0 {
        warn!(fdc_id = ?out.fdc_id, "branded food carries no energy value");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(id: u32, value: f64) -> SearchNutrient {
        SearchNutrient {
            nutrient_id: Some(id),
            value: Some(value),
        }
    }

    #[test]
    fn normalize_maps_macro_nutrients() {
        let food = SearchFood {
            fdc_id: 123456,
            description: "GREEK YOGURT, PLAIN".into(),
            serving_size: Some(170.0),
            serving_size_unit: Some("g".into()),
            food_nutrients: vec![
                nutrient(NUTRIENT_ENERGY_KCAL, 59.0),
                nutrient(NUTRIENT_PROTEIN, 10.0),
                nutrient(NUTRIENT_CARBS, 3.6),
                nutrient(NUTRIENT_FAT, 0.4),
                nutrient(1093, 36.0), // sodium, ignored
            ],
        };

        let out = normalize(food);
        assert_eq!(out.name, "GREEK YOGURT, PLAIN");
        assert_eq!(out.calories, 59.0);
        assert_eq!(out.protein_g, 10.0);
        assert_eq!(out.carbs_g, 3.6);
        assert_eq!(out.fat_g, 0.4);
        assert_eq!(out.serving_size, 170.0);
        assert_eq!(out.serving_unit, "g");
        assert_eq!(out.fdc_id, Some(123456));
    }

    #[test]
    fn normalize_defaults_missing_serving_to_100g() {
        let food = SearchFood {
            fdc_id: 9,
            description: "MYSTERY SNACK".into(),
            serving_size: None,
            serving_size_unit: None,
            food_nutrients: vec![],
        };
        let out = normalize(food);
        assert_eq!(out.serving_size, 100.0);
        assert_eq!(out.serving_unit, "g");
        assert_eq!(out.calories, 0.0);
    }

    #[test]
    fn search_response_tolerates_missing_fields() {
        let raw = r#"{
            "foods": [{
                "fdcId": 777,
                "description": "BAR",
                "foodNutrients": [{"nutrientId": 1008}, {"value": 2.0}]
            }]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).expect("parse");
        let out = normalize(parsed.foods.into_iter().next().unwrap());
        assert_eq!(out.calories, 0.0);
    }
}
