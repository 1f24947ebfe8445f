use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FoodSearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    20
}

/// Request body for POST /food/custom.
#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    pub serving_size: f64,
    pub serving_unit: String,
}

impl CreateFoodRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if self.serving_size <= 0.0 {
            return Err("Serving size must be positive");
        }
        if self.calories < 0.0 || self.protein_g < 0.0 || self.carbs_g < 0.0 || self.fat_g < 0.0
        {
            return Err("Nutrition values cannot be negative");
        }
        Ok(())
    }
}
