use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutritionRecord {
    /// Food name, suffixed with `von {brand}` for looked-up products.
    pub original: String,
    pub info: String,
    #[serde(default)]
    pub kcal_per_100g: Option<f64>,
}

impl NutritionRecord {
    pub fn new(original: String, info: String, kcal_per_100g: Option<f64>) -> Self {
        Self {
            original,
            info,
            kcal_per_100g,
        }
    }
}
