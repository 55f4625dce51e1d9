use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    meal_analysis::entities::{FoodItem, NutritionRecord, PipelineState},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealAnalysisResult {
    pub id: Uuid,
    pub meal_description: String,
    pub food_items: Vec<FoodItem>,
    pub nutrition_info: Vec<NutritionRecord>,
    pub total_kcal: f64,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl MealAnalysisResult {
    pub fn from_state(state: PipelineState) -> Self {
        let (now, timestamp) = generate_timestamp();
        let summary = state.summary().unwrap_or_default().to_string();

        Self {
            id: Uuid::new_v7(timestamp),
            meal_description: state.meal_description,
            food_items: state.food_items,
            nutrition_info: state.nutrition_info,
            total_kcal: state.total_kcal,
            summary,
            created_at: now,
        }
    }
}
