use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_analysis::entities::{FoodItem, NutritionRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryMessage {
    pub kind: MessageKind,
    pub content: String,
}

impl SummaryMessage {
    pub fn summary(content: String) -> Self {
        Self {
            kind: MessageKind::Summary,
            content,
        }
    }
}

/// The value threaded through the four pipeline stages of one run.
///
/// Every stage takes the state by value and hands back a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PipelineState {
    pub meal_description: String,
    pub food_items: Vec<FoodItem>,
    pub nutrition_info: Vec<NutritionRecord>,
    pub messages: Vec<SummaryMessage>,
    pub total_kcal: f64,
}

impl PipelineState {
    pub fn new(meal_description: impl Into<String>) -> Self {
        Self {
            meal_description: meal_description.into(),
            ..Self::default()
        }
    }

    /// Content of the last message, i.e. the rendered summary once aggregation ran.
    pub fn summary(&self) -> Option<&str> {
        self.messages.last().map(|message| message.content.as_str())
    }
}
