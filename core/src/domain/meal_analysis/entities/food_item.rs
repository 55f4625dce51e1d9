use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether a food still needs a product lookup.
///
/// Serialized as the nullable `is_basic` flag: `null` until classification ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum FoodClassification {
    #[default]
    Unclassified,
    Basic,
    Processed,
}

impl From<Option<bool>> for FoodClassification {
    fn from(is_basic: Option<bool>) -> Self {
        match is_basic {
            None => FoodClassification::Unclassified,
            Some(true) => FoodClassification::Basic,
            Some(false) => FoodClassification::Processed,
        }
    }
}

impl From<FoodClassification> for Option<bool> {
    fn from(classification: FoodClassification) -> Self {
        match classification {
            FoodClassification::Unclassified => None,
            FoodClassification::Basic => Some(true),
            FoodClassification::Processed => Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodItem {
    pub name: String,
    /// Grams as extracted; not validated to be positive.
    pub quantity: f64,
    #[serde(rename = "is_basic", default)]
    #[schema(value_type = Option<bool>)]
    pub classification: FoodClassification,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            classification: FoodClassification::Unclassified,
        }
    }

    pub fn classified(self, is_basic: bool) -> Self {
        Self {
            classification: Some(is_basic).into(),
            ..self
        }
    }

    pub fn is_basic(&self) -> Option<bool> {
        self.classification.into()
    }
}
