use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const MAX_MEAL_DESCRIPTION_LENGTH: u64 = 5000;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeMealRequest {
    /// Free text such as "200g Nutella und 100 Gramm Apfel"
    #[validate(length(
        max = MAX_MEAL_DESCRIPTION_LENGTH,
        message = "Die Beschreibung darf höchstens 5000 Zeichen lang sein."
    ))]
    pub meal_description: String,
}
