pub mod errors;
pub mod food_item;
pub mod meal_analysis_result;
pub mod nutrition_record;
pub mod pipeline_state;

pub use errors::*;
pub use food_item::*;
pub use meal_analysis_result::*;
pub use nutrition_record::*;
pub use pipeline_state::*;
