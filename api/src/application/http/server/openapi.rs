use utoipa::OpenApi;

use crate::application::http::{
    health::{__path_health, health},
    meal_analysis::router::MealAnalysisApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "MealKcal API"),
    paths(health),
    nest((path = "/meals", api = MealAnalysisApiDoc))
)]
pub struct ApiDoc;
