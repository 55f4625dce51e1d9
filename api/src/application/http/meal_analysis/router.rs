use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::analyze_meal::{__path_analyze_meal, analyze_meal};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_meal))]
pub struct MealAnalysisApiDoc;

pub fn meal_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/meals/analyze", state.args.server.root_path),
        post(analyze_meal),
    )
}
