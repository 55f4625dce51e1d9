use axum::extract::State;
use mealkcal_core::domain::meal_analysis::{
    entities::MealAnalysisResult, ports::MealAnalysisService, value_objects::AnalyzeMealInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    meal_analysis::validators::AnalyzeMealRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMealResponse {
    pub data: MealAnalysisResult,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "meal-analysis",
    summary = "Estimate the calories of a meal",
    description = "Extracts the foods of a free-text meal description, looks up their energy density and sums the total",
    request_body = AnalyzeMealRequest,
    responses(
        (status = 200, body = AnalyzeMealResponse),
        (status = 400, body = ErrorResponse, description = "Blank or malformed request"),
        (status = 422, body = ErrorResponse, description = "Description too long")
    )
)]
pub async fn analyze_meal(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeMealRequest>,
) -> Result<Response<AnalyzeMealResponse>, ApiError> {
    let result = state
        .service
        .analyze_meal(AnalyzeMealInput {
            meal_description: payload.meal_description,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeMealResponse { data: result }))
}
