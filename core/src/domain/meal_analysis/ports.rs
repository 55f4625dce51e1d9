use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        entities::MealAnalysisResult,
        value_objects::{AnalyzeMealInput, ProductSearchResponse},
    },
};

/// Text completion backend used by the extraction and classification stages
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// `response_schema` is a hint for backends that support constrained output;
    /// callers still treat the returned text as untrusted.
    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Product database queried for processed foods
#[cfg_attr(test, mockall::automock)]
pub trait ProductLookupClient: Send + Sync {
    fn search(
        &self,
        term: String,
        country_tag: String,
        page_size: u32,
    ) -> impl Future<Output = Result<ProductSearchResponse, CoreError>> + Send;
}

/// Service trait running the full meal analysis pipeline
#[cfg_attr(test, mockall::automock)]
pub trait MealAnalysisService: Send + Sync {
    fn analyze_meal(
        &self,
        input: AnalyzeMealInput,
    ) -> impl Future<Output = Result<MealAnalysisResult, CoreError>> + Send;
}
