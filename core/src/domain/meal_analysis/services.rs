use tracing::{info, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    meal_analysis::{
        aggregation::summarize_nutrition,
        classification::classify_food_items,
        entities::{MealAnalysisResult, PipelineState},
        extraction::extract_food_items,
        nutrition_lookup::lookup_nutrition_info,
        ports::{LLMClient, MealAnalysisService, ProductLookupClient},
        value_objects::AnalyzeMealInput,
    },
};

impl<LLM, PL> Service<LLM, PL>
where
    LLM: LLMClient,
    PL: ProductLookupClient,
{
    /// Extraction, classification, nutrition lookup and aggregation, always in that order.
    pub async fn run_pipeline(&self, state: PipelineState) -> PipelineState {
        let state = extract_food_items(self.llm_client.as_ref(), state).await;
        let state = classify_food_items(self.llm_client.as_ref(), state).await;
        let state = lookup_nutrition_info(
            self.product_lookup_client.as_ref(),
            &self.config.country_tag,
            self.config.lookup_concurrency,
            state,
        )
        .await;

        summarize_nutrition(state)
    }
}

impl<LLM, PL> MealAnalysisService for Service<LLM, PL>
where
    LLM: LLMClient,
    PL: ProductLookupClient,
{
    #[instrument(skip_all)]
    async fn analyze_meal(&self, input: AnalyzeMealInput) -> Result<MealAnalysisResult, CoreError> {
        // 1. Reject empty descriptions before spending any completion calls
        if input.meal_description.trim().is_empty() {
            return Err(CoreError::Invalid);
        }

        // 2. Run the pipeline; every stage degrades instead of failing
        let state = self
            .run_pipeline(PipelineState::new(input.meal_description))
            .await;

        info!(
            food_items = state.food_items.len(),
            total_kcal = state.total_kcal,
            "meal analysis finished"
        );

        // 3. Freeze the terminal state into a result
        Ok(MealAnalysisResult::from_state(state))
    }
}
