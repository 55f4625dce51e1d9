use crate::{
    domain::common::{MealKcalConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{llm::ConfiguredLLMClient, product_lookup::OpenFoodFactsClient},
};

pub type MealKcalService = Service<ConfiguredLLMClient, OpenFoodFactsClient>;

pub fn create_service(config: MealKcalConfig) -> Result<MealKcalService, CoreError> {
    let llm_client = ConfiguredLLMClient::from_config(&config.llm)?;
    let product_lookup_client = OpenFoodFactsClient::new(config.product_lookup)?;

    tracing::info!(
        provider = ?config.llm.provider,
        model = %config.llm.model,
        country_tag = %config.pipeline.country_tag,
        "meal analysis service ready"
    );

    Ok(Service::new(
        llm_client,
        product_lookup_client,
        config.pipeline,
    ))
}
