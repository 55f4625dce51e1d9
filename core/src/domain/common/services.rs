use std::sync::Arc;

use crate::domain::{
    common::PipelineConfig,
    meal_analysis::ports::{LLMClient, ProductLookupClient},
};

/// Holds the adapters every pipeline run talks to.
#[derive(Clone)]
pub struct Service<LLM, PL>
where
    LLM: LLMClient,
    PL: ProductLookupClient,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) product_lookup_client: Arc<PL>,
    pub(crate) config: PipelineConfig,
}

impl<LLM, PL> Service<LLM, PL>
where
    LLM: LLMClient,
    PL: ProductLookupClient,
{
    pub fn new(llm_client: LLM, product_lookup_client: PL, config: PipelineConfig) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            product_lookup_client: Arc::new(product_lookup_client),
            config,
        }
    }
}
