use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
    time::Duration,
};

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::{
        ports::{LLMClient, ProductLookupClient},
        value_objects::{Nutriments, Product, ProductSearchResponse},
    },
};

/// Answers completion requests from a queue, recording every prompt.
pub struct ScriptedLLMClient {
    responses: Mutex<VecDeque<Result<String, CoreError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLLMClient {
    pub fn new(responses: Vec<Result<String, CoreError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LLMClient for ScriptedLLMClient {
    async fn generate_with_text(
        &self,
        prompt: String,
        _response_schema: Option<serde_json::Value>,
    ) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(CoreError::ExternalServiceError(
                "no scripted response left".to_string(),
            ))
        })
    }
}

/// Product database keyed by search term; unknown terms find nothing.
#[derive(Default)]
pub struct StaticProductLookup {
    results: HashMap<String, Result<ProductSearchResponse, CoreError>>,
    delays: HashMap<String, Duration>,
    searches: Mutex<Vec<(String, String, u32)>>,
    completed: Mutex<Vec<String>>,
}

impl StaticProductLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, term: &str, brand: Option<&str>, kcal_100g: Option<f64>) -> Self {
        let product = Product {
            product_name: Some(term.to_string()),
            brands: brand.map(str::to_string),
            nutriments: Nutriments {
                energy_kcal_100g: kcal_100g,
                energy_kcal: None,
            },
        };
        self.results.insert(
            term.to_string(),
            Ok(ProductSearchResponse {
                count: 1,
                products: vec![product],
            }),
        );
        self
    }

    pub fn with_error(mut self, term: &str) -> Self {
        self.results.insert(
            term.to_string(),
            Err(CoreError::ExternalServiceError("timed out".to_string())),
        );
        self
    }

    /// Holds the answer for `term` back by `delay`.
    pub fn with_delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_string(), delay);
        self
    }

    pub fn searches(&self) -> Vec<(String, String, u32)> {
        self.searches.lock().unwrap().clone()
    }

    /// Search terms in the order their answers were produced.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

impl ProductLookupClient for StaticProductLookup {
    async fn search(
        &self,
        term: String,
        country_tag: String,
        page_size: u32,
    ) -> Result<ProductSearchResponse, CoreError> {
        self.searches
            .lock()
            .unwrap()
            .push((term.clone(), country_tag, page_size));

        if let Some(delay) = self.delays.get(&term) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(term.clone());

        self.results
            .get(&term)
            .cloned()
            .unwrap_or_else(|| Ok(ProductSearchResponse::empty()))
    }
}
