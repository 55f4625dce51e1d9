use std::time::Duration;

use crate::domain::{
    common::{LLMConfig, LLMProvider, entities::app_errors::CoreError},
    meal_analysis::ports::LLMClient,
};

pub mod gemini_client;
pub mod ollama_client;

pub use gemini_client::GeminiLLMClient;
pub use ollama_client::OllamaLLMClient;

/// The completion backend picked at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredLLMClient {
    Ollama(OllamaLLMClient),
    Gemini(GeminiLLMClient),
}

impl ConfiguredLLMClient {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        let base_url = config.resolved_base_url();
        let timeout = Duration::from_secs(config.timeout_secs);

        match config.provider {
            LLMProvider::Ollama => Ok(Self::Ollama(OllamaLLMClient::new(
                base_url,
                config.model.clone(),
                timeout,
            )?)),
            LLMProvider::Gemini => {
                let api_key = config
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        CoreError::Configuration("Gemini requires an API key".to_string())
                    })?;

                Ok(Self::Gemini(GeminiLLMClient::new(
                    base_url,
                    api_key,
                    config.model.clone(),
                    timeout,
                )?))
            }
        }
    }
}

impl LLMClient for ConfiguredLLMClient {
    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String, CoreError> {
        match self {
            Self::Ollama(client) => client.generate_with_text(prompt, response_schema).await,
            Self::Gemini(client) => client.generate_with_text(prompt, response_schema).await,
        }
    }
}
