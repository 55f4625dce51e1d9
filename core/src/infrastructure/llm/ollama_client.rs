use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{common::entities::app_errors::CoreError, meal_analysis::ports::LLMClient};

/// Talks to a local Ollama server through its chat endpoint.
#[derive(Debug, Clone)]
pub struct OllamaLLMClient {
    base_url: String,
    model_name: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

impl OllamaLLMClient {
    pub fn new(base_url: String, model_name: String, timeout: Duration) -> Result<Self, CoreError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            tracing::error!("Failed to build Ollama HTTP client: {}", e);
            CoreError::Configuration(format!("LLM HTTP client: {}", e))
        })?;

        Ok(Self {
            base_url,
            model_name,
            client,
        })
    }

    fn build_request(
        &self,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> OllamaChatRequest {
        OllamaChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            stream: false,
            format: response_schema,
        }
    }
}

impl LLMClient for OllamaLLMClient {
    #[instrument(skip_all, fields(model = %self.model_name))]
    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String, CoreError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = self.build_request(prompt, response_schema);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let chat_response: OllamaChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        Ok(chat_response.message.content)
    }
}
