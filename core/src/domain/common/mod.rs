use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;
pub mod services;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org";

#[derive(Clone, Debug, Default)]
pub struct MealKcalConfig {
    pub llm: LLMConfig,
    pub product_lookup: ProductLookupConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LLMProvider {
    #[default]
    Ollama,
    Gemini,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    /// Falls back to the provider's public endpoint when unset.
    pub base_url: Option<String>,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Ollama,
            base_url: None,
            model: "mistral:instruct".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl LLMConfig {
    pub fn resolved_base_url(&self) -> String {
        let url = self.base_url.clone().unwrap_or_else(|| match self.provider {
            LLMProvider::Ollama => DEFAULT_OLLAMA_URL.to_string(),
            LLMProvider::Gemini => DEFAULT_GEMINI_URL.to_string(),
        });

        url.trim_end_matches('/').to_string()
    }
}

#[derive(Clone, Debug)]
pub struct ProductLookupConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for ProductLookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_FOOD_FACTS_URL.to_string(),
            timeout_secs: 5,
            max_retries: 1,
            retry_base_delay_ms: 250,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub country_tag: String,
    /// Upper bound on product lookups in flight; 1 keeps them strictly sequential.
    pub lookup_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            country_tag: "de".to_string(),
            lookup_concurrency: 4,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}
