use std::time::Duration;

use rand::Rng;
use reqwest::Client;
use tracing::{instrument, warn};

use crate::domain::{
    common::{ProductLookupConfig, entities::app_errors::CoreError},
    meal_analysis::{ports::ProductLookupClient, value_objects::ProductSearchResponse},
};

const SEARCH_PATH: &str = "/cgi/search.pl";

/// Open Food Facts search client.
///
/// Every attempt is bounded by the configured timeout. Failed attempts are retried
/// `max_retries` times with jittered exponential backoff.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    base_url: String,
    client: Client,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl OpenFoodFactsClient {
    pub fn new(config: ProductLookupConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mealkcal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build Open Food Facts HTTP client: {}", e);
                CoreError::Configuration(format!("product lookup HTTP client: {}", e))
            })?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            max_retries = config.max_retries,
            "Initializing Open Food Facts client"
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        })
    }

    /// `base * 2^attempt` plus up to `base` of random jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.retry_base_delay.as_millis() as u64;
        let exponential = base.saturating_mul(1u64 << attempt.min(10));
        let jitter = if base == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=base)
        };

        Duration::from_millis(exponential.saturating_add(jitter))
    }

    async fn search_once(
        &self,
        term: &str,
        country_tag: &str,
        page_size: u32,
    ) -> Result<ProductSearchResponse, CoreError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);
        let page_size = page_size.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("search_terms", term),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
                ("tagtype_0", "countries"),
                ("tag_contains_0", "contains"),
                ("tag_0", country_tag),
            ])
            .send()
            .await
            .map_err(|e| CoreError::ExternalServiceError(format!("product search: {}", e)))?;

        if !response.status().is_success() {
            return Err(CoreError::ExternalServiceError(format!(
                "product search returned {}",
                response.status()
            )));
        }

        response.json::<ProductSearchResponse>().await.map_err(|e| {
            CoreError::ExternalServiceError(format!("unreadable product search response: {}", e))
        })
    }
}

impl ProductLookupClient for OpenFoodFactsClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        term: String,
        country_tag: String,
        page_size: u32,
    ) -> Result<ProductSearchResponse, CoreError> {
        let mut attempt = 0;

        loop {
            match self.search_once(&term, &country_tag, page_size).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.max_retries => {
                    let delay = self.backoff_delay(attempt);
                    warn!(error = %e, attempt, delay_ms = delay.as_millis() as u64, "retrying product search");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(max_retries: u32, retry_base_delay_ms: u64) -> OpenFoodFactsClient {
        OpenFoodFactsClient::new(ProductLookupConfig {
            // Nothing listens on the discard port, so requests fail immediately.
            base_url: "http://127.0.0.1:9/".to_string(),
            timeout_secs: 1,
            max_retries,
            retry_base_delay_ms,
        })
        .unwrap()
    }

    #[test]
    fn backoff_grows_exponentially_with_bounded_jitter() {
        let client = client(3, 100);

        for attempt in 0..3 {
            let delay = client.backoff_delay(attempt).as_millis() as u64;
            let floor = 100 * (1 << attempt);
            assert!(delay >= floor && delay <= floor + 100, "attempt {attempt}: {delay}");
        }
    }

    #[test]
    fn zero_base_delay_means_no_wait() {
        assert_eq!(client(1, 0).backoff_delay(4), Duration::ZERO);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        assert_eq!(client(0, 0).base_url, "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn unreachable_database_is_an_external_service_error() {
        let result = client(1, 0)
            .search("Nutella".to_string(), "de".to_string(), 1)
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }
}
