use clap::{Args as ClapArgs, Parser, ValueEnum};
use mealkcal_core::domain::common::{
    DEFAULT_OPEN_FOOD_FACTS_URL, LLMConfig, LLMProvider, MealKcalConfig, PipelineConfig,
    ProductLookupConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "mealkcal", version, about = "Estimates the calories of a described meal")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub lookup: ProductLookupArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Analyze this meal description once, print the summary and exit
    #[arg(long)]
    pub meal: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3333"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LlmProviderArg {
    Ollama,
    Gemini,
}

impl From<LlmProviderArg> for LLMProvider {
    fn from(provider: LlmProviderArg) -> Self {
        match provider {
            LlmProviderArg::Ollama => LLMProvider::Ollama,
            LlmProviderArg::Gemini => LLMProvider::Gemini,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "llm-provider", env = "LLM_PROVIDER", value_enum, default_value = "ollama")]
    pub provider: LlmProviderArg,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "mistral:instruct")]
    pub model: String,

    /// Overrides the provider's default endpoint
    #[arg(long = "llm-base-url", env = "LLM_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ProductLookupArgs {
    #[arg(long = "lookup-base-url", env = "LOOKUP_BASE_URL", default_value = DEFAULT_OPEN_FOOD_FACTS_URL)]
    pub base_url: String,

    #[arg(long = "lookup-country", env = "LOOKUP_COUNTRY", default_value = "de")]
    pub country_tag: String,

    #[arg(long = "lookup-timeout-secs", env = "LOOKUP_TIMEOUT_SECS", default_value_t = 5)]
    pub timeout_secs: u64,

    #[arg(long = "lookup-max-retries", env = "LOOKUP_MAX_RETRIES", default_value_t = 1)]
    pub max_retries: u32,

    #[arg(long = "lookup-retry-delay-ms", env = "LOOKUP_RETRY_DELAY_MS", default_value_t = 250)]
    pub retry_delay_ms: u64,

    /// Product lookups running at once; 1 keeps them sequential
    #[arg(long = "lookup-concurrency", env = "LOOKUP_CONCURRENCY", default_value_t = 4)]
    pub concurrency: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for MealKcalConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                provider: args.llm.provider.into(),
                base_url: args.llm.base_url,
                model: args.llm.model,
                api_key: args.llm.api_key,
                timeout_secs: args.llm.timeout_secs,
            },
            product_lookup: ProductLookupConfig {
                base_url: args.lookup.base_url,
                timeout_secs: args.lookup.timeout_secs,
                max_retries: args.lookup.max_retries,
                retry_base_delay_ms: args.lookup.retry_delay_ms,
            },
            pipeline: PipelineConfig {
                country_tag: args.lookup.country_tag,
                lookup_concurrency: args.lookup.concurrency,
            },
        }
    }
}
