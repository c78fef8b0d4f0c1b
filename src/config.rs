use clap::Parser;
use std::time::Duration;
use crate::error::{GatewayError, GatewayResult};
use crate::provider::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ProviderConfig, ProviderKind};

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "creatorbrief-gateway")]
#[command(about = "Caching, rate-limited AI gateway for CreatorBrief content ideas")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Text-generation backend
    #[arg(long, env = "AI_PROVIDER", value_enum, default_value_t = ProviderKind::Openai)]
    pub provider: ProviderKind,

    // Model id, defaults to the provider's standard model
    #[arg(short, long, env = "AI_MODEL")]
    pub model: Option<String>,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    // Override the provider endpoint (proxy, local mock)
    #[arg(long, env = "AI_BASE_URL")]
    pub base_url: Option<String>,

    // Provider request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub request_timeout: u64,

    // Cache TTL in seconds
    #[arg(short, long, default_value_t = 3600)]
    pub cache_ttl: u64,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 3600)]
    pub rate_window: u64,

    // How often expired cache entries and rate windows are swept, in seconds
    #[arg(long, default_value_t = 300)]
    pub sweep_interval: u64,
}

impl Args {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }

    fn api_key(&self) -> Option<&str> {
        match self.provider {
            ProviderKind::Openai => self.openai_api_key.as_deref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            ProviderKind::Gemini => self.google_api_key.as_deref(),
        }
    }

    pub fn provider_config(&self) -> GatewayResult<ProviderConfig> {
        let api_key = self.api_key().ok_or_else(|| {
            GatewayError::Config(format!(
                "no API key configured for provider {}",
                self.provider.display_name()
            ))
        })?;

        let mut config = ProviderConfig::new(self.provider, api_key)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_timeout(Duration::from_secs(self.request_timeout));
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        Ok(config)
    }
}
