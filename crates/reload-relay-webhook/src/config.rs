use std::env;
use std::time::Duration;

use relay::DEFAULT_REQUEST_TIMEOUT_SECS;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_RATE_LIMIT_RPM: u32 = 120;
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080/reload";

/// Key accepted only when `RELAY_INSECURE_DEV_KEY=true`.
pub const DEV_API_KEY: &str = "dev-key-change-in-production";

#[derive(Clone)]
pub struct WebhookConfig {
    /// Full URL of the gateway's `/reload` endpoint
    pub gateway_url: String,
    /// Shared secret expected in the `X-API-Key` header
    pub api_key: String,
    /// Upper bound on one forward attempt
    pub request_timeout: Duration,
    /// Server port
    pub port: u16,
    /// Rate limit requests per minute, per client IP
    pub rate_limit_rpm: u32,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("gateway_url", &self.gateway_url)
            .field("api_key", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .field("port", &self.port)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl WebhookConfig {
    /// Config pointing at `gateway_url` with defaults everywhere else.
    pub fn new(gateway_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            port: DEFAULT_PORT,
            rate_limit_rpm: DEFAULT_RATE_LIMIT_RPM,
            metrics_token: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let gateway_url = non_empty("GATEWAY_URL")
            .or_else(|| non_empty("ANDROID_GATEWAY_URL"))
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        let parsed = url::Url::parse(&gateway_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{gateway_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "{gateway_url}: scheme must be http or https"
            )));
        }

        let insecure_dev_key = lookup("RELAY_INSECURE_DEV_KEY")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let api_key = match non_empty("API_KEY") {
            Some(key) => key,
            None if insecure_dev_key => {
                tracing::warn!(
                    "RELAY_INSECURE_DEV_KEY=true; accepting the built-in development API key. \
                     DO NOT use this in production!"
                );
                DEV_API_KEY.to_string()
            }
            None => {
                tracing::error!(
                    "API_KEY is required. Set it to a secure random value \
                     (e.g. `openssl rand -hex 32`). For local development only, \
                     set RELAY_INSECURE_DEV_KEY=true to use the built-in key."
                );
                return Err(ConfigError::MissingRequired("API_KEY"));
            }
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidNumber("REQUEST_TIMEOUT", s))?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let port = match lookup("PORT") {
            Some(s) => s
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber("PORT", s))?,
            None => DEFAULT_PORT,
        };

        let rate_limit_rpm = match lookup("RATE_LIMIT_RPM") {
            Some(s) => s
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber("RATE_LIMIT_RPM", s))?,
            None => DEFAULT_RATE_LIMIT_RPM,
        };

        let metrics_token = non_empty("METRICS_TOKEN");
        if metrics_token.is_none() {
            tracing::warn!("METRICS_TOKEN not set; /metrics endpoint is publicly accessible");
        }

        Ok(Self {
            gateway_url,
            api_key,
            request_timeout,
            port,
            rate_limit_rpm,
            metrics_token,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {0}: {1}")]
    InvalidNumber(&'static str, String),
}
