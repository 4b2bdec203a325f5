use crate::config::WebhookConfig;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WebhookConfig>,
    /// Client reused for every forward to the gateway
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: WebhookConfig) -> Result<Self, reqwest::Error> {
        let http_client = relay::gateway_client::build_client(config.request_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }
}
