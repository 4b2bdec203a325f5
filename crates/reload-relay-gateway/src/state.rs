use crate::config::GatewayConfig;
use crate::store::{InMemoryQueue, TransactionStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub store: Arc<dyn TransactionStore>,
}

impl AppState {
    pub fn new(config: GatewayConfig, store: Arc<dyn TransactionStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// State backed by a fresh in-memory queue.
    pub fn in_memory(config: GatewayConfig) -> Self {
        Self::new(config, Arc::new(InMemoryQueue::new()))
    }
}
