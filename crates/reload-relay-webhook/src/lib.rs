//! Intake side of the reload relay.
//!
//! Accepts `{"message": "MSISDN PROMO AMOUNT"}` on `POST /messenger`, checks
//! the shared `X-API-Key`, parses the text with [`relay::parse_message`] and
//! forwards the structured request to the gateway's `/reload` endpoint.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::WebhookConfig;
pub use error::WebhookError;
pub use state::AppState;
