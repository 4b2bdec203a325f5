//! Gateway queue for reload transactions.
//!
//! Accepts structured reloads over HTTP, re-validates them without trusting
//! the caller, stamps each with a `TXN-` reference and appends it to an
//! append-only queue that lives for the lifetime of the process.
//!
//! # Modules
//!
//! - [`validation`] — request schema and field checks for `POST /reload`
//! - [`reference`] — reference generation
//! - [`store`] — the [`TransactionStore`](store::TransactionStore) seam and its in-memory queue
//! - [`routes`] — HTTP endpoints (health, metrics, reload, queue, status)

pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod reference;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use state::AppState;
pub use store::{InMemoryQueue, TransactionRecord, TransactionStore};
