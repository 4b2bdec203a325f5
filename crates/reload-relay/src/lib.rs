//! Airtime reload relay.
//!
//! A reload instruction travels through two services:
//!
//! - **Webhook** (`relay-webhook`) — parses an untrusted chat message into a
//!   [`ReloadRequest`] and forwards it to the gateway
//! - **Gateway** (`relay-gateway`) — re-validates the fields, assigns a
//!   reference and appends the transaction to its in-memory queue
//!
//! This crate holds what both sides agree on: the message grammar, the wire
//! types and the HTTP client the webhook uses to reach the gateway.
//!
//! # Quick example
//!
//! ```
//! use relay::{parse_message, Network};
//!
//! let request = parse_message("09171234567 giga99 99").unwrap();
//! assert_eq!(request.promo, "GIGA99");
//! assert_eq!(request.network, Network::Smart);
//! ```

pub mod constants;
pub mod error;
pub mod gateway_client;
pub mod message;
pub mod request;
pub mod response;
pub mod security;

pub use constants::*;
pub use error::{ForwardError, ParseError};
pub use gateway_client::forward_reload;
pub use message::parse_message;
pub use request::{Network, ReloadRequest};
pub use response::*;
