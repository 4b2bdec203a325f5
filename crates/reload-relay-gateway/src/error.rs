use actix_web::{HttpResponse, ResponseError};
use relay::StatusMessage;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Body absent, blank or `{}`
    #[error("Empty request body")]
    EmptyBody,
    /// Body is not a JSON object
    #[error("Invalid JSON body")]
    InvalidJson,
    /// Required fields absent or null
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// A present field failed its check
    #[error("{0}")]
    InvalidField(String),
    /// Storage backend failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::EmptyBody
            | GatewayError::InvalidJson
            | GatewayError::MissingFields(_)
            | GatewayError::InvalidField(_) => {
                tracing::warn!(reason = %self, "reload rejected");
                HttpResponse::BadRequest().json(StatusMessage::new("ERROR", self.to_string()))
            }
            GatewayError::Store(e) => {
                tracing::error!("Store error: {}", e);
                internal_error()
            }
            GatewayError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
        }
    }
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(StatusMessage::new("ERROR", "Internal server error"))
}
