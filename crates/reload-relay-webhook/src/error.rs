use actix_web::{HttpResponse, ResponseError};
use relay::{ForwardError, ParseError, StatusMessage};

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Body absent, not JSON, or an empty JSON value
    #[error("Empty request body")]
    EmptyBody,
    /// `message` absent or empty
    #[error("Missing 'message' field")]
    MissingMessage,
    /// Message text failed the reload grammar
    #[error("{0}")]
    InvalidFormat(#[from] ParseError),
    #[error("Gateway timeout")]
    GatewayTimeout,
    #[error("Gateway unavailable")]
    GatewayUnavailable,
    #[error("Gateway error: {0}")]
    GatewayError(u16),
    #[error("Invalid gateway response")]
    InvalidGatewayResponse,
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ForwardError> for WebhookError {
    fn from(e: ForwardError) -> Self {
        match e {
            ForwardError::Timeout(_) => WebhookError::GatewayTimeout,
            ForwardError::Unavailable(_) => WebhookError::GatewayUnavailable,
            ForwardError::Upstream(status) => WebhookError::GatewayError(status),
            ForwardError::InvalidResponse(_) => WebhookError::InvalidGatewayResponse,
        }
    }
}

impl ResponseError for WebhookError {
    fn error_response(&self) -> HttpResponse {
        match self {
            WebhookError::EmptyBody | WebhookError::MissingMessage => {
                tracing::warn!(reason = %self, "message rejected");
                HttpResponse::BadRequest().json(StatusMessage::new("error", self.to_string()))
            }
            WebhookError::InvalidFormat(e) => {
                tracing::warn!(reason = %e, "validation failed");
                HttpResponse::BadRequest()
                    .json(StatusMessage::new("invalid_format", e.to_string()))
            }
            WebhookError::GatewayTimeout => {
                HttpResponse::GatewayTimeout().json(StatusMessage::new("error", self.to_string()))
            }
            WebhookError::GatewayUnavailable => HttpResponse::ServiceUnavailable()
                .json(StatusMessage::new("error", self.to_string())),
            WebhookError::GatewayError(_) | WebhookError::InvalidGatewayResponse => {
                HttpResponse::BadGateway().json(StatusMessage::new("error", self.to_string()))
            }
            WebhookError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(StatusMessage::new("error", "Internal server error"))
            }
        }
    }
}
