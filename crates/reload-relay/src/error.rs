use thiserror::Error;

/// Reasons a chat message is rejected by [`parse_message`](crate::parse_message).
///
/// The `Display` output is shown verbatim to the sender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Message text is required")]
    Empty,

    #[error("Invalid format. Expected: MSISDN PROMO AMOUNT (e.g., 09171234567 GIGA99 99)")]
    Format,

    #[error("Invalid phone number format: {0}. Must be 09XXXXXXXXX")]
    InvalidMsisdn(String),

    #[error("Invalid promo code: {0}")]
    InvalidPromo(String),

    #[error("Invalid amount: {0}. Must be a number")]
    AmountNotNumeric(String),

    #[error("Invalid amount: {0}. Must be between 1 and 10000")]
    AmountOutOfRange(String),
}

/// Outcome of a failed forward to the gateway.
///
/// Every failure lands in exactly one variant; callers map each to its own
/// HTTP status.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("gateway did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("gateway unreachable: {0}")]
    Unavailable(String),

    #[error("gateway replied with status {0}")]
    Upstream(u16),

    #[error("gateway response parse failed: {0}")]
    InvalidResponse(String),
}

impl ForwardError {
    /// Stable machine-readable code, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            ForwardError::Timeout(_) => "gateway_timeout",
            ForwardError::Unavailable(_) => "gateway_unavailable",
            ForwardError::Upstream(_) => "gateway_error",
            ForwardError::InvalidResponse(_) => "invalid_gateway_response",
        }
    }
}
