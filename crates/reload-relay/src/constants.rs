/// Length of a subscriber number: `09` followed by nine digits.
pub const MSISDN_LEN: usize = 11;

/// Prefix every accepted subscriber number starts with.
pub const MSISDN_PREFIX: &str = "09";

/// Longest promo code accepted by the message parser.
pub const MAX_PROMO_LEN: usize = 20;

/// Smallest reload amount accepted by the message parser.
pub const MIN_AMOUNT: i64 = 1;

/// Largest reload amount accepted by the message parser.
pub const MAX_AMOUNT: i64 = 10_000;

/// Example shown to users who send a malformed message.
pub const MESSAGE_EXAMPLE: &str = "09171234567 GIGA99 99";

/// Header carrying the webhook's shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Network recorded by the gateway when the caller does not supply one.
pub const UNKNOWN_NETWORK: &str = "UNKNOWN";

/// Default forward timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
