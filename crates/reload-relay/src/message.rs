//! Grammar for reload messages: `MSISDN PROMO AMOUNT`.
//!
//! ```text
//! 09171234567 GIGA99 99
//! ```

use crate::constants::{MAX_AMOUNT, MAX_PROMO_LEN, MIN_AMOUNT, MSISDN_LEN, MSISDN_PREFIX};
use crate::error::ParseError;
use crate::request::{Network, ReloadRequest};

/// Parse and validate a free-text reload message.
///
/// Checks run in a fixed order (token count, msisdn, promo, amount) and the
/// first failure is returned. On success the promo is uppercased and the
/// network inferred from it.
pub fn parse_message(text: &str) -> Result<ReloadRequest, ParseError> {
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [msisdn, promo, amount] = parts.as_slice() else {
        return Err(ParseError::Format);
    };

    validate_msisdn(msisdn)?;
    validate_promo(promo)?;
    let amount = parse_amount(amount)?;

    let promo = promo.to_ascii_uppercase();
    let network = Network::infer(&promo);

    Ok(ReloadRequest {
        msisdn: msisdn.to_string(),
        promo,
        amount,
        network,
    })
}

/// `09` followed by exactly nine ASCII digits.
pub fn validate_msisdn(msisdn: &str) -> Result<(), ParseError> {
    let valid = msisdn.len() == MSISDN_LEN
        && msisdn.starts_with(MSISDN_PREFIX)
        && msisdn.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidMsisdn(msisdn.to_string()))
    }
}

/// Non-empty, ASCII letters and digits only, at most 20 characters.
pub fn validate_promo(promo: &str) -> Result<(), ParseError> {
    let valid = !promo.is_empty()
        && promo.len() <= MAX_PROMO_LEN
        && promo.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidPromo(promo.to_string()))
    }
}

/// Integer in `[MIN_AMOUNT, MAX_AMOUNT]`.
///
/// Values too large for `i64` still count as numeric and are reported as out
/// of range.
pub fn parse_amount(raw: &str) -> Result<i64, ParseError> {
    use std::num::IntErrorKind;

    let amount = match raw.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                return Err(ParseError::AmountOutOfRange(raw.to_string()));
            }
            _ => return Err(ParseError::AmountNotNumeric(raw.to_string())),
        },
    };

    if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
        return Err(ParseError::AmountOutOfRange(amount.to_string()));
    }
    Ok(amount)
}
