//! Field checks for `POST /reload`.
//!
//! The gateway does not trust the webhook: it re-checks presence and the
//! amount itself. It deliberately does *not* re-derive the network; a missing
//! network is recorded as `"UNKNOWN"`.

use relay::UNKNOWN_NETWORK;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GatewayError;

/// Raw request body. Every field is optional at the type level so that
/// missing fields can be reported together.
#[derive(Debug, Default, Deserialize)]
pub struct ReloadSubmission {
    #[serde(default)]
    pub msisdn: Option<Value>,
    #[serde(default)]
    pub promo: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub network: Option<Value>,
}

/// A submission that passed intake checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReload {
    pub msisdn: String,
    pub promo: String,
    pub amount: i64,
    pub network: String,
}

/// Decode a request body into a [`ReloadSubmission`].
///
/// An empty body or `{}` is "Empty request body"; anything that is not a JSON
/// object is "Invalid JSON body".
pub fn parse_body(body: &[u8]) -> Result<ReloadSubmission, GatewayError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(GatewayError::EmptyBody);
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| GatewayError::InvalidJson)?;
    match &value {
        Value::Object(map) if map.is_empty() => return Err(GatewayError::EmptyBody),
        Value::Object(_) => {}
        _ => return Err(GatewayError::InvalidJson),
    }
    serde_json::from_value(value).map_err(|_| GatewayError::InvalidJson)
}

impl ReloadSubmission {
    /// Validate into a typed reload.
    ///
    /// A JSON `null` counts as missing.
    pub fn validate(self) -> Result<ValidatedReload, GatewayError> {
        let msisdn = self.msisdn.filter(|v| !v.is_null());
        let promo = self.promo.filter(|v| !v.is_null());
        let amount = self.amount.filter(|v| !v.is_null());

        let missing: Vec<&'static str> = [
            ("msisdn", msisdn.is_none()),
            ("promo", promo.is_none()),
            ("amount", amount.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        let (Some(msisdn), Some(promo), Some(amount)) = (msisdn, promo, amount) else {
            return Err(GatewayError::MissingFields(missing));
        };

        let msisdn = require_string("msisdn", msisdn)?;
        let promo = require_string("promo", promo)?;
        let amount = coerce_amount(&amount)?;

        let network = match self.network {
            None | Some(Value::Null) => UNKNOWN_NETWORK.to_string(),
            Some(Value::String(s)) => s,
            Some(_) => {
                return Err(GatewayError::InvalidField(
                    "network must be a string".to_string(),
                ))
            }
        };

        Ok(ValidatedReload {
            msisdn,
            promo,
            amount,
            network,
        })
    }
}

fn require_string(field: &str, value: Value) -> Result<String, GatewayError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(GatewayError::InvalidField(format!(
            "{field} must be a string"
        ))),
    }
}

/// Coerce `amount` to a strictly positive integer.
///
/// Accepts integers, floats (truncated toward zero) and strings holding an
/// integer. Booleans, objects and arrays are rejected.
pub fn coerce_amount(value: &Value) -> Result<i64, GatewayError> {
    let amount = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.is_finite() && f.abs() < i64::MAX as f64 => f.trunc() as i64,
            _ => return Err(invalid_amount(format!("{n} is not an integer"))),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_amount(format!("{s:?} is not an integer")))?,
        other => return Err(invalid_amount(format!("{other} is not an integer"))),
    };

    if amount <= 0 {
        return Err(invalid_amount("Amount must be positive".to_string()));
    }
    Ok(amount)
}

fn invalid_amount(reason: String) -> GatewayError {
    GatewayError::InvalidField(format!("Invalid amount: {reason}"))
}
