use serde::{Deserialize, Serialize};
use std::fmt;

/// Carrier a reload is routed to.
///
/// Derived from the promo code by the webhook; never validated further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    Smart,
    Globe,
}

impl Network {
    /// Classify a promo code. Codes starting with `G` go to SMART, everything
    /// else to GLOBE.
    pub fn infer(promo: &str) -> Self {
        if promo.to_ascii_uppercase().starts_with('G') {
            Network::Smart
        } else {
            Network::Globe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Smart => "SMART",
            Network::Globe => "GLOBE",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reload instruction, as posted to the gateway's `/reload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadRequest {
    pub msisdn: String,
    /// Always uppercase.
    pub promo: String,
    pub amount: i64,
    pub network: Network,
}
