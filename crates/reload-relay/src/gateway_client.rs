//! HTTP client for the gateway's `POST /reload` endpoint.
//!
//! Exactly one attempt is made per call. Failures are classified into the
//! four [`ForwardError`] variants; nothing is retried.

use std::time::Duration;

use crate::error::ForwardError;
use crate::request::ReloadRequest;

/// Build the shared client used for forwarding.
///
/// Redirects are disabled so a misconfigured gateway cannot bounce the
/// request to another host.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// POST a validated reload to the gateway and return its JSON body.
///
/// A 2xx reply must carry a JSON object; anything else is
/// [`ForwardError::InvalidResponse`].
pub async fn forward_reload(
    client: &reqwest::Client,
    gateway_url: &str,
    request: &ReloadRequest,
    timeout: Duration,
) -> Result<serde_json::Value, ForwardError> {
    tracing::debug!(url = gateway_url, msisdn = %request.msisdn, "forwarding reload");

    let resp = client
        .post(gateway_url)
        .timeout(timeout)
        .json(request)
        .send()
        .await
        .map_err(|e| classify_send_error(e, timeout))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ForwardError::Upstream(status.as_u16()));
    }

    let bytes = resp.bytes().await.map_err(|e| {
        if e.is_timeout() {
            ForwardError::Timeout(timeout)
        } else {
            ForwardError::InvalidResponse(e.to_string())
        }
    })?;

    let body: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| ForwardError::InvalidResponse(e.to_string()))?;
    if !body.is_object() {
        return Err(ForwardError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    }
    Ok(body)
}

// Timeouts win over connect errors: a connect timeout reports both.
fn classify_send_error(e: reqwest::Error, timeout: Duration) -> ForwardError {
    if e.is_timeout() {
        ForwardError::Timeout(timeout)
    } else {
        ForwardError::Unavailable(e.to_string())
    }
}
