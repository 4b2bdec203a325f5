use std::time::Instant;

use actix_web::middleware::from_fn;
use actix_web::{web, HttpResponse};
use relay::{forward_reload, parse_message, ParseError};
use serde_json::Value;

use crate::error::WebhookError;
use crate::metrics::{FORWARD_LATENCY, MESSAGES};
use crate::middleware::require_api_key;
use crate::state::AppState;

/// POST /messenger - Parse a chat message and forward it to the gateway
pub async fn messenger(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, WebhookError> {
    let text = match extract_message(&body) {
        Ok(text) => text,
        Err(e) => {
            MESSAGES.with_label_values(&["rejected"]).inc();
            return Err(e);
        }
    };
    tracing::info!(message = %text, "Received message");

    let request = parse_message(&text).inspect_err(|_| {
        MESSAGES.with_label_values(&["invalid_format"]).inc();
    })?;
    tracing::info!(
        msisdn = %request.msisdn,
        promo = %request.promo,
        amount = request.amount,
        network = %request.network,
        "Parsed transaction"
    );

    let timeout = state.config.request_timeout;
    let start = Instant::now();
    let result = forward_reload(
        &state.http_client,
        &state.config.gateway_url,
        &request,
        timeout,
    )
    .await;
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(gateway) => {
            FORWARD_LATENCY.with_label_values(&["success"]).observe(elapsed);
            MESSAGES.with_label_values(&["success"]).inc();
            tracing::info!(gateway = %gateway, "Gateway response");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "status": "success",
                "message": "Transaction queued",
                "gateway": gateway,
            })))
        }
        Err(e) => {
            FORWARD_LATENCY.with_label_values(&[e.code()]).observe(elapsed);
            MESSAGES.with_label_values(&[e.code()]).inc();
            tracing::error!(gateway_url = %state.config.gateway_url, "Forward failed: {e}");
            Err(e.into())
        }
    }
}

/// Pull the `message` text out of the webhook body.
///
/// Empty, null or non-object bodies are `EmptyBody`; an absent, null or
/// empty `message` is `MissingMessage`; a present but non-string `message`
/// fails the grammar as `Message text is required`.
fn extract_message(body: &[u8]) -> Result<String, WebhookError> {
    let data: Value = serde_json::from_slice(body).map_err(|_| WebhookError::EmptyBody)?;
    let Value::Object(fields) = data else {
        return Err(WebhookError::EmptyBody);
    };
    if fields.is_empty() {
        return Err(WebhookError::EmptyBody);
    }

    match fields.get("message") {
        None | Some(Value::Null) => Err(WebhookError::MissingMessage),
        Some(Value::String(s)) if s.is_empty() => Err(WebhookError::MissingMessage),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Bool(false)) => Err(WebhookError::MissingMessage),
        Some(Value::Array(a)) if a.is_empty() => Err(WebhookError::MissingMessage),
        Some(Value::Object(o)) if o.is_empty() => Err(WebhookError::MissingMessage),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(WebhookError::MissingMessage),
        Some(_) => Err(WebhookError::InvalidFormat(ParseError::Empty)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/messenger")
            .wrap(from_fn(require_api_key))
            .route(web::post().to(messenger)),
    );
}
