use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};
use relay::security::constant_time_eq;
use relay::{StatusMessage, API_KEY_HEADER};

use crate::metrics::AUTH_FAILURES;
use crate::state::AppState;

/// Reject requests whose `X-API-Key` header does not match the configured key.
///
/// Runs before the handler, so an unauthenticated body is never parsed or
/// forwarded.
pub async fn require_api_key<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
        tracing::error!("AppState missing from app data; rejecting request");
        let resp = HttpResponse::InternalServerError()
            .json(StatusMessage::new("error", "Internal server error"));
        return Ok(req.into_response(resp).map_into_right_body());
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .map(|v| v.as_bytes().to_vec());

    let reason = match provided {
        None => Some("missing"),
        Some(key) if !constant_time_eq(&key, state.config.api_key.as_bytes()) => {
            Some("mismatch")
        }
        Some(_) => None,
    };

    if let Some(reason) = reason {
        AUTH_FAILURES.with_label_values(&[reason]).inc();
        let peer = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        tracing::warn!(peer = %peer, reason, "Unauthorized access attempt");
        let resp = HttpResponse::Unauthorized()
            .json(StatusMessage::new("error", "Invalid API key"));
        return Ok(req.into_response(resp).map_into_right_body());
    }

    next.call(req)
        .await
        .map(ServiceResponse::map_into_left_body)
}
