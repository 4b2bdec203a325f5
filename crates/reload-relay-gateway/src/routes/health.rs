use actix_web::{web, HttpRequest, HttpResponse};
use relay::security::bearer_matches;

use crate::error::GatewayError;
use crate::metrics;
use crate::state::AppState;

/// GET /health - Health check endpoint
pub async fn health(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    let queue_size = state.store.len()?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "reload-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "queue_size": queue_size,
    })))
}

/// GET /metrics - Prometheus metrics endpoint (optionally auth-gated)
pub async fn metrics(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(ref expected_token) = state.config.metrics_token {
        let header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok());

        if !bearer_matches(header, expected_token.as_bytes()) {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "unauthorized",
                "message": "Valid Bearer token required for /metrics"
            }));
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics));
}
