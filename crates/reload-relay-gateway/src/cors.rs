//! CORS for dashboards that poll the queue from a browser.

use actix_cors::Cors;

/// Build the CORS middleware from allowed origins.
///
/// An empty list allows `http://localhost` on any port; `*` allows any origin.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let origin_str = origin.to_str().unwrap_or("");
            if allowed.is_empty() {
                return origin_str == "http://localhost"
                    || origin_str.starts_with("http://localhost:");
            }
            allowed.iter().any(|a| a == "*" || a == origin_str)
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
