use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use actix_web::{test, web, App, HttpResponse, HttpServer};

use relay_webhook::config::WebhookConfig;
use relay_webhook::routes;
use relay_webhook::state::AppState;

const API_KEY: &str = "test-api-key";
const TIMEOUT: Duration = Duration::from_millis(300);

/// What the fake gateway saw.
#[derive(Default)]
struct Upstream {
    hits: AtomicUsize,
    last_body: Mutex<Option<serde_json::Value>>,
}

impl Upstream {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a fake gateway that answers every request with `reply` after `delay`.
fn spawn_gateway(reply: fn() -> HttpResponse, delay: Duration) -> (String, web::Data<Upstream>) {
    let upstream = web::Data::new(Upstream::default());
    let upstream_for_app = upstream.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(upstream_for_app.clone()).default_service(web::to(
            move |body: web::Bytes, upstream: web::Data<Upstream>| async move {
                upstream.hits.fetch_add(1, Ordering::SeqCst);
                *upstream.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
                tokio::time::sleep(delay).await;
                reply()
            },
        ))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    (format!("http://{addr}/reload"), upstream)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/reload")
}

fn make_state(gateway_url: &str) -> web::Data<AppState> {
    let config = WebhookConfig {
        request_timeout: TIMEOUT,
        ..WebhookConfig::new(gateway_url, API_KEY)
    };
    web::Data::new(AppState::new(config).unwrap())
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data($state.clone()).configure(routes::configure)).await
    };
}

fn messenger_req(message: serde_json::Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/messenger")
        .insert_header(("X-API-Key", API_KEY))
        .set_json(message)
}

fn queued() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "QUEUED",
        "reference": "TXN-20260101-ABCDEF12",
        "queue_position": 1,
    }))
}

fn server_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("boom")
}

fn html() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body("<html>proxy login</html>")
}

#[actix_rt::test]
async fn test_health() {
    let state = make_state(&closed_port_url());
    let app = app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "messenger-webhook");
}

#[actix_rt::test]
async fn test_missing_api_key_is_401_without_forwarding() {
    let (url, upstream) = spawn_gateway(queued, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/messenger")
        .set_json(serde_json::json!({"message": "09171234567 GIGA99 99"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid API key");
    assert_eq!(upstream.hits(), 0);
}

#[actix_rt::test]
async fn test_wrong_api_key_is_401_before_parsing() {
    let (url, upstream) = spawn_gateway(queued, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    // Malformed body: a 401 proves auth runs first.
    let req = test::TestRequest::post()
        .uri("/messenger")
        .insert_header(("X-API-Key", "wrong-key"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(upstream.hits(), 0);
}

#[actix_rt::test]
async fn test_success_forwards_parsed_request() {
    let (url, upstream) = spawn_gateway(queued, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "  09171234567 giga99 99 "})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Transaction queued");
    assert_eq!(body["gateway"]["reference"], "TXN-20260101-ABCDEF12");

    assert_eq!(upstream.hits(), 1);
    let forwarded = upstream.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(
        forwarded,
        serde_json::json!({
            "msisdn": "09171234567",
            "promo": "GIGA99",
            "amount": 99,
            "network": "SMART",
        })
    );
}

#[actix_rt::test]
async fn test_invalid_format_is_400_without_forwarding() {
    let (url, upstream) = spawn_gateway(queued, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "0917123456 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "invalid_format");
    assert_eq!(
        body["message"],
        "Invalid phone number format: 0917123456. Must be 09XXXXXXXXX"
    );

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "09171234567 GIGA99 10001"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Invalid amount: 10001. Must be between 1 and 10000"
    );

    assert_eq!(upstream.hits(), 0);
}

#[actix_rt::test]
async fn test_missing_message_and_empty_body() {
    let (url, upstream) = spawn_gateway(queued, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"text": "09171234567 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Missing 'message' field");

    let req = test::TestRequest::post()
        .uri("/messenger")
        .insert_header(("X-API-Key", API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Empty request body");

    assert_eq!(upstream.hits(), 0);
}

#[actix_rt::test]
async fn test_gateway_timeout_is_504() {
    let (url, upstream) = spawn_gateway(queued, Duration::from_secs(3));
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "09171234567 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 504);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Gateway timeout");
    assert_eq!(upstream.hits(), 1);
}

#[actix_rt::test]
async fn test_gateway_down_is_503() {
    let state = make_state(&closed_port_url());
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "09171234567 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 503);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Gateway unavailable");
}

#[actix_rt::test]
async fn test_gateway_500_is_502_with_single_attempt() {
    let (url, upstream) = spawn_gateway(server_error, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "09171234567 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Gateway error: 500");
    assert_eq!(upstream.hits(), 1);
}

#[actix_rt::test]
async fn test_non_json_gateway_reply_is_502() {
    let (url, upstream) = spawn_gateway(html, Duration::ZERO);
    let state = make_state(&url);
    let app = app!(state);

    let resp = test::call_service(
        &app,
        messenger_req(serde_json::json!({"message": "09171234567 GIGA99 99"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 502);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid gateway response");
    assert_eq!(upstream.hits(), 1);
}

#[actix_rt::test]
async fn test_metrics_requires_token_when_configured() {
    let config = WebhookConfig {
        metrics_token: Some("t0ken".to_string()),
        ..WebhookConfig::new(closed_port_url(), API_KEY)
    };
    let state = web::Data::new(AppState::new(config).unwrap());
    let app = app!(state);

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/metrics")
        .insert_header(("Authorization", "Bearer t0ken"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}
