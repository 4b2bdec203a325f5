use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};

use relay::gateway_client::{build_client, forward_reload};
use relay::{parse_message, ForwardError};

const TIMEOUT: Duration = Duration::from_millis(300);

/// Start a throwaway upstream that answers every request with `reply`.
/// Returns the `/reload` URL and a hit counter.
fn spawn_upstream(
    reply: fn() -> HttpResponse,
    delay: Duration,
) -> (String, web::Data<AtomicUsize>) {
    let hits = web::Data::new(AtomicUsize::new(0));
    let hits_for_app = hits.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(hits_for_app.clone()).default_service(web::to(
            move |hits: web::Data<AtomicUsize>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
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
    (format!("http://{addr}/reload"), hits)
}

/// An address nothing is listening on.
fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn queued() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "QUEUED",
        "reference": "TXN-20260101-ABCDEF12",
        "queue_position": 1,
    }))
}

#[actix_rt::test]
async fn success_returns_gateway_body() {
    let (url, hits) = spawn_upstream(queued, Duration::ZERO);
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let body = forward_reload(&client, &url, &request, TIMEOUT).await.unwrap();

    assert_eq!(body["status"], "QUEUED");
    assert_eq!(body["reference"], "TXN-20260101-ABCDEF12");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn slow_gateway_is_a_timeout() {
    let (url, hits) = spawn_upstream(queued, Duration::from_secs(3));
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let err = forward_reload(&client, &url, &request, TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::Timeout(_)), "{err:?}");
    assert_eq!(err.code(), "gateway_timeout");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn refused_connection_is_unavailable() {
    let url = format!("http://{}/reload", closed_port());
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let err = forward_reload(&client, &url, &request, TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::Unavailable(_)), "{err:?}");
    assert_eq!(err.code(), "gateway_unavailable");
}

#[actix_rt::test]
async fn error_status_is_upstream_error_with_status() {
    let (url, hits) = spawn_upstream(
        || HttpResponse::InternalServerError().json(serde_json::json!({"status": "ERROR"})),
        Duration::ZERO,
    );
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let err = forward_reload(&client, &url, &request, TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::Upstream(500)), "{err:?}");
    assert_eq!(hits.load(Ordering::SeqCst), 1, "must not retry");
}

#[actix_rt::test]
async fn non_json_success_is_invalid_response() {
    let (url, _) = spawn_upstream(
        || HttpResponse::Ok().content_type("text/html").body("<html>ok</html>"),
        Duration::ZERO,
    );
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let err = forward_reload(&client, &url, &request, TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::InvalidResponse(_)), "{err:?}");
    assert_eq!(err.code(), "invalid_gateway_response");
}

#[actix_rt::test]
async fn json_array_is_not_the_expected_structure() {
    let (url, _) = spawn_upstream(|| HttpResponse::Ok().json([1, 2, 3]), Duration::ZERO);
    let client = build_client(TIMEOUT).unwrap();
    let request = parse_message("09171234567 GIGA99 99").unwrap();

    let err = forward_reload(&client, &url, &request, TIMEOUT)
        .await
        .unwrap_err();

    assert!(matches!(err, ForwardError::InvalidResponse(_)), "{err:?}");
}
