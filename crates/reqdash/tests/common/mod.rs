//! In-process origin server for relay tests

use std::{collections::BTreeMap, net::SocketAddr, time::Duration};

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;

/// Send relay logs to the test output; `RUST_LOG` narrows them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Start an origin on an ephemeral port and return its address.
///
/// Must be called from inside an actix system (`#[actix_web::test]`).
pub fn spawn_origin() -> SocketAddr {
    init_tracing();
    let server = HttpServer::new(|| {
        App::new()
            .route("/json", web::get().to(json_route))
            .route("/text", web::get().to(text_route))
            .route("/bad-json", web::get().to(bad_json_route))
            .route("/missing", web::get().to(missing_route))
            .route("/cookies", web::get().to(cookies_route))
            .route("/slow", web::get().to(slow_route))
            .route("/custom-reason", web::get().to(custom_reason_route))
            .default_service(web::to(echo_route))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("origin should bind");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    addr
}

async fn json_route() -> HttpResponse {
    HttpResponse::Ok().content_type("application/json").body(r#"{"ok":true}"#)
}

async fn text_route() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("hello")
}

async fn bad_json_route() -> HttpResponse {
    HttpResponse::Ok().content_type("application/json").body("not json")
}

async fn missing_route() -> HttpResponse {
    HttpResponse::NotFound().content_type("text/plain").body("nope")
}

async fn cookies_route() -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Set-Cookie", "a=1"))
        .append_header(("Set-Cookie", "b=2"))
        .content_type("text/plain")
        .body("ok")
}

async fn slow_route() -> HttpResponse {
    actix_web::rt::time::sleep(Duration::from_secs(5)).await;
    HttpResponse::Ok().body("late")
}

async fn custom_reason_route() -> HttpResponse {
    let status = StatusCode::from_u16(299).expect("299 is a valid status code");
    let mut response = HttpResponse::build(status).content_type("text/plain").body("fine");
    response.head_mut().reason = Some("Everything Fine");
    response
}

/// Reflect the method, headers and body back as JSON
async fn echo_route(request: HttpRequest, body: web::Bytes) -> HttpResponse {
    let headers: BTreeMap<String, String> = request
        .headers()
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or_default().to_string()))
        .collect();

    HttpResponse::Ok().json(json!({
        "method": request.method().as_str(),
        "path": request.path(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}
