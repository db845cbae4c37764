use actix_web::{HttpResponse, post, web};
use reqdash::parser::{MethodInference, ParserOptions, parse_with};
use serde::Deserialize;

use crate::report::ParseReport;

macros_utils::routes! {
    route parse_route,
}

#[derive(Debug, Deserialize)]
pub struct ParseBody {
    command: String,
    #[serde(default)]
    mode: MethodInference,
}

/// Parse a curl command on the server, for clients without a local parser
#[post("/parse")]
pub async fn parse_route(body: web::Json<ParseBody>) -> HttpResponse {
    let ParseBody { command, mode } = body.into_inner();
    let options = ParserOptions::default().with_method_inference(mode);

    HttpResponse::Ok().json(ParseReport::from(parse_with(&command, &options)))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::state::AppState;

    #[actix_web::test]
    async fn test_parse_reports_descriptor() {
        let state = AppState::in_memory();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let request = test::TestRequest::post()
            .uri("/parse")
            .set_json(json!({"command": "curl https://api.example.com/users -d '{\"a\":1}'"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(
            body,
            json!({
                "request": {
                    "url": "https://api.example.com/users",
                    "method": "POST",
                    "headers": {},
                    "data": {"a": 1},
                },
                "complete": true,
                "warnings": [],
            })
        );
    }

    #[actix_web::test]
    async fn test_parse_payload_only_mode() {
        let state = AppState::in_memory();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let request = test::TestRequest::post()
            .uri("/parse")
            .set_json(json!({
                "command": "curl -X DELETE https://a.example",
                "mode": "payload-only",
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["request"]["method"], "GET");
        assert_eq!(body["complete"], false);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_command_is_400() {
        let state = AppState::in_memory();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let request = test::TestRequest::post().uri("/parse").set_json(json!({})).to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }
}
