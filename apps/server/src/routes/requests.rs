use actix_web::{HttpResponse, delete, get, post, web};
use reqdash::{RequestDescriptor, RequestStore};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

macros_utils::routes! {
    route list_requests_route,
    route create_request_route,
    route delete_request_route,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    name: String,
    request: RequestDescriptor,
}

/// List saved requests, oldest first
#[get("/requests")]
pub async fn list_requests_route(
    store: web::Data<dyn RequestStore>,
) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(store.list().await?))
}

#[post("/requests")]
pub async fn create_request_route(
    store: web::Data<dyn RequestStore>,
    body: web::Json<CreateRequest>,
) -> Result<HttpResponse, ApiError> {
    let CreateRequest { name, request } = body.into_inner();
    let saved = store.create(&name, request).await?;

    info!(id = %saved.id, name = %saved.name, "Saved request");
    Ok(HttpResponse::Created().json(saved))
}

#[delete("/requests/{id}")]
pub async fn delete_request_route(
    store: web::Data<dyn RequestStore>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    if !store.delete(id).await? {
        return Err(ApiError::NotFound(id));
    }

    info!(%id, "Deleted saved request");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::state::AppState;

    #[actix_web::test]
    async fn test_create_list_delete() {
        let state = AppState::in_memory();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let request = test::TestRequest::post()
            .uri("/requests")
            .set_json(json!({
                "name": "Users",
                "request": {
                    "url": "https://api.example.com/users",
                    "method": "GET",
                    "headers": {},
                    "data": null,
                },
            }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let saved: Value = test::read_body_json(response).await;
        let id = saved["id"].as_str().unwrap().to_string();
        assert_eq!(saved["name"], "Users");
        assert_eq!(saved["request"]["url"], "https://api.example.com/users");

        let listed: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/requests").to_request(),
        )
        .await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], id.as_str());

        let response = test::call_service(
            &app,
            test::TestRequest::delete().uri(&format!("/requests/{id}")).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = test::call_service(
            &app,
            test::TestRequest::delete().uri(&format!("/requests/{id}")).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains(&id));
    }

    #[actix_web::test]
    async fn test_empty_name_is_400() {
        let state = AppState::in_memory();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let request = test::TestRequest::post()
            .uri("/requests")
            .set_json(json!({"name": " ", "request": {"url": "https://a.example"}}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"error": "Request name cannot be empty"}));
    }
}
