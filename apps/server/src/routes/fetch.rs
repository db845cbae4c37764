use actix_web::{HttpResponse, http::StatusCode, post, web};
use reqdash::{
    Relay, RelayOutcome,
    protocol::{ErrorBody, decode_request},
};
use tracing::error;

macros_utils::routes! {
    route fetch_route,
}

/// Relay route
///
/// Executes the posted request descriptor and answers with the normalized
/// response. The remote status is inside the body; this route only answers
/// 400 for a missing URL and 500 for anything that went wrong on the way.
/// If the caller disconnects, actix drops this future and the outbound call
/// with it.
#[post("/fetch")]
pub async fn fetch_route(relay: web::Data<Relay>, body: web::Bytes) -> HttpResponse {
    let request = match decode_request(&body) {
        Ok(request) => request,
        Err(decode_error) => {
            error!("Relay body is not a request descriptor: {decode_error}");
            return HttpResponse::InternalServerError()
                .json(ErrorBody::new(decode_error.to_string()));
        }
    };

    let outcome = relay.execute(request).await;
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match outcome {
        RelayOutcome::Succeeded(response) => HttpResponse::Ok().json(response),
        failed => HttpResponse::build(status).json(failed.error_body()),
    }
}
