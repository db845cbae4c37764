use std::io::Error as IoError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use reqdash::{RelayError, StoreError, protocol::ErrorBody};
use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

/// Errors that stop the server from starting or running
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Relay setup failed: {0}")]
    Relay(#[from] RelayError),
    #[error("Request store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Errors returned by the saved-request routes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Saved request {0} not found")]
    NotFound(Uuid),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::EmptyName) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
