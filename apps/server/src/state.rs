//! Shared application state.

use std::sync::Arc;

use actix_web::{
    HttpResponse,
    error::InternalError,
    web::{self, ServiceConfig},
};
use reqdash::{FileStore, MemoryStore, Relay, RequestStore, protocol::ErrorBody};
use tracing::info;

use crate::{config::Config, error::AppError, routes};

/// Relay and store handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub relay: web::Data<Relay>,
    pub store: web::Data<dyn RequestStore>,
}

impl AppState {
    /// Build the relay and open the configured store
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let store: Arc<dyn RequestStore> = match &config.store.path {
            Some(path) => Arc::new(FileStore::open(path).await?),
            None => {
                info!("No store path configured, saved requests are kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::new(Relay::new(config.relay_config())?, store))
    }

    pub fn new(relay: Relay, store: Arc<dyn RequestStore>) -> Self {
        Self { relay: web::Data::new(relay), store: web::Data::from(store) }
    }

    /// State with default relay settings and an in-memory store
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let relay =
            Relay::new(reqdash::RelayConfig::default()).expect("default relay should build");
        Self::new(relay, Arc::new(MemoryStore::new()))
    }

    /// Register state, extractor settings and every route.
    ///
    /// Relay bodies are read without a size cap, so `/fetch` never answers
    /// with the extractor's plain-text 413.
    pub fn configure(&self, cfg: &mut ServiceConfig) {
        let json_config = web::JsonConfig::default().error_handler(|error, _request| {
            let body = ErrorBody::new(error.to_string());
            InternalError::from_response(error, HttpResponse::BadRequest().json(body)).into()
        });

        cfg.app_data(self.relay.clone())
            .app_data(self.store.clone())
            .app_data(json_config)
            .app_data(web::PayloadConfig::new(usize::MAX))
            .configure(routes::routes);
    }
}
