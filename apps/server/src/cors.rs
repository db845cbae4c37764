//! CORS policy for the relay.
//!
//! The relay performs no privileged action of its own, so the default policy
//! accepts every origin. Deployments reachable beyond trusted callers should
//! list their origins instead.

use actix_cors::Cors;
use tracing::warn;

use crate::config;

pub fn build_cors(config: &config::Cors) -> Cors {
    if config.allow_any_origin {
        return Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allow_any_method()
            .allow_any_header()
            .max_age(config.max_age_secs);
    }

    if config.allowed_origins.is_empty() {
        warn!("CORS allows no origins; browsers on other origins will be refused");
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .max_age(config.max_age_secs)
}
