//! Relay request handling implementation.

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use reqwest::{redirect, Method};
use tracing::{debug, error, info, warn};

use super::extract::normalize_response;
use crate::{
    handlers::{
        config::RelayConfig,
        error::RelayError,
        response::{
            build_error_response, build_rejected_response, build_success_response, RelayOutcome,
            RelayStage,
        },
        validation::validate_relay_request,
    },
    protocol::{encode_payload, RequestDescriptor, ResponseDescriptor},
};

/// Executes request descriptors against remote origins.
///
/// Holds one pooled client; calls share nothing else, so a `Relay` can be
/// used from many tasks at once.
#[derive(Debug, Clone)]
pub struct Relay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl Relay {
    /// Build a relay and its HTTP client
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let redirects = match config.max_redirects {
            0 => redirect::Policy::none(),
            max => redirect::Policy::limited(max),
        };
        let mut builder = reqwest::Client::builder().timeout(config.timeout).redirect(redirects);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder.build().map_err(RelayError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Create a cancellation handle for [`Relay::execute_with_cancel`]
    pub fn cancel_pair() -> (AbortHandle, AbortRegistration) {
        AbortHandle::new_pair()
    }

    /// Handle a relay request
    pub async fn execute(&self, request: RequestDescriptor) -> RelayOutcome {
        let (_handle, registration) = Self::cancel_pair();
        self.execute_with_cancel(request, registration).await
    }

    /// Handle a relay request that the caller may abort through the handle
    /// paired with `registration`
    pub async fn execute_with_cancel(
        &self,
        request: RequestDescriptor,
        registration: AbortRegistration,
    ) -> RelayOutcome {
        info!(
            url = %request.url,
            method = %request.method,
            headers = request.headers.len(),
            has_data = request.data.is_some(),
            "Relay request"
        );
        debug!(stage = %RelayStage::Received, "Relay stage");

        debug!(stage = %RelayStage::Validating, "Relay stage");
        if let Err(error) = validate_relay_request(&request) {
            warn!(stage = %RelayStage::Rejected, "Relay request rejected: {error}");
            return build_rejected_response(error);
        }

        debug!(stage = %RelayStage::Calling, "Relay stage");
        let call = Abortable::new(self.perform_http_request(&request), registration);

        let outcome = match call.await {
            Ok(Ok(response)) => build_success_response(response),
            Ok(Err(error)) => build_error_response(error),
            Err(_aborted) => build_error_response(RelayError::Cancelled),
        };

        match &outcome {
            RelayOutcome::Succeeded(response) => {
                info!(
                    stage = %outcome.stage(),
                    status = response.status,
                    url = %request.url,
                    "Relay completed"
                );
            }
            RelayOutcome::Rejected(relay_error) | RelayOutcome::Failed(relay_error) => {
                error!(
                    stage = %outcome.stage(),
                    code = relay_error.code(),
                    url = %request.url,
                    "Relay error: {}",
                    relay_error.message()
                );
            }
        }

        outcome
    }

    /// Perform the outbound call and normalize its response
    pub async fn perform_http_request(
        &self,
        request: &RequestDescriptor,
    ) -> Result<ResponseDescriptor, RelayError> {
        let method = Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|_| RelayError::InvalidMethod(request.method.to_string()))?;

        let mut http_request = self.client.request(method, request.url.as_str());

        for (name, value) in request.headers.iter() {
            http_request = http_request.header(name, value);
        }

        if let Some(data) = request.transmitted_data() {
            http_request = http_request.body(encode_payload(data)?);
        }

        let response = http_request
            .send()
            .await
            .map_err(|error| RelayError::from_reqwest(error, self.config.timeout))?;

        normalize_response(response, self.config.timeout).await
    }
}
