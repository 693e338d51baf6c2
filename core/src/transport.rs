//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` owns the `ureq` agent and a shared `Throttle`. Every dispatch
//! first waits for its throttle slot, then issues the request. `ureq` reports
//! non-2xx statuses as errors, which are returned unchanged inside
//! `ApiError::Transport`.
//!
//! The timeout covers connecting, sending the request and waiting for the
//! response head. Reading the body is not bounded, so a large result that
//! keeps arriving can be streamed for as long as it takes.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, ResponseStream};
use crate::throttle::Throttle;

/// Default bound on each phase up to the response head.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
    throttle: Arc<Throttle>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport").field("throttle", &self.throttle).finish_non_exhaustive()
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        Self::with_throttle(timeout, Arc::new(Throttle::default()))
    }

    /// Build a transport that shares its rate limit with other transports.
    pub fn with_throttle(timeout: Duration, throttle: Arc<Throttle>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_connect(Some(timeout))
            .timeout_send_request(Some(timeout))
            .timeout_recv_response(Some(timeout))
            .build()
            .new_agent();
        Self { agent, throttle }
    }

    pub fn throttle(&self) -> &Arc<Throttle> {
        &self.throttle
    }

    /// Wait for a throttle slot, send `req` and return the open body.
    pub fn execute(&self, req: HttpRequest) -> Result<ResponseStream, ApiError> {
        self.throttle.wait();
        tracing::debug!(method = %req.method, url = %req.url, "dispatching request");

        let response = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                let body = req.body.unwrap_or_default();
                builder.send(body.as_bytes())?
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        tracing::debug!(status, "response received");

        let reader = response.into_body().into_reader();
        Ok(ResponseStream::new(status, content_type, Box::new(reader)))
    }
}
