//! Executes built requests over HTTP.
//!
//! One GET per call, bounded by the configured timeout and by the caller's
//! `RequestContext`. The whole body is read before returning, so the
//! connection goes back to the pool (or is closed) on every exit path; when a
//! call is cancelled, the in-flight future is dropped, which closes it.

use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse};

#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    timeout: Duration,
}

impl Transport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = match config.http_client() {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .timeout(config.timeout())
                .user_agent(config.user_agent())
                .build()
                .map_err(|e| Error::InvalidConfiguration(format!("HTTP client: {e}")))?,
        };
        Ok(Self {
            client,
            timeout: config.timeout(),
        })
    }

    pub async fn execute(&self, request: &HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        ctx.run(self.round_trip(request)).await
    }

    async fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.get(request.url.clone()).timeout(self.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        debug!(url = %request.url, "sending host.io request");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = %request.url, status, bytes = body.len(), "received host.io response");

        Ok(HttpResponse { status, body })
    }
}
